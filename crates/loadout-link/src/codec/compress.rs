//! Payload compression: zstd, then unpadded base64url.
//!
//! The output alphabet (`A-Z a-z 0-9 - _`) survives URLs without escaping.

use std::io::Read;

use base64::prelude::*;

use crate::error::{DecodeError, EncodeError};

/// Compresses serialized record bytes into URL-safe text.
pub fn compress(record: &[u8], level: i32) -> Result<String, EncodeError> {
    let compressed = zstd::encode_all(record, level)
        .map_err(|e| EncodeError::CompressionFailed(e.to_string()))?;
    Ok(BASE64_URL_SAFE_NO_PAD.encode(compressed))
}

/// Reverses [`compress`], refusing to produce more than `max_len` bytes.
///
/// The cap is enforced while streaming, so a small payload that expands
/// enormously is cut off after `max_len + 1` bytes rather than inflated in
/// full.
pub fn decompress(payload: &str, max_len: usize) -> Result<Vec<u8>, DecodeError> {
    let compressed = BASE64_URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| DecodeError::DecompressionFailed(e.to_string()))?;

    let decoder = zstd::Decoder::new(compressed.as_slice())
        .map_err(|e| DecodeError::DecompressionFailed(e.to_string()))?;

    let mut decompressed = Vec::new();
    decoder
        .take((max_len as u64).saturating_add(1))
        .read_to_end(&mut decompressed)
        .map_err(|e| DecodeError::DecompressionFailed(e.to_string()))?;

    if decompressed.len() > max_len {
        return Err(DecodeError::DecompressedTooLarge { max: max_len });
    }

    Ok(decompressed)
}
