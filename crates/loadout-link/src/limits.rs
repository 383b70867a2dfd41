//! Wire constants and decoder security limits.
//!
//! The constants are the values shipped with the application. [`CodecLimits`]
//! carries the same values as injectable configuration so tests and embedders
//! can tighten or loosen them without touching the codec.

use serde::Deserialize;

/// The single schema version this crate encodes and accepts.
pub const WIRE_VERSION: u32 = 1;

/// Separator between the version prefix and the compressed payload.
pub const VERSION_SEPARATOR: char = '.';

/// Legacy fragment marker that may precede a share code.
pub const LEGACY_MARKER: char = '#';

/// Name of the URL query parameter carrying the share code.
pub const CARRIER_PARAM: &str = "b";

/// Maximum length of the share code in characters, checked before
/// decompression.
pub const MAX_PAYLOAD_CHARS: usize = 5000;

/// Maximum number of entries kept per array field, on encode and decode.
pub const MAX_ARRAY_LEN: usize = 100;

/// Maximum size of the decompressed record in bytes.
pub const MAX_DECOMPRESSED_BYTES: usize = 64 * 1024;

/// Advisory URL length above which a link is flagged as too long to share
/// comfortably.
pub const RECOMMENDED_URL_LEN: usize = 2000;

/// zstd level used for the payload. Fixed so encoding is reproducible.
pub const COMPRESSION_LEVEL: i32 = 19;

/// Injectable limits for a [`ShareCodec`](crate::codec::ShareCodec).
///
/// Deserializes from a partial JSON object; missing fields take the
/// defaults above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodecLimits {
    pub max_payload_chars: usize,
    pub max_array_len: usize,
    pub max_decompressed_bytes: usize,
    pub recommended_url_len: usize,
    pub compression_level: i32,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_payload_chars: MAX_PAYLOAD_CHARS,
            max_array_len: MAX_ARRAY_LEN,
            max_decompressed_bytes: MAX_DECOMPRESSED_BYTES,
            recommended_url_len: RECOMMENDED_URL_LEN,
            compression_level: COMPRESSION_LEVEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_limits_fill_defaults() {
        let limits: CodecLimits = serde_json::from_str(r#"{"max_array_len": 10}"#).unwrap();
        assert_eq!(limits.max_array_len, 10);
        assert_eq!(limits.max_payload_chars, MAX_PAYLOAD_CHARS);
        assert_eq!(limits.recommended_url_len, RECOMMENDED_URL_LEN);
    }
}
