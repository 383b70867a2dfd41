//! Error types for share-link encoding, decoding and registry loading.

use thiserror::Error;

use crate::model::Field;

/// Decode failure classes, one per pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Missing or malformed envelope (prefix, separator, version number)
    InvalidEnvelope,
    /// E002: Input exceeds a size limit
    LimitExceeded,
    /// E003: Payload could not be decompressed
    Decompression,
    /// E004: Decompressed payload is not a well-formed record
    MalformedRecord,
    /// E005: Record version is not supported
    UnsupportedVersion,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidEnvelope => "E001",
            ErrorCode::LimitExceeded => "E002",
            ErrorCode::Decompression => "E003",
            ErrorCode::MalformedRecord => "E004",
            ErrorCode::UnsupportedVersion => "E005",
        }
    }
}

/// Terminal failure while decoding a share code.
///
/// No partial selection is ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    // === E001: Envelope ===
    #[error("[E001] share code is empty")]
    EmptyPayload,

    #[error("[E001] link does not carry a share code")]
    MissingShareCode,

    #[error("[E001] share code is missing the version separator '.'")]
    MissingVersionSeparator,

    #[error("[E001] share code version {raw:?} is not a non-negative integer")]
    InvalidVersion { raw: String },

    // === E002: Limits ===
    #[error("[E002] share code is too long: {len} characters exceeds the maximum of {max}")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("[E002] decompressed share code exceeds the maximum of {max} bytes")]
    DecompressedTooLarge { max: usize },

    // === E003: Decompression ===
    #[error("[E003] share code could not be decompressed: {0}")]
    DecompressionFailed(String),

    // === E004: Structure ===
    #[error("[E004] share code does not contain a valid record: {0}")]
    MalformedRecord(String),

    // === E005: Version ===
    #[error("[E005] unsupported share code version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("[E005] share code envelope version {envelope} does not match record version {record}")]
    VersionMismatch { envelope: u32, record: i64 },
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::EmptyPayload
            | DecodeError::MissingShareCode
            | DecodeError::MissingVersionSeparator
            | DecodeError::InvalidVersion { .. } => ErrorCode::InvalidEnvelope,
            DecodeError::PayloadTooLarge { .. } | DecodeError::DecompressedTooLarge { .. } => {
                ErrorCode::LimitExceeded
            }
            DecodeError::DecompressionFailed(_) => ErrorCode::Decompression,
            DecodeError::MalformedRecord(_) => ErrorCode::MalformedRecord,
            DecodeError::UnsupportedVersion { .. } | DecodeError::VersionMismatch { .. } => {
                ErrorCode::UnsupportedVersion
            }
        }
    }
}

/// Error during encoding.
///
/// Policy drops (blocked optimizations, truncation) are not errors; they are
/// counted on [`EncodeOutput`](crate::codec::EncodeOutput).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("record serialization failed: {0}")]
    SerializationFailed(String),

    #[error("zstd compression failed: {0}")]
    CompressionFailed(String),
}

/// A raw string that names no known value of a field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {field} value {raw:?}")]
pub struct InvalidValue {
    pub field: Field,
    pub raw: String,
}

/// Error while building or comparing ID registries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("{field} registry maps {value} twice")]
    DuplicateValue { field: Field, value: &'static str },

    #[error("{field} registry assigns id {id} to both {first} and {second}")]
    DuplicateId {
        field: Field,
        id: u32,
        first: &'static str,
        second: &'static str,
    },

    #[error("{field} value {value} moved from id {old} to id {new}")]
    Reassigned {
        field: Field,
        value: &'static str,
        old: u32,
        new: u32,
    },

    #[error("{field} id {id} was {old} and is now reused for {new}")]
    Reused {
        field: Field,
        id: u32,
        old: &'static str,
        new: &'static str,
    },

    #[error(transparent)]
    InvalidValue(#[from] InvalidValue),

    #[error("registry snapshot is not valid JSON: {0}")]
    Snapshot(String),
}
