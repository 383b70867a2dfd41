//! Version 1 wire record.
//!
//! Encoding goes through a typed struct whose field declaration order fixes
//! the key order of the JSON output. Decoding goes through a loose mirror
//! that keeps every field as raw JSON, so one bad entry can be skipped
//! instead of failing the whole record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DecodeError;

/// Record as written by the encoder. Keys are emitted in declaration order.
#[derive(Debug, Serialize)]
pub(crate) struct WireRecord<'a> {
    pub v: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub g: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub p: Vec<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub m: Vec<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub o: Vec<u32>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub k: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<u32>,
}

/// Record as read by the decoder.
///
/// Only `v` is required. Unknown keys are ignored so a newer encoder's
/// additions do not break this decoder.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRecord {
    pub v: i64,
    #[serde(default)]
    pub c: Option<Value>,
    #[serde(default)]
    pub g: Option<Value>,
    #[serde(default)]
    pub d: Option<Value>,
    #[serde(default)]
    pub p: Option<Value>,
    #[serde(default)]
    pub m: Option<Value>,
    #[serde(default)]
    pub o: Option<Value>,
    #[serde(default)]
    pub k: Option<Value>,
    #[serde(default)]
    pub r: Option<Value>,
}

/// Parses decompressed bytes into a raw record.
///
/// The top level must be a JSON object carrying an integer `v`.
pub(crate) fn parse_record(bytes: &[u8]) -> Result<RawRecord, DecodeError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| DecodeError::MalformedRecord(e.to_string()))?;
    if !value.is_object() {
        return Err(DecodeError::MalformedRecord(
            "top-level value is not an object".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|e| DecodeError::MalformedRecord(e.to_string()))
}
