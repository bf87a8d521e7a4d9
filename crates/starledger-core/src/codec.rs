//! Payload codec: structured data in, opaque transport text out.
//!
//! Payloads are serialized to JSON and stored as lowercase hex. Decoding
//! reverses both steps and is byte-exact: `decode(encode(x)) == x`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::CoreError;

/// The opaque, hex-encoded form of a block payload.
///
/// The ledger never interprets this value except to decode it for
/// presentation, and hashes it as-is.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedPayload(String);

impl EncodedPayload {
    /// Wrap raw encoded text without checking it.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The encoded text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the JSON document this payload decodes to.
    pub fn decoded_len(&self) -> usize {
        self.0.len() / 2
    }
}

impl fmt::Debug for EncodedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head: String = self.0.chars().take(32).collect();
        if head.len() < self.0.len() {
            write!(f, "EncodedPayload({head}...)")
        } else {
            write!(f, "EncodedPayload({head})")
        }
    }
}

/// Encode a serializable value into its opaque form.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<EncodedPayload, CoreError> {
    let json = serde_json::to_vec(value).map_err(|e| CoreError::Encoding(e.to_string()))?;
    Ok(EncodedPayload(hex::encode(json)))
}

/// Decode an opaque payload into a typed value.
pub fn decode<T: DeserializeOwned>(payload: &EncodedPayload) -> Result<T, CoreError> {
    let json = hex::decode(payload.as_str())
        .map_err(|e| CoreError::Decode(format!("payload is not hex: {e}")))?;
    serde_json::from_slice(&json)
        .map_err(|e| CoreError::Decode(format!("payload is not valid JSON: {e}")))
}

/// Decode an opaque payload into an untyped JSON value.
pub fn decode_value(payload: &EncodedPayload) -> Result<Value, CoreError> {
    decode(payload)
}
