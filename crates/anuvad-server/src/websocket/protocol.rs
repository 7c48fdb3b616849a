//! Wire protocol.
//!
//! Inbound: a JSON object with a `text` string. Extra fields are ignored.
//!
//! Outbound, exactly one of:
//! - `{"original": "...", "translated": "..."}`
//! - `{"error": "..."}`

use serde::Serialize;
use serde_json::Value;

/// A decoded inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Non-empty text to translate.
    Translate(String),
    /// `text` absent, null or `""`. Dropped without a reply.
    Empty,
}

/// Why an inbound payload could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Not valid JSON (or not valid UTF-8).
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Valid JSON, but not an object.
    #[error("payload is a JSON {0}, expected an object")]
    NotAnObject(&'static str),
    /// `text` is present with a non-string value.
    #[error("'text' must be a string, got {0}")]
    TextNotString(&'static str),
}

/// Decode one inbound payload.
pub fn decode_inbound(raw: &[u8]) -> Result<Inbound, DecodeError> {
    let value: Value = serde_json::from_slice(raw)?;
    let mut map = match value {
        Value::Object(map) => map,
        other => return Err(DecodeError::NotAnObject(json_type(&other))),
    };
    match map.remove("text") {
        None | Some(Value::Null) => Ok(Inbound::Empty),
        Some(Value::String(text)) if text.is_empty() => Ok(Inbound::Empty),
        Some(Value::String(text)) => Ok(Inbound::Translate(text)),
        Some(other) => Err(DecodeError::TextNotString(json_type(&other))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A reply sent back on the session's connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutboundMessage {
    /// Successful translation.
    Translation {
        /// The text as received.
        original: String,
        /// The provider's translation.
        translated: String,
    },
    /// The translation call failed.
    Error {
        /// Human-readable cause.
        error: String,
    },
}

impl OutboundMessage {
    /// Success reply.
    pub fn translation(original: impl Into<String>, translated: impl Into<String>) -> Self {
        Self::Translation {
            original: original.into(),
            translated: translated.into(),
        }
    }

    /// Failure reply carrying `cause`'s message.
    pub fn failure(cause: &impl std::fmt::Display) -> Self {
        Self::Error {
            error: format!("Translation failed: {cause}"),
        }
    }
}
