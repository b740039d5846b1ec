//! The conventional JSON transform pair.
//!
//! String-only media (browser-style local storage, URL parameters) persist
//! text. [`encode_json`] turns arbitrary values into text before a write and
//! [`decode_json`] turns text back into structured values after a read.

use crate::Value;

/// Decode a raw value read from a text medium.
///
/// Strings are parsed as JSON; a string that is not valid JSON is returned
/// unchanged. Non-string raw values pass through.
pub fn decode_json(raw: Value) -> Value {
    match raw {
        Value::String(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
        other => other,
    }
}

/// Encode a value for a text medium.
///
/// Strings pass through unchanged; everything else is JSON-encoded.
pub fn encode_json(value: Value) -> Value {
    match value {
        Value::String(_) => value,
        other => Value::String(other.to_string()),
    }
}
