//! Truthiness over [`Value`].
//!
//! A [`MultiStore`](crate::MultiStore) read keeps scanning while stores
//! return falsy values, so an explicitly stored `0`, `""` or `false` is
//! treated the same as a missing key.

use crate::Value;

/// Returns true unless `value` is null, `false`, numeric zero or an empty
/// string. Empty arrays and objects are truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
