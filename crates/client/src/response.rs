//! Interpreting the backend's response envelope.
//!
//! The backend reports outcomes in-band: a payload with a truthy `success`
//! field signals success, and login success additionally carries a `token`.
//! Truthiness follows the backend's own (JavaScript) rules, not strict
//! booleans.

use serde_json::Value;

/// Whether a field value is truthy: absent, `null`, `false`, `0`, and `""`
/// are falsy; everything else (including `{}` and `[]`) is truthy.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Whether `payload.success` signals success.
pub fn is_success(payload: &Value) -> bool {
    is_truthy(payload.get("success"))
}

/// The bearer token carried by a login payload, if any.
pub(crate) fn login_token(payload: &Value) -> Option<&str> {
    match payload.get("token") {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// The id the backend assigned to a freshly created product, if reported.
pub(crate) fn assigned_id(payload: &Value) -> Option<&str> {
    match payload.get("id") {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}
