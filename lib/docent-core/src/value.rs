//! Canonical printing of bound parameter values.

use serde_json::Value;

/// Canonical print form of a scalar value.
///
/// Strings print without quotes, numbers and booleans via their `Display`
/// form. Returns `None` for null and composite values, which have no scalar
/// print form.
///
/// # Example
///
/// ```
/// use docent_core::canonical_string;
/// use serde_json::json;
///
/// assert_eq!(canonical_string(&json!("short")), Some("short".to_string()));
/// assert_eq!(canonical_string(&json!(42)), Some("42".to_string()));
/// assert_eq!(canonical_string(&json!([1, 2])), None);
/// ```
#[must_use]
pub fn canonical_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
