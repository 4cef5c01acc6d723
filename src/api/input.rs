//! JSON input coercion shared by the create handlers
//!
//! The create endpoints accept loosely-typed bodies: names may arrive as
//! strings or bare numbers, scores as integers, floats, or numeric
//! strings. "Key absent" and "value malformed" are different contract
//! errors, so handlers take `serde_json::Value` and check fields here
//! instead of using a typed extractor.

use serde_json::Value;

/// Coerce a JSON value into a non-empty trimmed name.
///
/// Strings are trimmed; bare numbers are accepted and stringified.
/// Anything else (null, arrays, objects) counts as blank.
pub fn coerce_name(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Coerce a JSON value into an integer score.
///
/// Integers pass through, floats truncate, strings must parse as
/// integers. `None` means the strict create paths reject the request.
pub fn coerce_score(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_name_trims() {
        assert_eq!(coerce_name(&json!("  철수  ")), Some("철수".to_string()));
        assert_eq!(coerce_name(&json!("")), None);
        assert_eq!(coerce_name(&json!("   ")), None);
    }

    #[test]
    fn test_coerce_name_accepts_numbers() {
        assert_eq!(coerce_name(&json!(42)), Some("42".to_string()));
    }

    #[test]
    fn test_coerce_name_rejects_null_and_composites() {
        assert_eq!(coerce_name(&json!(null)), None);
        assert_eq!(coerce_name(&json!(["a"])), None);
        assert_eq!(coerce_name(&json!({"a": 1})), None);
    }

    #[test]
    fn test_coerce_score_integer_forms() {
        assert_eq!(coerce_score(&json!(25000)), Some(25000));
        assert_eq!(coerce_score(&json!(-1500)), Some(-1500));
        assert_eq!(coerce_score(&json!("25000")), Some(25000));
        assert_eq!(coerce_score(&json!(" 25000 ")), Some(25000));
    }

    #[test]
    fn test_coerce_score_float_truncates() {
        assert_eq!(coerce_score(&json!(25000.9)), Some(25000));
    }

    #[test]
    fn test_coerce_score_rejects_garbage() {
        assert_eq!(coerce_score(&json!("25000.5")), None);
        assert_eq!(coerce_score(&json!("abc")), None);
        assert_eq!(coerce_score(&json!(null)), None);
        assert_eq!(coerce_score(&json!([])), None);
    }
}
