//! The boundary conversion step between raw external values and storage
//! scalars. Catalog rows arrive as untyped JSON cells (a numeric id column
//! may parse as a number in one export and a string in the next); nothing
//! but plain `f64` / `String` / `None` may reach the store, and every
//! coercion happens here.

use serde_json::Value;

/// Coerce a raw cell to text. Numbers and booleans are rendered; blank
/// strings and nulls become `None`.
#[must_use]
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Coerce a raw cell to a finite number. Numeric strings are parsed;
/// anything else becomes `None`.
#[must_use]
pub fn scalar_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Trim free-text input from the form; whitespace-only values become `None`.
#[must_use]
pub fn optional_text(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_text_coercions() {
        assert_eq!(scalar_text(&json!("  IM-001  ")), Some("IM-001".into()));
        assert_eq!(scalar_text(&json!(42)), Some("42".into()));
        assert_eq!(scalar_text(&json!(4.5)), Some("4.5".into()));
        assert_eq!(scalar_text(&json!("   ")), None);
        assert_eq!(scalar_text(&Value::Null), None);
        assert_eq!(scalar_text(&json!(["list"])), None);
    }

    #[test]
    fn test_scalar_number_coercions() {
        assert_eq!(scalar_number(&json!(47.1)), Some(47.1));
        assert_eq!(scalar_number(&json!("47.1")), Some(47.1));
        assert_eq!(scalar_number(&json!(" 12 ")), Some(12.0));
        assert_eq!(scalar_number(&json!("six")), None);
        assert_eq!(scalar_number(&Value::Null), None);
        assert_eq!(scalar_number(&json!("NaN")), None);
    }

    #[test]
    fn test_optional_text_drops_blank_input() {
        assert_eq!(optional_text(Some("  JSW  ".into())), Some("JSW".into()));
        assert_eq!(optional_text(Some("   ".into())), None);
        assert_eq!(optional_text(None), None);
    }
}
