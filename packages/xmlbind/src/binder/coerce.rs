//! Built-in leaf coercions.
//!
//! Only text, `i32`, `i64` and `bool` are built in. Every other leaf type
//! goes through the policy's `parse_leaf` hook.

use crate::schema::{Value, ValueType};

/// Coerce trimmed leaf text into a built-in type.
///
/// Returns `None` when `value_type` has no built-in rule, and `Some(Err)`
/// with the parser's reason when the text does not parse. Integers use
/// locale-independent decimal parsing (an optional leading `+` or `-`, no
/// separators) and never truncate out-of-range input. Booleans accept
/// exactly `true` and `false`.
///
/// # Examples
/// ```
/// use xmlbind::binder::coerce_builtin;
/// use xmlbind::schema::ValueType;
///
/// assert!(matches!(coerce_builtin(&ValueType::Int, "42"), Some(Ok(_))));
/// assert!(matches!(coerce_builtin(&ValueType::Bool, "True"), Some(Err(_))));
/// assert!(coerce_builtin(&ValueType::Custom("date"), "2025-01-01").is_none());
/// ```
#[must_use]
pub fn coerce_builtin(value_type: &ValueType, text: &str) -> Option<Result<Value, String>> {
    let coerced = match value_type {
        ValueType::Text => Ok(Value::Text(text.to_string())),
        ValueType::Int => text.parse::<i32>().map(Value::Int).map_err(|e| e.to_string()),
        ValueType::Long => text.parse::<i64>().map(Value::Long).map_err(|e| e.to_string()),
        ValueType::Bool => text.parse::<bool>().map(Value::Bool).map_err(|e| e.to_string()),
        ValueType::Custom(_) | ValueType::Composite(_) => return None,
    };
    Some(coerced)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(text: &str) -> Result<i32, String> {
        match coerce_builtin(&ValueType::Int, text) {
            Some(Ok(Value::Int(n))) => Ok(n),
            Some(Ok(other)) => Err(format!("unexpected {}", other.kind())),
            Some(Err(reason)) => Err(reason),
            None => Err("no rule".to_string()),
        }
    }

    fn long(text: &str) -> Result<i64, String> {
        match coerce_builtin(&ValueType::Long, text) {
            Some(Ok(Value::Long(n))) => Ok(n),
            Some(Ok(other)) => Err(format!("unexpected {}", other.kind())),
            Some(Err(reason)) => Err(reason),
            None => Err("no rule".to_string()),
        }
    }

    fn boolean(text: &str) -> Result<bool, String> {
        match coerce_builtin(&ValueType::Bool, text) {
            Some(Ok(Value::Bool(b))) => Ok(b),
            Some(Ok(other)) => Err(format!("unexpected {}", other.kind())),
            Some(Err(reason)) => Err(reason),
            None => Err("no rule".to_string()),
        }
    }

    #[test]
    fn test_text_is_identity() {
        match coerce_builtin(&ValueType::Text, "Europe/Amsterdam") {
            Some(Ok(Value::Text(text))) => assert_eq!(text, "Europe/Amsterdam"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_int_decimal() {
        assert_eq!(int("0"), Ok(0));
        assert_eq!(int("-17"), Ok(-17));
        assert_eq!(int("+17"), Ok(17));
        assert_eq!(int("2147483647"), Ok(i32::MAX));
        assert_eq!(int("-2147483648"), Ok(i32::MIN));
    }

    #[test]
    fn test_int_out_of_range_fails() {
        assert!(int("2147483648").is_err());
        assert!(int("-2147483649").is_err());
    }

    #[test]
    fn test_int_rejects_non_decimal() {
        assert!(int("").is_err());
        assert!(int("0x10").is_err());
        assert!(int("1_000").is_err());
        assert!(int("1,000").is_err());
        assert!(int("1.0").is_err());
    }

    #[test]
    fn test_long_range() {
        assert_eq!(long("9223372036854775807"), Ok(i64::MAX));
        assert_eq!(long("2147483648"), Ok(2_147_483_648));
        assert!(long("9223372036854775808").is_err());
    }

    #[test]
    fn test_boolean_accepted_spellings() {
        assert_eq!(boolean("true"), Ok(true));
        assert_eq!(boolean("false"), Ok(false));
    }

    #[test]
    fn test_boolean_rejected_spellings() {
        for text in ["True", "FALSE", "yes", "no", "1", "0", ""] {
            assert!(boolean(text).is_err(), "accepted {text:?}");
        }
    }

    #[test]
    fn test_no_builtin_rule() {
        assert!(coerce_builtin(&ValueType::Custom("double"), "1.5").is_none());
    }
}
