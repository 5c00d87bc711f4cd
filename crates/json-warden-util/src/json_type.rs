//! Naming of JSON value kinds, as used in diagnostics.

use serde_json::Value;

/// The kind of a JSON value, with integers distinguished from other numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl JsonType {
    /// Classifies `value`.
    ///
    /// A number is an `Integer` when it is stored as an integer or is a float
    /// without fractional part.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    Self::Integer
                } else if n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0) {
                    Self::Integer
                } else {
                    Self::Number
                }
            }
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl std::fmt::Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the JSON Schema type name of `value`.
///
/// # Example
///
/// ```
/// use json_warden_util::type_name;
/// use serde_json::json;
///
/// assert_eq!(type_name(&json!(1)), "integer");
/// assert_eq!(type_name(&json!(1.5)), "number");
/// assert_eq!(type_name(&json!({})), "object");
/// ```
pub fn type_name(value: &Value) -> &'static str {
    JsonType::of(value).as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kinds() {
        assert_eq!(JsonType::of(&json!(null)), JsonType::Null);
        assert_eq!(JsonType::of(&json!(false)), JsonType::Boolean);
        assert_eq!(JsonType::of(&json!(-3)), JsonType::Integer);
        assert_eq!(JsonType::of(&json!(2.0)), JsonType::Integer);
        assert_eq!(JsonType::of(&json!(0.25)), JsonType::Number);
        assert_eq!(JsonType::of(&json!("x")), JsonType::String);
        assert_eq!(JsonType::of(&json!([1])), JsonType::Array);
        assert_eq!(JsonType::of(&json!({"a": 1})), JsonType::Object);
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(JsonType::Array.to_string(), "array");
    }
}
