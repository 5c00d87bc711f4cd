use json_warden_util::deep_equal;
use serde_json::Value;

use crate::schema::SchemaKind;
use crate::validation::ValidationError;

/// Accepts exactly the listed values, compared structurally.
#[derive(Debug, Clone, Default)]
pub struct EnumSchema {
    possible_values: Vec<Value>,
}

impl EnumSchema {
    pub fn new(possible_values: Vec<Value>) -> Self {
        Self { possible_values }
    }

    pub fn possible_values(&self) -> &[Value] {
        &self.possible_values
    }

    pub(crate) fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        if self
            .possible_values
            .iter()
            .any(|possible| deep_equal(possible, value))
        {
            return Ok(());
        }
        Err(ValidationError::new(
            SchemaKind::Enum,
            format!("{} is not a valid enum value", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn subject() -> EnumSchema {
        EnumSchema::new(vec![json!(true), json!("foo"), json!([]), json!({"a": 0})])
    }

    #[test]
    fn test_success() {
        let s = subject();
        assert!(s.validate(&json!(true)).is_ok());
        assert!(s.validate(&json!("foo")).is_ok());
        assert!(s.validate(&json!([])).is_ok());
        assert!(s.validate(&json!({"a": 0})).is_ok());
        assert!(s.validate(&json!({"a": 0.0})).is_ok());
    }

    #[test]
    fn test_failure() {
        let err = subject().validate(&json!([1])).unwrap_err();
        assert_eq!(err.message(), "[1] is not a valid enum value");
        assert_eq!(err.kind(), SchemaKind::Enum);
    }
}
