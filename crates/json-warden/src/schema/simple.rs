//! Type-only nodes.

use serde_json::Value;

use crate::schema::SchemaKind;
use crate::validation::ValidationError;

pub(crate) fn validate_boolean(value: &Value) -> Result<(), ValidationError> {
    if value.is_boolean() {
        return Ok(());
    }
    Err(ValidationError::type_mismatch(SchemaKind::Boolean, "boolean", value))
}

pub(crate) fn validate_null(value: &Value) -> Result<(), ValidationError> {
    if value.is_null() {
        return Ok(());
    }
    Err(ValidationError::type_mismatch(SchemaKind::Null, "null", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_boolean() {
        assert!(validate_boolean(&json!(true)).is_ok());
        let err = validate_boolean(&json!("true")).unwrap_err();
        assert_eq!(err.message(), "expected type: boolean, found: string");
        assert_eq!(err.kind(), SchemaKind::Boolean);
    }

    #[test]
    fn test_null() {
        assert!(validate_null(&json!(null)).is_ok());
        assert!(validate_null(&json!(0)).is_err());
        assert!(validate_null(&json!(false)).is_err());
    }
}
