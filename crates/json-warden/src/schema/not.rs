use serde_json::Value;

use crate::schema::{Schema, SchemaKind, SchemaRef};
use crate::validation::ValidationError;

/// Succeeds exactly when the inner schema fails.
#[derive(Debug, Clone, Copy)]
pub struct NotSchema {
    must_not_match: SchemaRef,
}

impl NotSchema {
    pub fn new(must_not_match: SchemaRef) -> Self {
        Self { must_not_match }
    }

    pub fn must_not_match(&self) -> SchemaRef {
        self.must_not_match
    }

    pub(crate) fn validate(&self, schema: &Schema, value: &Value) -> Result<(), ValidationError> {
        if schema.validate_node(self.must_not_match, value).is_err() {
            return Ok(());
        }
        Err(ValidationError::new(
            SchemaKind::Not,
            "subject must not be valid against schema",
        ))
    }
}
