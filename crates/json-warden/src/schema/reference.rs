use serde_json::Value;

use crate::schema::{Schema, SchemaRef};
use crate::validation::ValidationError;

/// A resolved `$ref`. Validation delegates to the target without adding a
/// pointer segment.
///
/// Reference nodes are created through
/// [`SchemaTree::reserve_reference`](crate::schema::SchemaTree::reserve_reference)
/// and filled in once the target is built.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceSchema {
    target: SchemaRef,
}

impl ReferenceSchema {
    pub(crate) fn new(target: SchemaRef) -> Self {
        Self { target }
    }

    pub fn target(&self) -> SchemaRef {
        self.target
    }

    pub(crate) fn validate(&self, schema: &Schema, value: &Value) -> Result<(), ValidationError> {
        schema.validate_node(self.target, value)
    }
}
