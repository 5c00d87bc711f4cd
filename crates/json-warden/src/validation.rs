//! Validation failures.
//!
//! A [`ValidationError`] is created where a rule is violated, with pointer
//! `#`. While it travels back up through array and object nodes the caller
//! rebuilds it with [`prepend`](ValidationError::prepend), so the pointer ends
//! up addressing the offending value from the validation root. Composite
//! nodes gather sibling failures with [`ValidationError::throw_for`].
//! [`Schema::validate_node`](crate::Schema::validate_node) records the node
//! that raised each failure, reachable through [`ValidationError::schema`].

use json_warden_pointer::escape_component;
use json_warden_util::type_name;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::schema::{SchemaKind, SchemaRef};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{pointer}: {message}")]
pub struct ValidationError {
    #[serde(skip)]
    schema: Option<SchemaRef>,
    #[serde(rename = "keyword")]
    kind: SchemaKind,
    pointer: String,
    message: String,
    #[serde(rename = "causingExceptions")]
    causes: Vec<ValidationError>,
}

impl ValidationError {
    /// A leaf failure at `#`.
    pub fn new(kind: SchemaKind, message: impl Into<String>) -> Self {
        Self::with_causes(kind, message, Vec::new())
    }

    /// A failure at `#` explained by `causes`.
    pub fn with_causes(kind: SchemaKind, message: impl Into<String>, causes: Vec<Self>) -> Self {
        Self {
            schema: None,
            kind,
            pointer: "#".to_string(),
            message: message.into(),
            causes,
        }
    }

    /// `expected type: {expected}, found: {actual}`.
    pub fn type_mismatch(kind: SchemaKind, expected: &str, actual: &Value) -> Self {
        Self::new(
            kind,
            format!("expected type: {}, found: {}", expected, type_name(actual)),
        )
    }

    /// Combines the failures of one node.
    ///
    /// No failure is success and a single failure is returned as is. Several
    /// failures are wrapped into one error at `#` listing them as causes.
    pub fn throw_for(kind: SchemaKind, mut failures: Vec<Self>) -> Result<(), Self> {
        match failures.len() {
            0 => Ok(()),
            1 => Err(failures.remove(0)),
            n => Err(Self::with_causes(
                kind,
                format!("{} schema violations found", n),
                failures,
            )),
        }
    }

    /// Returns this failure as seen from the parent value, `segment` being the
    /// array index or object key that leads to the failing value.
    ///
    /// The segment is prepended to this pointer and to every cause's pointer.
    pub fn prepend(self, segment: &str) -> Self {
        let escaped = escape_component(segment);
        self.prepend_escaped(&escaped)
    }

    fn prepend_escaped(self, escaped: &str) -> Self {
        let rest = self.pointer.strip_prefix('#').unwrap_or(&self.pointer);
        let pointer = format!("#/{}{}", escaped, rest);
        Self {
            schema: self.schema,
            kind: self.kind,
            pointer,
            message: self.message,
            causes: self
                .causes
                .into_iter()
                .map(|cause| cause.prepend_escaped(escaped))
                .collect(),
        }
    }

    /// Records `node` as the raiser unless one is already set, so a failure
    /// passed up through a reference keeps the node that produced it.
    pub(crate) fn raised_by(mut self, node: SchemaRef) -> Self {
        self.schema.get_or_insert(node);
        self
    }

    /// The node that raised this failure, when produced by
    /// [`Schema::validate`](crate::Schema::validate).
    pub fn schema(&self) -> Option<SchemaRef> {
        self.schema
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    /// Name of the raising node's kind, as serialized under `keyword`.
    pub fn keyword(&self) -> &'static str {
        self.kind.as_str()
    }

    /// JSON Pointer (URI fragment form) of the violating value.
    pub fn pointer(&self) -> &str {
        &self.pointer
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn causes(&self) -> &[ValidationError] {
        &self.causes
    }

    /// Number of leaf violations in this tree.
    pub fn violation_count(&self) -> usize {
        if self.causes.is_empty() {
            return 1;
        }
        self.causes.iter().map(Self::violation_count).sum()
    }

    /// Messages of all leaf violations, in order, as `"{pointer}: {message}"`.
    pub fn all_messages(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_messages(&mut out);
        out
    }

    fn collect_messages(&self, out: &mut Vec<String>) {
        if self.causes.is_empty() {
            out.push(self.to_string());
            return;
        }
        for cause in &self.causes {
            cause.collect_messages(out);
        }
    }

    /// The error tree as `{pointer, message, keyword, causingExceptions}`.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_throw_for_zero_one_many() {
        assert!(ValidationError::throw_for(SchemaKind::Array, vec![]).is_ok());

        let single = ValidationError::new(SchemaKind::Null, "x");
        assert_eq!(
            ValidationError::throw_for(SchemaKind::Array, vec![single.clone()]),
            Err(single)
        );

        let many = ValidationError::throw_for(
            SchemaKind::Array,
            vec![
                ValidationError::new(SchemaKind::Null, "a"),
                ValidationError::new(SchemaKind::Null, "b"),
            ],
        )
        .unwrap_err();
        assert_eq!(many.pointer(), "#");
        assert_eq!(many.message(), "2 schema violations found");
        assert_eq!(many.kind(), SchemaKind::Array);
        assert_eq!(many.causes().len(), 2);
    }

    #[test]
    fn test_prepend_rewrites_causes_too() {
        let err = ValidationError::with_causes(
            SchemaKind::Object,
            "2 schema violations found",
            vec![
                ValidationError::new(SchemaKind::Number, "a").prepend("a"),
                ValidationError::new(SchemaKind::Number, "b").prepend("b"),
            ],
        )
        .prepend("rectangle");

        assert_eq!(err.pointer(), "#/rectangle");
        assert_eq!(err.causes()[0].pointer(), "#/rectangle/a");
        assert_eq!(err.causes()[1].pointer(), "#/rectangle/b");
    }

    #[test]
    fn test_prepend_escapes_keys() {
        let err = ValidationError::new(SchemaKind::String, "x")
            .prepend("0")
            .prepend("a/b~c");
        assert_eq!(err.pointer(), "#/a~1b~0c/0");
    }

    #[test]
    fn test_all_messages_and_count() {
        let err = ValidationError::with_causes(
            SchemaKind::AnyOf,
            "no subschema matched out of the total 2 subschemas",
            vec![
                ValidationError::new(SchemaKind::String, "first").prepend("x"),
                ValidationError::with_causes(
                    SchemaKind::Object,
                    "2 schema violations found",
                    vec![
                        ValidationError::new(SchemaKind::Null, "second"),
                        ValidationError::new(SchemaKind::Null, "third"),
                    ],
                ),
            ],
        );
        assert_eq!(err.violation_count(), 3);
        assert_eq!(
            err.all_messages(),
            vec!["#/x: first", "#: second", "#: third"]
        );
    }

    #[test]
    fn test_to_json_shape() {
        let err = ValidationError::with_causes(
            SchemaKind::Array,
            "2 schema violations found",
            vec![
                ValidationError::new(SchemaKind::Boolean, "expected type: boolean, found: integer")
                    .prepend("0"),
                ValidationError::new(SchemaKind::Array, "array items are not unique"),
            ],
        );
        assert_eq!(
            err.to_json(),
            json!({
                "keyword": "array",
                "pointer": "#",
                "message": "2 schema violations found",
                "causingExceptions": [
                    {
                        "keyword": "boolean",
                        "pointer": "#/0",
                        "message": "expected type: boolean, found: integer",
                        "causingExceptions": []
                    },
                    {
                        "keyword": "array",
                        "pointer": "#",
                        "message": "array items are not unique",
                        "causingExceptions": []
                    }
                ]
            })
        );
    }

    #[test]
    fn test_raiser_survives_prepend_and_is_not_overwritten() {
        let err = ValidationError::new(SchemaKind::Null, "x")
            .raised_by(SchemaRef(3))
            .raised_by(SchemaRef(1))
            .prepend("a");
        assert_eq!(err.schema(), Some(SchemaRef(3)));
        assert_eq!(ValidationError::new(SchemaKind::Null, "x").schema(), None);
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = ValidationError::type_mismatch(SchemaKind::String, "string", &json!(3));
        assert_eq!(err.to_string(), "#: expected type: string, found: integer");
    }
}
