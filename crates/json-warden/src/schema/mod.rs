//! Compiled schema nodes and the validation algorithms they own.
//!
//! A [`Schema`] is an arena of [`SchemaNode`]s. Nodes refer to their
//! children through [`SchemaRef`] handles, which lets a `$ref` cycle be
//! expressed as a handle pointing back up the tree without shared ownership.
//! Trees are assembled with [`SchemaTree`], either by the
//! [loader](crate::loader) or by hand.

use serde::Serialize;
use serde_json::Value;

use crate::validation::ValidationError;

pub mod array;
pub mod combined;
pub mod enumeration;
pub mod not;
pub mod number;
pub mod object;
pub mod reference;
pub mod simple;
pub mod string;
pub mod tree;

pub use array::{ArraySchema, ArraySchemaConfig};
pub use combined::{CombinedSchema, Criterion};
pub use enumeration::EnumSchema;
pub use not::NotSchema;
pub use number::{NumberSchema, NumberSchemaConfig};
pub use object::{ObjectSchema, ObjectSchemaConfig};
pub use reference::ReferenceSchema;
pub use string::{StringSchema, StringSchemaConfig};
pub use tree::SchemaTree;

/// Handle of a node inside a [`Schema`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaRef(pub(crate) usize);

impl SchemaRef {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The kind of node, as reported on validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemaKind {
    Empty,
    Boolean,
    Null,
    String,
    Number,
    Array,
    Object,
    Enum,
    Not,
    AllOf,
    AnyOf,
    OneOf,
    Reference,
}

impl SchemaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::String => "string",
            Self::Number => "number",
            Self::Array => "array",
            Self::Object => "object",
            Self::Enum => "enum",
            Self::Not => "not",
            Self::AllOf => "allOf",
            Self::AnyOf => "anyOf",
            Self::OneOf => "oneOf",
            Self::Reference => "reference",
        }
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Annotations shared by every node. `id` is kept for inspection only; it
/// has no effect on validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaMeta {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Validation rule carried by a node.
#[derive(Debug, Clone)]
pub enum Variant {
    Empty,
    Boolean,
    Null,
    String(StringSchema),
    Number(NumberSchema),
    Array(ArraySchema),
    Object(ObjectSchema),
    Enum(EnumSchema),
    Not(NotSchema),
    Combined(CombinedSchema),
    Reference(ReferenceSchema),
}

#[derive(Debug, Clone)]
pub struct SchemaNode {
    pub meta: SchemaMeta,
    pub variant: Variant,
}

impl SchemaNode {
    pub fn new(variant: Variant) -> Self {
        Self {
            meta: SchemaMeta::default(),
            variant,
        }
    }

    /// Always-valid node, compiled from `{}`.
    pub fn empty() -> Self {
        Self::new(Variant::Empty)
    }

    pub fn boolean() -> Self {
        Self::new(Variant::Boolean)
    }

    pub fn null() -> Self {
        Self::new(Variant::Null)
    }

    pub fn with_meta(mut self, meta: SchemaMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn kind(&self) -> SchemaKind {
        match &self.variant {
            Variant::Empty => SchemaKind::Empty,
            Variant::Boolean => SchemaKind::Boolean,
            Variant::Null => SchemaKind::Null,
            Variant::String(_) => SchemaKind::String,
            Variant::Number(_) => SchemaKind::Number,
            Variant::Array(_) => SchemaKind::Array,
            Variant::Object(_) => SchemaKind::Object,
            Variant::Enum(_) => SchemaKind::Enum,
            Variant::Not(_) => SchemaKind::Not,
            Variant::Combined(c) => c.criterion().kind(),
            Variant::Reference(_) => SchemaKind::Reference,
        }
    }

    /// Handles of the direct children of this node.
    pub fn children(&self) -> Vec<SchemaRef> {
        match &self.variant {
            Variant::Empty
            | Variant::Boolean
            | Variant::Null
            | Variant::String(_)
            | Variant::Number(_)
            | Variant::Enum(_) => Vec::new(),
            Variant::Array(a) => a.children(),
            Variant::Object(o) => o.children(),
            Variant::Not(n) => vec![n.must_not_match()],
            Variant::Combined(c) => c.subschemas().to_vec(),
            Variant::Reference(r) => vec![r.target()],
        }
    }

    /// Children that are validated against the same value as this node,
    /// rather than against an array item or object property.
    pub fn same_value_children(&self) -> Vec<SchemaRef> {
        match &self.variant {
            Variant::Not(n) => vec![n.must_not_match()],
            Variant::Combined(c) => c.subschemas().to_vec(),
            Variant::Reference(r) => vec![r.target()],
            Variant::Object(o) => o.schema_dependencies().values().copied().collect(),
            _ => Vec::new(),
        }
    }
}

macro_rules! impl_from_variant {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for SchemaNode {
                fn from(schema: $ty) -> Self {
                    SchemaNode::new(Variant::$variant(schema))
                }
            }
        )*
    };
}

impl_from_variant! {
    StringSchema => String,
    NumberSchema => Number,
    ArraySchema => Array,
    ObjectSchema => Object,
    EnumSchema => Enum,
    NotSchema => Not,
    CombinedSchema => Combined,
    ReferenceSchema => Reference,
}

/// Policy for array items beyond a tuple and for undeclared object
/// properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Additional {
    /// Allowed and unchecked.
    #[default]
    Permitted,
    Forbidden,
    /// Allowed, each validated against the schema.
    Schema(SchemaRef),
}

/// An immutable, fully resolved schema tree.
///
/// `Schema` is `Send + Sync`; one instance can serve any number of
/// concurrent [`validate`](Schema::validate) calls.
#[derive(Debug, Clone)]
pub struct Schema {
    nodes: Vec<SchemaNode>,
    root: SchemaRef,
}

impl Schema {
    pub(crate) fn from_parts(nodes: Vec<SchemaNode>, root: SchemaRef) -> Self {
        Self { nodes, root }
    }

    pub fn root(&self) -> SchemaRef {
        self.root
    }

    pub fn node(&self, node: SchemaRef) -> &SchemaNode {
        &self.nodes[node.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Validates `value` against the root node.
    ///
    /// On failure the returned error is either the single violation found, or
    /// an aggregate at `#` whose causes list every independent violation.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        self.validate_node(self.root, value)
    }

    pub fn is_valid(&self, value: &Value) -> bool {
        self.validate(value).is_ok()
    }

    /// Validates `value` against an arbitrary node of this tree.
    ///
    /// Failures raised by this node itself are tagged with `node`; failures
    /// coming up from children keep the child that raised them.
    pub fn validate_node(&self, node: SchemaRef, value: &Value) -> Result<(), ValidationError> {
        let result = match &self.node(node).variant {
            Variant::Empty => Ok(()),
            Variant::Boolean => simple::validate_boolean(value),
            Variant::Null => simple::validate_null(value),
            Variant::String(s) => s.validate(value),
            Variant::Number(n) => n.validate(value),
            Variant::Array(a) => a.validate(self, value),
            Variant::Object(o) => o.validate(self, value),
            Variant::Enum(e) => e.validate(value),
            Variant::Not(n) => n.validate(self, value),
            Variant::Combined(c) => c.validate(self, value),
            Variant::Reference(r) => r.validate(self, value),
        };
        result.map_err(|err| err.raised_by(node))
    }
}
