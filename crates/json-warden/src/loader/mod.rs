//! Compiles schema documents into [`Schema`] trees.
//!
//! Loading is a recursive descent over the schema JSON. Each schema object is
//! visited with its [`ResolutionScope`] and the [`Document`] it lives in;
//! `$ref` targets are located through [`JsonPointer`], fetched with the
//! configured [`SchemaClient`] when they live in another document, and cached
//! so every position naming the same absolute reference shares one node.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use json_warden_util::type_name;
use serde_json::{Map, Value};
use tracing::debug;

use crate::client::{DefaultSchemaClient, SchemaClient};
use crate::error::SchemaError;
use crate::schema::{
    CombinedSchema, Criterion, EnumSchema, NotSchema, Schema, SchemaMeta, SchemaNode, SchemaRef,
    SchemaTree, Variant,
};

mod builders;
pub mod dispatch;
pub mod pointer;
mod reference;
pub mod scope;

use dispatch::{expect_array, expect_object, expect_str, opt_str, Shape};
pub use pointer::{Document, DocumentCache, JsonPointer, QueryResult};
pub use reference::{extend, without_ref};
pub use scope::ResolutionScope;

/// Loader settings.
#[derive(Clone)]
pub struct LoaderOptions {
    /// Fetches documents named by remote `$ref` values.
    pub client: Arc<dyn SchemaClient>,
    /// Base URI the root document was retrieved from. The root `id`, if any,
    /// is resolved against it, so an absolute root `id` still wins.
    pub resolution_scope: Option<String>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            client: Arc::new(DefaultSchemaClient::new()),
            resolution_scope: None,
        }
    }
}

impl fmt::Debug for LoaderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderOptions")
            .field("client", &"<dyn SchemaClient>")
            .field("resolution_scope", &self.resolution_scope)
            .finish()
    }
}

/// Entry point of schema compilation.
///
/// ```
/// use json_warden::SchemaLoader;
/// use serde_json::json;
///
/// let schema = SchemaLoader::default()
///     .load(&json!({"type": "object", "required": ["id"]}))
///     .unwrap();
/// assert!(schema.is_valid(&json!({"id": 1})));
/// assert!(!schema.is_valid(&json!({})));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaLoader {
    options: LoaderOptions,
}

impl SchemaLoader {
    pub fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Compiles `json`, fetching remote references as needed.
    pub fn load(&self, json: &Value) -> Result<Schema, SchemaError> {
        let Value::Object(root) = json else {
            return Err(SchemaError::NotASchemaObject {
                reference: "#".to_string(),
                found: type_name(json),
            });
        };
        let initial =
            ResolutionScope::new(self.options.resolution_scope.clone().unwrap_or_default());
        let base = initial.enter(root).base().to_string();
        debug!(base = %base, "loading schema");

        let document = Rc::new(Document::new(base.clone(), json.clone()));
        let mut context = LoadContext {
            tree: SchemaTree::new(),
            pointer_schemas: HashMap::new(),
            documents: DocumentCache::new(),
            client: self.options.client.as_ref(),
        };
        if !base.is_empty() {
            context.documents.insert(base, Rc::clone(&document));
        }
        let root_ref = context.load_schema(root, &document, &initial)?;
        context.tree.build(root_ref)
    }
}

/// State shared by every nested load of one [`SchemaLoader::load`] call.
pub(crate) struct LoadContext<'a> {
    tree: SchemaTree,
    /// Absolute reference to its (possibly not yet resolved) node.
    pointer_schemas: HashMap<String, SchemaRef>,
    documents: DocumentCache,
    client: &'a dyn SchemaClient,
}

/// The schema object being compiled.
pub(crate) struct Frame<'a> {
    json: &'a Map<String, Value>,
    /// Document `json` belongs to; target of `#...` references.
    doc: &'a Rc<Document>,
    scope: &'a ResolutionScope,
}

impl LoadContext<'_> {
    fn load_schema(
        &mut self,
        json: &Map<String, Value>,
        doc: &Rc<Document>,
        scope: &ResolutionScope,
    ) -> Result<SchemaRef, SchemaError> {
        let scope = scope.enter(json);
        let frame = Frame {
            json,
            doc,
            scope: &scope,
        };

        let node = if let Some(values) = json.get("enum") {
            let values = expect_array("enum", values)?.to_vec();
            self.tree.insert(EnumSchema::new(values))
        } else if let Some(combined) = self.try_combined(&frame)? {
            combined
        } else if let Some(ty) = json.get("type") {
            self.load_for_type(&frame, ty)?
        } else {
            self.load_without_type(&frame)?
        };
        self.apply_meta(json, node)?;
        Ok(node)
    }

    fn load_child(
        &mut self,
        frame: &Frame<'_>,
        json: &Map<String, Value>,
    ) -> Result<SchemaRef, SchemaError> {
        self.load_schema(json, frame.doc, frame.scope)
    }

    /// Records `id`, `title` and `description` on a freshly built node.
    /// Reference nodes are shared between positions and stay bare.
    fn apply_meta(
        &mut self,
        json: &Map<String, Value>,
        node: SchemaRef,
    ) -> Result<(), SchemaError> {
        let meta = SchemaMeta {
            id: opt_str(json, "id")?.map(str::to_string),
            title: opt_str(json, "title")?.map(str::to_string),
            description: opt_str(json, "description")?.map(str::to_string),
        };
        if let Some(built) = self.tree.get_mut(node) {
            if !matches!(built.variant, Variant::Reference(_)) {
                built.meta = meta;
            }
        }
        Ok(())
    }

    fn try_combined(&mut self, frame: &Frame<'_>) -> Result<Option<SchemaRef>, SchemaError> {
        let present: Vec<Criterion> = [Criterion::AllOf, Criterion::AnyOf, Criterion::OneOf]
            .into_iter()
            .filter(|criterion| frame.json.contains_key(criterion.keyword()))
            .collect();
        let criterion = match present.as_slice() {
            [] => return Ok(None),
            [criterion] => *criterion,
            _ => return Err(SchemaError::MultipleCombinators(present.len())),
        };
        let keyword = criterion.keyword();
        let definitions = frame
            .json
            .get(keyword)
            .map(|value| expect_array(keyword, value))
            .transpose()?
            .unwrap_or_default();
        let mut subschemas = Vec::with_capacity(definitions.len());
        for definition in definitions {
            let definition = expect_object(keyword, definition)?;
            subschemas.push(self.load_child(frame, definition)?);
        }
        let combined = self.tree.insert(CombinedSchema::new(criterion, subschemas));

        let base = match frame.json.get("type") {
            Some(ty) => Some(self.load_for_type(frame, ty)?),
            None => self.sniff_schema(frame)?,
        };
        Ok(Some(match base {
            Some(base) => self.tree.insert(CombinedSchema::all_of(vec![base, combined])),
            None => combined,
        }))
    }

    fn load_for_type(&mut self, frame: &Frame<'_>, ty: &Value) -> Result<SchemaRef, SchemaError> {
        match Shape::of(ty) {
            Shape::String(name) => self.load_for_explicit_type(frame, name),
            Shape::Array(names) => {
                let mut subschemas = Vec::with_capacity(names.len());
                for name in names {
                    let name = expect_str("type", name)?;
                    subschemas.push(self.load_for_explicit_type(frame, name)?);
                }
                Ok(self.tree.insert(CombinedSchema::any_of(subschemas)))
            }
            _ => Err(SchemaError::wrong_type("type", "string or array", ty)),
        }
    }

    fn load_for_explicit_type(
        &mut self,
        frame: &Frame<'_>,
        name: &str,
    ) -> Result<SchemaRef, SchemaError> {
        match name {
            "string" => self.build_string_schema(frame, true),
            "integer" => self.build_number_schema(frame, true, true),
            "number" => self.build_number_schema(frame, true, false),
            "boolean" => Ok(self.tree.insert(SchemaNode::boolean())),
            "null" => Ok(self.tree.insert(SchemaNode::null())),
            "array" => self.build_array_schema(frame, true),
            "object" => self.build_object_schema(frame, true),
            other => Err(SchemaError::UnknownType(other.to_string())),
        }
    }

    fn load_without_type(&mut self, frame: &Frame<'_>) -> Result<SchemaRef, SchemaError> {
        if frame.json.is_empty() {
            return Ok(self.tree.insert(SchemaNode::empty()));
        }
        if let Some(reference) = frame.json.get("$ref") {
            let reference = expect_str("$ref", reference)?;
            return self.lookup_reference(frame, reference);
        }
        if let Some(sniffed) = self.sniff_schema(frame)? {
            return Ok(sniffed);
        }
        if let Some(not) = frame.json.get("not") {
            let not = expect_object("not", not)?;
            let must_not_match = self.load_child(frame, not)?;
            return Ok(self.tree.insert(NotSchema::new(must_not_match)));
        }
        Ok(self.tree.insert(SchemaNode::empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaKind;
    use serde_json::json;

    fn load(json: Value) -> Schema {
        SchemaLoader::default().load(&json).unwrap()
    }

    fn root_kind(schema: &Schema) -> SchemaKind {
        schema.node(schema.root()).kind()
    }

    #[test]
    fn test_empty_object_is_empty_schema() {
        let schema = load(json!({}));
        assert_eq!(root_kind(&schema), SchemaKind::Empty);
        assert!(schema.is_valid(&json!("anything")));
    }

    #[test]
    fn test_unknown_keywords_are_empty_schema() {
        let schema = load(json!({"$schema": "http://json-schema.org/draft-04/schema#"}));
        assert_eq!(root_kind(&schema), SchemaKind::Empty);
    }

    #[test]
    fn test_root_must_be_object() {
        let err = SchemaLoader::default().load(&json!([1])).unwrap_err();
        assert!(matches!(err, SchemaError::NotASchemaObject { found: "array", .. }));
    }

    #[test]
    fn test_enum_wins_over_type() {
        let schema = load(json!({"type": "string", "enum": [1, "a"]}));
        assert_eq!(root_kind(&schema), SchemaKind::Enum);
        assert!(schema.is_valid(&json!(1)));
        assert!(!schema.is_valid(&json!("b")));
    }

    #[test]
    fn test_meta_is_recorded() {
        let schema = load(json!({
            "type": "null",
            "title": "t",
            "description": "d",
            "id": "x.json"
        }));
        let meta = &schema.node(schema.root()).meta;
        assert_eq!(meta.title.as_deref(), Some("t"));
        assert_eq!(meta.description.as_deref(), Some("d"));
        assert_eq!(meta.id.as_deref(), Some("x.json"));
    }

    #[test]
    fn test_type_array_is_any_of() {
        let schema = load(json!({"type": ["string", "null"], "maxLength": 2}));
        assert_eq!(root_kind(&schema), SchemaKind::AnyOf);
        assert!(schema.is_valid(&json!(null)));
        assert!(schema.is_valid(&json!("ab")));
        assert!(!schema.is_valid(&json!("abc")));
        assert!(!schema.is_valid(&json!(1)));
    }

    #[test]
    fn test_combined_with_type_is_all_of() {
        let schema = load(json!({"type": "integer", "anyOf": [{"minimum": 10}, {"maximum": 0}]}));
        assert_eq!(root_kind(&schema), SchemaKind::AllOf);
        assert!(schema.is_valid(&json!(11)));
        assert!(schema.is_valid(&json!(-1)));
        assert!(!schema.is_valid(&json!(5)));
        assert!(!schema.is_valid(&json!(11.5)));
    }

    #[test]
    fn test_combined_without_base() {
        let schema = load(json!({"oneOf": [{"type": "string"}, {"type": "null"}]}));
        assert_eq!(root_kind(&schema), SchemaKind::OneOf);
    }

    #[test]
    fn test_not() {
        let schema = load(json!({"not": {"type": "string"}}));
        assert_eq!(root_kind(&schema), SchemaKind::Not);
        assert!(schema.is_valid(&json!(1)));
        let err = schema.validate(&json!("x")).unwrap_err();
        assert_eq!(err.message(), "subject must not be valid against schema");
    }
}
