use json_warden_util::deep_equal;
use serde_json::Value;

use crate::error::SchemaError;
use crate::schema::{Additional, Schema, SchemaKind, SchemaRef};
use crate::validation::ValidationError;

/// Array validator settings, mirroring the array keywords.
///
/// `all_item_schema` (list validation) and `item_schemas` (tuple
/// validation) exclude each other.
#[derive(Debug, Clone)]
pub struct ArraySchemaConfig {
    /// When false, non-array values pass unchecked.
    pub requires_array: bool,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub unique_items: bool,
    pub all_item_schema: Option<SchemaRef>,
    pub item_schemas: Option<Vec<SchemaRef>>,
    pub additional_items: bool,
    pub schema_of_additional_items: Option<SchemaRef>,
}

impl Default for ArraySchemaConfig {
    fn default() -> Self {
        Self {
            requires_array: true,
            min_items: None,
            max_items: None,
            unique_items: false,
            all_item_schema: None,
            item_schemas: None,
            additional_items: true,
            schema_of_additional_items: None,
        }
    }
}

#[derive(Debug, Clone)]
enum Items {
    Unconstrained,
    List(SchemaRef),
    Tuple {
        schemas: Vec<SchemaRef>,
        additional: Additional,
    },
}

#[derive(Debug, Clone)]
pub struct ArraySchema {
    requires_array: bool,
    min_items: Option<u64>,
    max_items: Option<u64>,
    unique_items: bool,
    items: Items,
    permits_additional_items: bool,
}

impl ArraySchema {
    /// # Errors
    ///
    /// `SchemaError::TupleAndListItems` if both `all_item_schema` and
    /// `item_schemas` are set.
    pub fn new(config: ArraySchemaConfig) -> Result<Self, SchemaError> {
        let permits_additional_items = if config.all_item_schema.is_some() {
            true
        } else {
            config.schema_of_additional_items.is_some() || config.additional_items
        };
        let items = match (config.all_item_schema, config.item_schemas) {
            (Some(_), Some(_)) => return Err(SchemaError::TupleAndListItems),
            (Some(all), None) => Items::List(all),
            (None, Some(schemas)) => {
                let additional = match config.schema_of_additional_items {
                    Some(schema) => Additional::Schema(schema),
                    None if permits_additional_items => Additional::Permitted,
                    None => Additional::Forbidden,
                };
                Items::Tuple {
                    schemas,
                    additional,
                }
            }
            (None, None) => Items::Unconstrained,
        };
        Ok(Self {
            requires_array: config.requires_array,
            min_items: config.min_items,
            max_items: config.max_items,
            unique_items: config.unique_items,
            items,
            permits_additional_items,
        })
    }

    pub fn requires_array(&self) -> bool {
        self.requires_array
    }

    pub fn min_items(&self) -> Option<u64> {
        self.min_items
    }

    pub fn max_items(&self) -> Option<u64> {
        self.max_items
    }

    pub fn needs_unique_items(&self) -> bool {
        self.unique_items
    }

    pub fn permits_additional_items(&self) -> bool {
        self.permits_additional_items
    }

    pub fn all_item_schema(&self) -> Option<SchemaRef> {
        match self.items {
            Items::List(schema) => Some(schema),
            _ => None,
        }
    }

    pub fn item_schemas(&self) -> Option<&[SchemaRef]> {
        match &self.items {
            Items::Tuple { schemas, .. } => Some(schemas),
            _ => None,
        }
    }

    pub fn schema_of_additional_items(&self) -> Option<SchemaRef> {
        match self.items {
            Items::Tuple {
                additional: Additional::Schema(schema),
                ..
            } => Some(schema),
            _ => None,
        }
    }

    pub(crate) fn children(&self) -> Vec<SchemaRef> {
        match &self.items {
            Items::Unconstrained => Vec::new(),
            Items::List(schema) => vec![*schema],
            Items::Tuple {
                schemas,
                additional,
            } => {
                let mut out = schemas.clone();
                if let Additional::Schema(schema) = additional {
                    out.push(*schema);
                }
                out
            }
        }
    }

    pub(crate) fn validate(&self, schema: &Schema, value: &Value) -> Result<(), ValidationError> {
        let Some(items) = value.as_array() else {
            if self.requires_array {
                return Err(ValidationError::type_mismatch(SchemaKind::Array, "array", value));
            }
            return Ok(());
        };
        let mut failures = Vec::new();
        if let Some(failure) = self.test_item_count(items) {
            failures.push(failure);
        }
        if self.unique_items {
            if let Some(failure) = test_uniqueness(items) {
                failures.push(failure);
            }
        }
        self.test_items(schema, items, &mut failures);
        ValidationError::throw_for(SchemaKind::Array, failures)
    }

    fn test_item_count(&self, items: &[Value]) -> Option<ValidationError> {
        let actual = items.len() as u64;
        if let Some(min) = self.min_items {
            if actual < min {
                return Some(ValidationError::new(
                    SchemaKind::Array,
                    format!("expected minimum item count: {}, found: {}", min, actual),
                ));
            }
        }
        if let Some(max) = self.max_items {
            if actual > max {
                return Some(ValidationError::new(
                    SchemaKind::Array,
                    format!("expected maximum item count: {}, found: {}", max, actual),
                ));
            }
        }
        None
    }

    fn test_items(&self, schema: &Schema, items: &[Value], failures: &mut Vec<ValidationError>) {
        match &self.items {
            Items::Unconstrained => {}
            Items::List(item_schema) => {
                validate_range(schema, *item_schema, items, 0, failures);
            }
            Items::Tuple {
                schemas,
                additional,
            } => {
                if *additional == Additional::Forbidden && items.len() > schemas.len() {
                    failures.push(ValidationError::new(
                        SchemaKind::Array,
                        format!(
                            "expected: [{}] array items, found: [{}]",
                            schemas.len(),
                            items.len()
                        ),
                    ));
                }
                for (index, (item_schema, item)) in schemas.iter().zip(items).enumerate() {
                    if let Err(failure) = schema.validate_node(*item_schema, item) {
                        failures.push(failure.prepend(&index.to_string()));
                    }
                }
                if let Additional::Schema(additional_schema) = additional {
                    let rest = items.get(schemas.len()..).unwrap_or_default();
                    validate_range(schema, *additional_schema, rest, schemas.len(), failures);
                }
            }
        }
    }
}

/// Validates every item of `items` against `item_schema`; `offset` is the
/// array index of `items[0]`.
fn validate_range(
    schema: &Schema,
    item_schema: SchemaRef,
    items: &[Value],
    offset: usize,
    failures: &mut Vec<ValidationError>,
) {
    for (index, item) in items.iter().enumerate() {
        if let Err(failure) = schema.validate_node(item_schema, item) {
            failures.push(failure.prepend(&(offset + index).to_string()));
        }
    }
}

fn test_uniqueness(items: &[Value]) -> Option<ValidationError> {
    for (i, item) in items.iter().enumerate() {
        if items[..i].iter().any(|seen| deep_equal(seen, item)) {
            return Some(ValidationError::new(
                SchemaKind::Array,
                "array items are not unique",
            ));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SchemaNode, SchemaTree};
    use serde_json::json;

    fn build(config: impl FnOnce(&mut SchemaTree) -> ArraySchemaConfig) -> Schema {
        let mut tree = SchemaTree::new();
        let config = config(&mut tree);
        let root = tree.insert(ArraySchema::new(config).unwrap());
        tree.build(root).unwrap()
    }

    #[test]
    fn test_type_failure() {
        let schema = build(|_| ArraySchemaConfig::default());
        let err = schema.validate(&json!(true)).unwrap_err();
        assert_eq!(err.message(), "expected type: array, found: boolean");
    }

    #[test]
    fn test_does_not_require_explicit_array() {
        let schema = build(|_| ArraySchemaConfig {
            requires_array: false,
            unique_items: true,
            ..Default::default()
        });
        assert!(schema.validate(&json!("[1, 1]")).is_ok());
    }

    #[test]
    fn test_no_item_schema() {
        let schema = build(|_| ArraySchemaConfig::default());
        assert!(schema.validate(&json!([1, "a", null, {}])).is_ok());
    }

    #[test]
    fn test_min_and_max_items() {
        let schema = build(|_| ArraySchemaConfig {
            min_items: Some(2),
            ..Default::default()
        });
        let err = schema.validate(&json!([1])).unwrap_err();
        assert_eq!(err.pointer(), "#");
        assert_eq!(err.message(), "expected minimum item count: 2, found: 1");

        let schema = build(|_| ArraySchemaConfig {
            min_items: Some(0),
            max_items: Some(0),
            ..Default::default()
        });
        let err = schema.validate(&json!([1])).unwrap_err();
        assert_eq!(err.message(), "expected maximum item count: 0, found: 1");
    }

    #[test]
    fn test_list_items() {
        let schema = build(|tree| ArraySchemaConfig {
            all_item_schema: Some(tree.insert(SchemaNode::boolean())),
            ..Default::default()
        });
        let err = schema.validate(&json!([true, false, "false"])).unwrap_err();
        assert_eq!(err.pointer(), "#/2");
        assert_eq!(err.kind(), SchemaKind::Boolean);
    }

    #[test]
    fn test_unique_items() {
        let schema = build(|_| ArraySchemaConfig {
            unique_items: true,
            ..Default::default()
        });
        assert!(schema.validate(&json!([1, 2])).is_ok());
        assert!(schema.validate(&json!([1, 1])).is_err());
        assert!(schema.validate(&json!([[1, 2], [1, 2]])).is_err());
        assert!(schema.validate(&json!([{"a": 1, "b": 2}, {"b": 2, "a": 1}])).is_err());
        assert!(schema.validate(&json!([{"a": 1}, {"a": "1"}])).is_ok());
        assert!(schema.validate(&json!([])).is_ok());
    }

    #[test]
    fn test_tuple_without_additional_items() {
        let schema = build(|tree| ArraySchemaConfig {
            item_schemas: Some(vec![
                tree.insert(SchemaNode::boolean()),
                tree.insert(SchemaNode::null()),
            ]),
            additional_items: false,
            ..Default::default()
        });
        assert!(schema.validate(&json!([true, null])).is_ok());

        let err = schema.validate(&json!([true, null, 1])).unwrap_err();
        assert_eq!(err.pointer(), "#");
        assert_eq!(err.message(), "expected: [2] array items, found: [3]");

        let err = schema.validate(&json!([1, null])).unwrap_err();
        assert_eq!(err.pointer(), "#/0");
    }

    #[test]
    fn test_tuple_with_one_item() {
        let schema = build(|tree| ArraySchemaConfig {
            item_schemas: Some(vec![tree.insert(SchemaNode::boolean())]),
            ..Default::default()
        });
        let err = schema.validate(&json!(["true", 2, 3])).unwrap_err();
        assert_eq!(err.pointer(), "#/0");
    }

    #[test]
    fn test_schema_of_additional_items() {
        let schema = build(|tree| ArraySchemaConfig {
            item_schemas: Some(vec![tree.insert(SchemaNode::boolean())]),
            schema_of_additional_items: Some(tree.insert(SchemaNode::null())),
            ..Default::default()
        });
        assert!(schema.validate(&json!([true, null, null])).is_ok());
        let err = schema.validate(&json!([true, null, false])).unwrap_err();
        assert_eq!(err.pointer(), "#/2");
        assert_eq!(err.kind(), SchemaKind::Null);
    }

    #[test]
    fn test_all_failures_are_collected() {
        let schema = build(|tree| ArraySchemaConfig {
            max_items: Some(2),
            unique_items: true,
            all_item_schema: Some(tree.insert(SchemaNode::null())),
            ..Default::default()
        });
        let err = schema.validate(&json!([1, 1, null])).unwrap_err();
        assert_eq!(err.message(), "4 schema violations found");
        let pointers: Vec<&str> = err.causes().iter().map(|c| c.pointer()).collect();
        assert_eq!(pointers, vec!["#", "#", "#/0", "#/1"]);
    }

    #[test]
    fn test_additional_items_precedence() {
        let mut tree = SchemaTree::new();
        let item = tree.insert(SchemaNode::boolean());

        // list validation ignores a disabled additionalItems flag
        let list = ArraySchema::new(ArraySchemaConfig {
            all_item_schema: Some(item),
            additional_items: false,
            ..Default::default()
        })
        .unwrap();
        assert!(list.permits_additional_items());

        // a schema for additional items wins over a disabled flag
        let tuple = ArraySchema::new(ArraySchemaConfig {
            item_schemas: Some(vec![item]),
            additional_items: false,
            schema_of_additional_items: Some(item),
            ..Default::default()
        })
        .unwrap();
        assert!(tuple.permits_additional_items());
        assert_eq!(tuple.schema_of_additional_items(), Some(item));

        let closed = ArraySchema::new(ArraySchemaConfig {
            item_schemas: Some(vec![item]),
            additional_items: false,
            ..Default::default()
        })
        .unwrap();
        assert!(!closed.permits_additional_items());
    }

    #[test]
    fn test_tuple_and_list_failure() {
        let mut tree = SchemaTree::new();
        let item = tree.insert(SchemaNode::boolean());
        let err = ArraySchema::new(ArraySchemaConfig {
            all_item_schema: Some(item),
            item_schemas: Some(vec![item]),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, SchemaError::TupleAndListItems));
    }
}
