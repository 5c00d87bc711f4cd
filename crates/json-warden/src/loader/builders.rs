use super::dispatch::{
    expect_array, expect_object, expect_str, has_any, opt_bool, opt_count, opt_number, opt_str,
    Shape,
};
use super::{Frame, LoadContext};
use crate::error::SchemaError;
use crate::schema::{
    Additional, ArraySchema, ArraySchemaConfig, NumberSchema, NumberSchemaConfig, ObjectSchema,
    ObjectSchemaConfig, SchemaRef, StringSchema, StringSchemaConfig,
};

const ARRAY_KEYWORDS: &[&str] = &[
    "items",
    "additionalItems",
    "minItems",
    "maxItems",
    "uniqueItems",
];

const OBJECT_KEYWORDS: &[&str] = &[
    "properties",
    "required",
    "minProperties",
    "maxProperties",
    "dependencies",
    "patternProperties",
    "additionalProperties",
];

const NUMBER_KEYWORDS: &[&str] = &[
    "minimum",
    "maximum",
    "exclusiveMinimum",
    "exclusiveMaximum",
    "multipleOf",
];

const STRING_KEYWORDS: &[&str] = &["minLength", "maxLength", "pattern"];

impl LoadContext<'_> {
    /// Builds the node implied by the keywords of an untyped schema object,
    /// checking array, object, number and string keywords in that order.
    /// The node accepts values of other types.
    pub(super) fn sniff_schema(
        &mut self,
        frame: &Frame<'_>,
    ) -> Result<Option<SchemaRef>, SchemaError> {
        let json = frame.json;
        let node = if has_any(json, ARRAY_KEYWORDS) {
            self.build_array_schema(frame, false)?
        } else if has_any(json, OBJECT_KEYWORDS) {
            self.build_object_schema(frame, false)?
        } else if has_any(json, NUMBER_KEYWORDS) {
            self.build_number_schema(frame, false, false)?
        } else if has_any(json, STRING_KEYWORDS) {
            self.build_string_schema(frame, false)?
        } else {
            return Ok(None);
        };
        Ok(Some(node))
    }

    pub(super) fn build_string_schema(
        &mut self,
        frame: &Frame<'_>,
        requires_string: bool,
    ) -> Result<SchemaRef, SchemaError> {
        let json = frame.json;
        let schema = StringSchema::new(StringSchemaConfig {
            requires_string,
            min_length: opt_count(json, "minLength")?,
            max_length: opt_count(json, "maxLength")?,
            pattern: opt_str(json, "pattern")?.map(str::to_string),
        })?;
        Ok(self.tree.insert(schema))
    }

    pub(super) fn build_number_schema(
        &mut self,
        frame: &Frame<'_>,
        requires_number: bool,
        requires_integer: bool,
    ) -> Result<SchemaRef, SchemaError> {
        let json = frame.json;
        let schema = NumberSchema::new(NumberSchemaConfig {
            requires_number,
            requires_integer,
            minimum: opt_number(json, "minimum")?,
            maximum: opt_number(json, "maximum")?,
            exclusive_minimum: opt_bool(json, "exclusiveMinimum")?.unwrap_or(false),
            exclusive_maximum: opt_bool(json, "exclusiveMaximum")?.unwrap_or(false),
            multiple_of: opt_number(json, "multipleOf")?,
        })?;
        Ok(self.tree.insert(schema))
    }

    pub(super) fn build_array_schema(
        &mut self,
        frame: &Frame<'_>,
        requires_array: bool,
    ) -> Result<SchemaRef, SchemaError> {
        let json = frame.json;
        let mut config = ArraySchemaConfig {
            requires_array,
            min_items: opt_count(json, "minItems")?,
            max_items: opt_count(json, "maxItems")?,
            unique_items: opt_bool(json, "uniqueItems")?.unwrap_or(false),
            ..Default::default()
        };
        if let Some(additional) = json.get("additionalItems") {
            match Shape::of(additional) {
                Shape::Bool(permitted) => config.additional_items = permitted,
                Shape::Object(schema) => {
                    config.schema_of_additional_items = Some(self.load_child(frame, schema)?);
                }
                _ => {
                    return Err(SchemaError::wrong_type(
                        "additionalItems",
                        "boolean or object",
                        additional,
                    ))
                }
            }
        }
        if let Some(items) = json.get("items") {
            match Shape::of(items) {
                Shape::Object(schema) => {
                    config.all_item_schema = Some(self.load_child(frame, schema)?)
                }
                Shape::Array(schemas) => {
                    let mut item_schemas = Vec::with_capacity(schemas.len());
                    for schema in schemas {
                        let schema = expect_object("items", schema)?;
                        item_schemas.push(self.load_child(frame, schema)?);
                    }
                    config.item_schemas = Some(item_schemas);
                }
                _ => return Err(SchemaError::wrong_type("items", "object or array", items)),
            }
        }
        let schema = ArraySchema::new(config)?;
        Ok(self.tree.insert(schema))
    }

    pub(super) fn build_object_schema(
        &mut self,
        frame: &Frame<'_>,
        requires_object: bool,
    ) -> Result<SchemaRef, SchemaError> {
        let json = frame.json;
        let mut config = ObjectSchemaConfig {
            requires_object,
            min_properties: opt_count(json, "minProperties")?,
            max_properties: opt_count(json, "maxProperties")?,
            ..Default::default()
        };
        if let Some(properties) = json.get("properties") {
            for (key, definition) in expect_object("properties", properties)? {
                let definition = expect_object(key, definition)?;
                let schema = self.load_child(frame, definition)?;
                config.property_schemas.insert(key.clone(), schema);
            }
        }
        if let Some(additional) = json.get("additionalProperties") {
            config.additional_properties = match Shape::of(additional) {
                Shape::Bool(true) => Additional::Permitted,
                Shape::Bool(false) => Additional::Forbidden,
                Shape::Object(schema) => Additional::Schema(self.load_child(frame, schema)?),
                _ => {
                    return Err(SchemaError::wrong_type(
                        "additionalProperties",
                        "boolean or object",
                        additional,
                    ))
                }
            };
        }
        if let Some(required) = json.get("required") {
            for key in expect_array("required", required)? {
                config.required_properties.push(expect_str("required", key)?.to_string());
            }
        }
        if let Some(patterns) = json.get("patternProperties") {
            for (pattern, definition) in expect_object("patternProperties", patterns)? {
                let definition = expect_object(pattern, definition)?;
                let schema = self.load_child(frame, definition)?;
                config.pattern_properties.push((pattern.clone(), schema));
            }
        }
        if let Some(dependencies) = json.get("dependencies") {
            for (trigger, dependency) in expect_object("dependencies", dependencies)? {
                match Shape::of(dependency) {
                    Shape::Object(schema) => {
                        let schema = self.load_child(frame, schema)?;
                        config.schema_dependencies.insert(trigger.clone(), schema);
                    }
                    Shape::Array(names) => {
                        let names = names
                            .iter()
                            .map(|name| expect_str(trigger, name).map(str::to_string))
                            .collect::<Result<Vec<_>, _>>()?;
                        config
                            .property_dependencies
                            .entry(trigger.clone())
                            .or_default()
                            .extend(names);
                    }
                    _ => {
                        return Err(SchemaError::wrong_type(
                            trigger.as_str(),
                            "object or array",
                            dependency,
                        ))
                    }
                }
            }
        }
        let schema = ObjectSchema::new(config)?;
        Ok(self.tree.insert(schema))
    }
}
