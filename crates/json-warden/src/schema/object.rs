use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::schema::{Additional, Schema, SchemaKind, SchemaRef};
use crate::validation::ValidationError;

/// Object validator settings, mirroring the object keywords.
///
/// Maps keep declaration order so failures are reported in the order the
/// schema lists its keywords.
#[derive(Debug, Clone)]
pub struct ObjectSchemaConfig {
    /// When false, non-object values pass unchecked.
    pub requires_object: bool,
    pub min_properties: Option<u64>,
    pub max_properties: Option<u64>,
    pub property_schemas: IndexMap<String, SchemaRef>,
    pub required_properties: Vec<String>,
    pub additional_properties: Additional,
    /// `(regex, schema)` pairs; the regex is compiled by [`ObjectSchema::new`].
    pub pattern_properties: Vec<(String, SchemaRef)>,
    pub property_dependencies: IndexMap<String, Vec<String>>,
    pub schema_dependencies: IndexMap<String, SchemaRef>,
}

impl Default for ObjectSchemaConfig {
    fn default() -> Self {
        Self {
            requires_object: true,
            min_properties: None,
            max_properties: None,
            property_schemas: IndexMap::new(),
            required_properties: Vec::new(),
            additional_properties: Additional::Permitted,
            pattern_properties: Vec::new(),
            property_dependencies: IndexMap::new(),
            schema_dependencies: IndexMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ObjectSchema {
    requires_object: bool,
    min_properties: Option<u64>,
    max_properties: Option<u64>,
    property_schemas: IndexMap<String, SchemaRef>,
    required_properties: Vec<String>,
    additional_properties: Additional,
    pattern_properties: Vec<(Regex, SchemaRef)>,
    property_dependencies: IndexMap<String, Vec<String>>,
    schema_dependencies: IndexMap<String, SchemaRef>,
}

impl ObjectSchema {
    /// # Errors
    ///
    /// `SchemaError::Regex` if a `patternProperties` key is not a valid
    /// regular expression.
    pub fn new(config: ObjectSchemaConfig) -> Result<Self, SchemaError> {
        let pattern_properties = config
            .pattern_properties
            .into_iter()
            .map(|(pattern, schema)| match Regex::new(&pattern) {
                Ok(regex) => Ok((regex, schema)),
                Err(source) => Err(SchemaError::Regex { pattern, source }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            requires_object: config.requires_object,
            min_properties: config.min_properties,
            max_properties: config.max_properties,
            property_schemas: config.property_schemas,
            required_properties: config.required_properties,
            additional_properties: config.additional_properties,
            pattern_properties,
            property_dependencies: config.property_dependencies,
            schema_dependencies: config.schema_dependencies,
        })
    }

    pub fn requires_object(&self) -> bool {
        self.requires_object
    }

    pub fn min_properties(&self) -> Option<u64> {
        self.min_properties
    }

    pub fn max_properties(&self) -> Option<u64> {
        self.max_properties
    }

    pub fn property_schemas(&self) -> &IndexMap<String, SchemaRef> {
        &self.property_schemas
    }

    pub fn required_properties(&self) -> &[String] {
        &self.required_properties
    }

    pub fn additional_properties(&self) -> Additional {
        self.additional_properties
    }

    pub fn permits_additional_properties(&self) -> bool {
        self.additional_properties != Additional::Forbidden
    }

    pub fn pattern_properties(&self) -> impl Iterator<Item = (&str, SchemaRef)> {
        self.pattern_properties
            .iter()
            .map(|(regex, schema)| (regex.as_str(), *schema))
    }

    pub fn property_dependencies(&self) -> &IndexMap<String, Vec<String>> {
        &self.property_dependencies
    }

    pub fn schema_dependencies(&self) -> &IndexMap<String, SchemaRef> {
        &self.schema_dependencies
    }

    pub(crate) fn children(&self) -> Vec<SchemaRef> {
        let mut out: Vec<SchemaRef> = self.property_schemas.values().copied().collect();
        out.extend(self.pattern_properties.iter().map(|(_, schema)| *schema));
        if let Additional::Schema(schema) = self.additional_properties {
            out.push(schema);
        }
        out.extend(self.schema_dependencies.values().copied());
        out
    }

    pub(crate) fn validate(&self, schema: &Schema, value: &Value) -> Result<(), ValidationError> {
        let Some(object) = value.as_object() else {
            if self.requires_object {
                return Err(ValidationError::type_mismatch(SchemaKind::Object, "object", value));
            }
            return Ok(());
        };
        let mut failures = Vec::new();
        if let Some(failure) = self.test_size(object) {
            failures.push(failure);
        }
        self.test_required(object, &mut failures);
        self.test_properties(schema, object, &mut failures);
        self.test_pattern_properties(schema, object, &mut failures);
        self.test_additional_properties(schema, object, &mut failures);
        self.test_property_dependencies(object, &mut failures);
        self.test_schema_dependencies(schema, value, object, &mut failures);
        ValidationError::throw_for(SchemaKind::Object, failures)
    }

    fn test_size(&self, object: &Map<String, Value>) -> Option<ValidationError> {
        let actual = object.len() as u64;
        if let Some(min) = self.min_properties {
            if actual < min {
                return Some(ValidationError::new(
                    SchemaKind::Object,
                    format!("minimum size: [{}], found: [{}]", min, actual),
                ));
            }
        }
        if let Some(max) = self.max_properties {
            if actual > max {
                return Some(ValidationError::new(
                    SchemaKind::Object,
                    format!("maximum size: [{}], found: [{}]", max, actual),
                ));
            }
        }
        None
    }

    fn test_required(&self, object: &Map<String, Value>, failures: &mut Vec<ValidationError>) {
        for key in &self.required_properties {
            if !object.contains_key(key) {
                failures.push(ValidationError::new(
                    SchemaKind::Object,
                    format!("required key [{}] not found", key),
                ));
            }
        }
    }

    fn test_properties(
        &self,
        schema: &Schema,
        object: &Map<String, Value>,
        failures: &mut Vec<ValidationError>,
    ) {
        for (key, property_schema) in &self.property_schemas {
            if let Some(property) = object.get(key) {
                if let Err(failure) = schema.validate_node(*property_schema, property) {
                    failures.push(failure.prepend(key));
                }
            }
        }
    }

    fn test_pattern_properties(
        &self,
        schema: &Schema,
        object: &Map<String, Value>,
        failures: &mut Vec<ValidationError>,
    ) {
        for (regex, pattern_schema) in &self.pattern_properties {
            for (key, property) in object {
                if !regex.is_match(key) {
                    continue;
                }
                if let Err(failure) = schema.validate_node(*pattern_schema, property) {
                    failures.push(failure.prepend(key));
                }
            }
        }
    }

    /// Keys matched neither by `properties` nor by any `patternProperties`
    /// regex.
    fn additional_keys<'a>(
        &'a self,
        object: &'a Map<String, Value>,
    ) -> impl Iterator<Item = (&'a String, &'a Value)> {
        object.iter().filter(move |(key, _)| {
            !self.property_schemas.contains_key(key.as_str())
                && !self.pattern_properties.iter().any(|(regex, _)| regex.is_match(key))
        })
    }

    fn test_additional_properties(
        &self,
        schema: &Schema,
        object: &Map<String, Value>,
        failures: &mut Vec<ValidationError>,
    ) {
        match self.additional_properties {
            Additional::Permitted => {}
            Additional::Forbidden => {
                for (key, _) in self.additional_keys(object) {
                    failures.push(ValidationError::new(
                        SchemaKind::Object,
                        format!("extraneous key [{}] is not permitted", key),
                    ));
                }
            }
            Additional::Schema(additional_schema) => {
                for (key, property) in self.additional_keys(object) {
                    if let Err(failure) = schema.validate_node(additional_schema, property) {
                        failures.push(failure.prepend(key));
                    }
                }
            }
        }
    }

    fn test_property_dependencies(
        &self,
        object: &Map<String, Value>,
        failures: &mut Vec<ValidationError>,
    ) {
        for (trigger, dependencies) in &self.property_dependencies {
            if !object.contains_key(trigger) {
                continue;
            }
            for dependency in dependencies {
                if !object.contains_key(dependency) {
                    failures.push(ValidationError::new(
                        SchemaKind::Object,
                        format!("property [{}] is required", dependency),
                    ));
                }
            }
        }
    }

    fn test_schema_dependencies(
        &self,
        schema: &Schema,
        value: &Value,
        object: &Map<String, Value>,
        failures: &mut Vec<ValidationError>,
    ) {
        for (trigger, dependency_schema) in &self.schema_dependencies {
            if !object.contains_key(trigger) {
                continue;
            }
            if let Err(failure) = schema.validate_node(*dependency_schema, value) {
                failures.push(failure);
            }
        }
    }
}
