use serde_json::Value;

use crate::schema::{Schema, SchemaKind, SchemaRef};
use crate::validation::ValidationError;

/// How many subschemas must accept a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    AllOf,
    AnyOf,
    OneOf,
}

impl Criterion {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::AllOf => "allOf",
            Self::AnyOf => "anyOf",
            Self::OneOf => "oneOf",
        }
    }

    pub fn kind(self) -> SchemaKind {
        match self {
            Self::AllOf => SchemaKind::AllOf,
            Self::AnyOf => SchemaKind::AnyOf,
            Self::OneOf => SchemaKind::OneOf,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CombinedSchema {
    criterion: Criterion,
    subschemas: Vec<SchemaRef>,
}

impl CombinedSchema {
    pub fn new(criterion: Criterion, subschemas: Vec<SchemaRef>) -> Self {
        Self {
            criterion,
            subschemas,
        }
    }

    pub fn all_of(subschemas: Vec<SchemaRef>) -> Self {
        Self::new(Criterion::AllOf, subschemas)
    }

    pub fn any_of(subschemas: Vec<SchemaRef>) -> Self {
        Self::new(Criterion::AnyOf, subschemas)
    }

    pub fn one_of(subschemas: Vec<SchemaRef>) -> Self {
        Self::new(Criterion::OneOf, subschemas)
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    pub fn subschemas(&self) -> &[SchemaRef] {
        &self.subschemas
    }

    pub(crate) fn validate(&self, schema: &Schema, value: &Value) -> Result<(), ValidationError> {
        let failures: Vec<ValidationError> = self
            .subschemas
            .iter()
            .filter_map(|&sub| schema.validate_node(sub, value).err())
            .collect();
        let total = self.subschemas.len();
        let matching = total - failures.len();
        let kind = self.criterion.kind();

        match self.criterion {
            Criterion::AllOf if matching < total => Err(ValidationError::with_causes(
                kind,
                format!("only {} subschema matches out of {}", matching, total),
                failures,
            )),
            Criterion::AnyOf if matching == 0 => Err(ValidationError::with_causes(
                kind,
                format!("no subschema matched out of the total {} subschemas", total),
                failures,
            )),
            Criterion::OneOf if matching == 0 => Err(ValidationError::with_causes(
                kind,
                format!("0 subschemas matched out of {}", total),
                failures,
            )),
            Criterion::OneOf if matching > 1 => Err(ValidationError::new(
                kind,
                format!("{} subschemas matched instead of one", matching),
            )),
            _ => Ok(()),
        }
    }
}
