use regex::Regex;
use serde_json::Value;

use crate::error::SchemaError;
use crate::schema::SchemaKind;
use crate::validation::ValidationError;

#[derive(Debug, Clone)]
pub struct StringSchemaConfig {
    /// When false, non-string values pass unchecked.
    pub requires_string: bool,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,
}

impl Default for StringSchemaConfig {
    fn default() -> Self {
        Self {
            requires_string: true,
            min_length: None,
            max_length: None,
            pattern: None,
        }
    }
}

/// String validator. Lengths count Unicode scalar values; `pattern` matches
/// anywhere in the string unless anchored.
#[derive(Debug, Clone)]
pub struct StringSchema {
    requires_string: bool,
    min_length: Option<u64>,
    max_length: Option<u64>,
    pattern: Option<Regex>,
}

impl StringSchema {
    pub fn new(config: StringSchemaConfig) -> Result<Self, SchemaError> {
        let pattern = match config.pattern {
            Some(pattern) => Some(
                Regex::new(&pattern).map_err(|source| SchemaError::Regex { pattern, source })?,
            ),
            None => None,
        };
        Ok(Self {
            requires_string: config.requires_string,
            min_length: config.min_length,
            max_length: config.max_length,
            pattern,
        })
    }

    pub fn requires_string(&self) -> bool {
        self.requires_string
    }

    pub fn min_length(&self) -> Option<u64> {
        self.min_length
    }

    pub fn max_length(&self) -> Option<u64> {
        self.max_length
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    pub(crate) fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        let Some(text) = value.as_str() else {
            if self.requires_string {
                return Err(ValidationError::type_mismatch(SchemaKind::String, "string", value));
            }
            return Ok(());
        };
        self.test_length(text)?;
        self.test_pattern(text)
    }

    fn test_length(&self, text: &str) -> Result<(), ValidationError> {
        let actual = text.chars().count() as u64;
        if let Some(min) = self.min_length {
            if actual < min {
                return Err(ValidationError::new(
                    SchemaKind::String,
                    format!("expected minLength: {}, actual: {}", min, actual),
                ));
            }
        }
        if let Some(max) = self.max_length {
            if actual > max {
                return Err(ValidationError::new(
                    SchemaKind::String,
                    format!("expected maxLength: {}, actual: {}", max, actual),
                ));
            }
        }
        Ok(())
    }

    fn test_pattern(&self, text: &str) -> Result<(), ValidationError> {
        match &self.pattern {
            Some(pattern) if !pattern.is_match(text) => Err(ValidationError::new(
                SchemaKind::String,
                format!("string [{}] does not match pattern {}", text, pattern.as_str()),
            )),
            _ => Ok(()),
        }
    }
}
