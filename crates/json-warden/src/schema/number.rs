use json_warden_util::JsonType;
use serde_json::{Number, Value};

use crate::error::SchemaError;
use crate::schema::SchemaKind;
use crate::validation::ValidationError;

/// Tolerance for `multipleOf` on non-integer operands.
const MULTIPLE_OF_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct NumberSchemaConfig {
    /// When false, non-numeric values pass unchecked.
    pub requires_number: bool,
    pub requires_integer: bool,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: bool,
    pub exclusive_maximum: bool,
    pub multiple_of: Option<f64>,
}

impl Default for NumberSchemaConfig {
    fn default() -> Self {
        Self {
            requires_number: true,
            requires_integer: false,
            minimum: None,
            maximum: None,
            exclusive_minimum: false,
            exclusive_maximum: false,
            multiple_of: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NumberSchema {
    config: NumberSchemaConfig,
}

impl NumberSchema {
    /// # Errors
    ///
    /// `multiple_of` must be a finite number greater than zero.
    pub fn new(config: NumberSchemaConfig) -> Result<Self, SchemaError> {
        if let Some(divisor) = config.multiple_of {
            if !divisor.is_finite() || divisor <= 0.0 {
                return Err(SchemaError::WrongKeywordType {
                    keyword: "multipleOf".to_string(),
                    expected: "number greater than 0",
                    found: divisor.to_string(),
                });
            }
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &NumberSchemaConfig {
        &self.config
    }

    pub(crate) fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        let cfg = &self.config;
        let number = match value {
            Value::Number(number) => number,
            _ if cfg.requires_number => {
                let expected = if cfg.requires_integer { "integer" } else { "number" };
                return Err(ValidationError::type_mismatch(SchemaKind::Number, expected, value));
            }
            _ => return Ok(()),
        };
        if cfg.requires_integer && JsonType::of(value) != JsonType::Integer {
            return Err(ValidationError::type_mismatch(SchemaKind::Number, "integer", value));
        }
        let Some(actual) = number.as_f64() else {
            return Err(ValidationError::type_mismatch(SchemaKind::Number, "number", value));
        };

        if let Some(min) = cfg.minimum {
            if cfg.exclusive_minimum && actual <= min {
                return Err(fail(format!("{} is not higher than {}", number, min)));
            }
            if actual < min {
                return Err(fail(format!("{} is not higher or equal to {}", number, min)));
            }
        }
        if let Some(max) = cfg.maximum {
            if cfg.exclusive_maximum && actual >= max {
                return Err(fail(format!("{} is not lower than {}", number, max)));
            }
            if actual > max {
                return Err(fail(format!("{} is not lower or equal to {}", number, max)));
            }
        }
        if let Some(divisor) = cfg.multiple_of {
            if !is_multiple_of(number, actual, divisor) {
                return Err(fail(format!("{} is not a multiple of {}", number, divisor)));
            }
        }
        Ok(())
    }
}

fn fail(message: String) -> ValidationError {
    ValidationError::new(SchemaKind::Number, message)
}

fn is_multiple_of(number: &Number, actual: f64, divisor: f64) -> bool {
    if let Some(int) = number.as_i64() {
        if divisor.fract() == 0.0 && divisor <= i64::MAX as f64 {
            return int % (divisor as i64) == 0;
        }
    }
    let quotient = actual / divisor;
    quotient.is_finite() && (quotient - quotient.round()).abs() < MULTIPLE_OF_EPSILON
}
