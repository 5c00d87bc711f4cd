//! Keyword value access by JSON kind.
//!
//! Keywords accept one or two JSON kinds (`items` is an object or an array,
//! `additionalProperties` a boolean or an object). [`Shape`] is matched on to
//! pick the branch; the `expect_*` and `opt_*` helpers read a keyword that has
//! a single accepted kind and report any other kind as
//! [`SchemaError::WrongKeywordType`].

use serde_json::{Map, Number, Value};

use crate::error::SchemaError;

/// A borrowed JSON value split by kind.
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    Null,
    Bool(bool),
    Number(&'a Number),
    String(&'a str),
    Array(&'a [Value]),
    Object(&'a Map<String, Value>),
}

impl<'a> Shape<'a> {
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Null => Shape::Null,
            Value::Bool(b) => Shape::Bool(*b),
            Value::Number(n) => Shape::Number(n),
            Value::String(s) => Shape::String(s),
            Value::Array(items) => Shape::Array(items),
            Value::Object(map) => Shape::Object(map),
        }
    }
}

pub fn expect_object<'a>(
    keyword: &str,
    value: &'a Value,
) -> Result<&'a Map<String, Value>, SchemaError> {
    match Shape::of(value) {
        Shape::Object(map) => Ok(map),
        _ => Err(SchemaError::wrong_type(keyword, "object", value)),
    }
}

pub fn expect_array<'a>(keyword: &str, value: &'a Value) -> Result<&'a [Value], SchemaError> {
    match Shape::of(value) {
        Shape::Array(items) => Ok(items),
        _ => Err(SchemaError::wrong_type(keyword, "array", value)),
    }
}

pub fn expect_bool(keyword: &str, value: &Value) -> Result<bool, SchemaError> {
    match Shape::of(value) {
        Shape::Bool(b) => Ok(b),
        _ => Err(SchemaError::wrong_type(keyword, "boolean", value)),
    }
}

pub fn expect_str<'a>(keyword: &str, value: &'a Value) -> Result<&'a str, SchemaError> {
    match Shape::of(value) {
        Shape::String(s) => Ok(s),
        _ => Err(SchemaError::wrong_type(keyword, "string", value)),
    }
}

/// A non-negative integer. Integral floats such as `2.0` are accepted.
pub fn expect_count(keyword: &str, value: &Value) -> Result<u64, SchemaError> {
    if let Shape::Number(n) = Shape::of(value) {
        if let Some(count) = n.as_u64() {
            return Ok(count);
        }
        if let Some(f) = n.as_f64() {
            if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
                return Ok(f as u64);
            }
        }
    }
    Err(SchemaError::wrong_type(keyword, "non-negative integer", value))
}

pub fn expect_number(keyword: &str, value: &Value) -> Result<f64, SchemaError> {
    match Shape::of(value) {
        Shape::Number(n) => n
            .as_f64()
            .ok_or_else(|| SchemaError::wrong_type(keyword, "number", value)),
        _ => Err(SchemaError::wrong_type(keyword, "number", value)),
    }
}

pub fn opt_bool(json: &Map<String, Value>, keyword: &str) -> Result<Option<bool>, SchemaError> {
    json.get(keyword).map(|v| expect_bool(keyword, v)).transpose()
}

pub fn opt_str<'a>(
    json: &'a Map<String, Value>,
    keyword: &str,
) -> Result<Option<&'a str>, SchemaError> {
    json.get(keyword).map(|v| expect_str(keyword, v)).transpose()
}

pub fn opt_count(json: &Map<String, Value>, keyword: &str) -> Result<Option<u64>, SchemaError> {
    json.get(keyword).map(|v| expect_count(keyword, v)).transpose()
}

pub fn opt_number(json: &Map<String, Value>, keyword: &str) -> Result<Option<f64>, SchemaError> {
    json.get(keyword).map(|v| expect_number(keyword, v)).transpose()
}

/// Whether `json` contains any of `keywords`.
pub fn has_any(json: &Map<String, Value>, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| json.contains_key(*k))
}
