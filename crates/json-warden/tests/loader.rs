mod common;

use json_warden::schema::Variant;
use json_warden::{SchemaError, SchemaKind};
use serde_json::json;

use common::load;

#[test]
fn wrong_keyword_type_names_the_keyword() {
    let err = json_warden::load(&json!({"type": "string", "minLength": "3"})).unwrap_err();
    assert_eq!(
        err.to_string(),
        "key [minLength]: expected type: non-negative integer, found: string"
    );
}

#[test]
fn unknown_type_is_rejected() {
    let err = json_warden::load(&json!({"type": "date"})).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownType(ref name) if name == "date"));
    assert_eq!(err.to_string(), "unknown type: [date]");
}

#[test]
fn unknown_type_inside_type_array_is_rejected() {
    let err = json_warden::load(&json!({"type": ["string", "int"]})).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownType(ref name) if name == "int"));
}

#[test]
fn more_than_one_combinator_is_rejected() {
    let err = json_warden::load(&json!({
        "allOf": [{"type": "string"}],
        "anyOf": [{"type": "null"}],
        "oneOf": [{}]
    }))
    .unwrap_err();
    assert!(matches!(err, SchemaError::MultipleCombinators(3)));
    assert_eq!(
        err.to_string(),
        "expected at most 1 of 'allOf', 'anyOf', 'oneOf', 3 found"
    );
}

#[test]
fn items_must_be_object_or_array() {
    let err = json_warden::load(&json!({"type": "array", "items": 1})).unwrap_err();
    assert!(matches!(err, SchemaError::WrongKeywordType { ref keyword, .. } if keyword == "items"));
}

#[test]
fn tuple_items_must_be_schema_objects() {
    let err = json_warden::load(&json!({"type": "array", "items": [{"type": "null"}, true]}))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "key [items]: expected type: object, found: boolean"
    );
}

#[test]
fn invalid_pattern_is_rejected() {
    let err = json_warden::load(&json!({"type": "string", "pattern": "("})).unwrap_err();
    assert!(matches!(err, SchemaError::Regex { ref pattern, .. } if pattern == "("));
}

#[test]
fn negative_multiple_of_is_rejected() {
    let err = json_warden::load(&json!({"type": "number", "multipleOf": -2})).unwrap_err();
    assert!(matches!(
        err,
        SchemaError::WrongKeywordType { ref keyword, .. } if keyword == "multipleOf"
    ));
}

#[test]
fn sniffed_base_is_combined_with_all_of() {
    let schema = load(&json!({"minimum": 0, "oneOf": [{"multipleOf": 3}, {"multipleOf": 5}]}));
    assert_eq!(schema.node(schema.root()).kind(), SchemaKind::AllOf);
    assert!(schema.is_valid(&json!(9)));
    assert!(!schema.is_valid(&json!(15)));
    assert!(!schema.is_valid(&json!(-3)));
}

#[test]
fn explicit_number_type_requires_numbers() {
    let schema = load(&json!({"type": "number"}));
    let err = schema.validate(&json!("12")).unwrap_err();
    assert_eq!(err.message(), "expected type: number, found: string");
    assert_eq!(err.kind(), SchemaKind::Number);
}

#[test]
fn exclusive_bounds_are_sniffed_as_number_keywords() {
    let schema = load(&json!({"exclusiveMaximum": true, "maximum": 10}));
    let Variant::Number(number) = &schema.node(schema.root()).variant else {
        panic!("expected a number schema");
    };
    assert!(!number.config().requires_number);
    assert!(schema.is_valid(&json!(9)));
    assert!(!schema.is_valid(&json!(10)));
}

#[test]
fn loaded_schema_is_shareable_across_threads() {
    let schema = std::sync::Arc::new(load(&json!({"type": "array", "items": {"type": "integer"}})));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let schema = schema.clone();
            std::thread::spawn(move || schema.is_valid(&json!([i, i + 1])))
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
