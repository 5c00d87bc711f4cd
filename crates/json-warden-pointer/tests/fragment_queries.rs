use json_warden_pointer::{escape_component, query_fragment, split_fragment, JsonPointerError};
use serde_json::json;

#[test]
fn escaped_keys_resolve_to_their_values() {
    let doc = json!({"a/b": {"c~d": {"100%": true}}});
    let fragment = format!(
        "#/{}/{}/100%25",
        escape_component("a/b"),
        escape_component("c~d")
    );
    assert_eq!(fragment, "#/a~1b/c~0d/100%25");
    assert_eq!(query_fragment(&doc, &fragment).expect("resolves"), &json!(true));
}

#[test]
fn anchor_and_pointer_reach_the_same_definition() {
    let doc = json!({"definitions": {"positiveInteger": {"id": "#posint", "type": "integer"}}});

    let by_pointer = query_fragment(&doc, "#/definitions/positiveInteger").expect("pointer");
    let by_anchor = query_fragment(&doc, "#posint").expect("anchor");
    assert_eq!(by_pointer, by_anchor);
}

#[test]
fn remote_reference_splits_into_document_and_pointer() {
    let (document, fragment) =
        split_fragment("http://json-schema.org/draft-04/schema#/definitions/schemaArray");
    assert_eq!(document, "http://json-schema.org/draft-04/schema");

    let doc = json!({"definitions": {"schemaArray": {"type": "array", "minItems": 1}}});
    assert_eq!(
        query_fragment(&doc, fragment).expect("resolves"),
        &json!({"type": "array", "minItems": 1})
    );
}

#[test]
fn missing_segment_reports_fragment_and_segment() {
    let doc = json!({"a": {"b": {}}});
    let err = query_fragment(&doc, "#/a/b/c").expect_err("missing");
    assert_eq!(
        err,
        JsonPointerError::SegmentNotFound {
            fragment: "#/a/b/c".to_string(),
            segment: "c".to_string(),
        }
    );
    assert!(err.to_string().contains("#/a/b/c"));
}
