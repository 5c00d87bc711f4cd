use serde_json::Value;

use crate::{is_valid_index, unescape_fragment_component, JsonPointerError};

/// Splits a URI reference at its first `#`.
///
/// The fragment keeps its leading `#`; it is empty when there is none.
///
/// # Example
///
/// ```
/// use json_warden_pointer::split_fragment;
///
/// assert_eq!(split_fragment("http://x/s.json#/a"), ("http://x/s.json", "#/a"));
/// assert_eq!(split_fragment("http://x/s.json"), ("http://x/s.json", ""));
/// ```
pub fn split_fragment(uri: &str) -> (&str, &str) {
    match uri.find('#') {
        Some(index) => uri.split_at(index),
        None => (uri, ""),
    }
}

/// Resolves a URI fragment against `document`.
///
/// `""` and `"#"` address the whole document. `#/a/0` is a JSON Pointer whose
/// segments are unescaped with [`unescape_fragment_component`]. Any other
/// fragment (`#foo`) is looked up with [`find_anchor`].
pub fn query_fragment<'a>(
    document: &'a Value,
    fragment: &str,
) -> Result<&'a Value, JsonPointerError> {
    if fragment.is_empty() || fragment == "#" {
        return Ok(document);
    }
    let Some(pointer) = fragment.strip_prefix('#') else {
        return Err(JsonPointerError::NotFragment(fragment.to_string()));
    };
    let Some(path) = pointer.strip_prefix('/') else {
        return find_anchor(document, fragment)
            .ok_or_else(|| JsonPointerError::AnchorNotFound(fragment.to_string()));
    };

    let mut current = document;
    for raw in path.split('/') {
        let segment = unescape_fragment_component(raw);
        current = match current {
            Value::Object(map) => {
                map.get(&segment)
                    .ok_or_else(|| JsonPointerError::SegmentNotFound {
                        fragment: fragment.to_string(),
                        segment: segment.clone(),
                    })?
            }
            Value::Array(items) => {
                if !is_valid_index(&segment) {
                    return Err(JsonPointerError::InvalidIndex {
                        fragment: fragment.to_string(),
                        segment,
                    });
                }
                segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get(index))
                    .ok_or_else(|| JsonPointerError::SegmentNotFound {
                        fragment: fragment.to_string(),
                        segment: segment.clone(),
                    })?
            }
            _ => {
                return Err(JsonPointerError::NotContainer {
                    fragment: fragment.to_string(),
                    segment,
                })
            }
        };
    }
    Ok(current)
}

/// Finds the first object, depth-first in document order, whose string `id`
/// ends with `fragment`.
pub fn find_anchor<'a>(document: &'a Value, fragment: &str) -> Option<&'a Value> {
    match document {
        Value::Object(map) => {
            let declares = map
                .get("id")
                .and_then(Value::as_str)
                .is_some_and(|id| id.ends_with(fragment));
            if declares {
                return Some(document);
            }
            map.values().find_map(|child| find_anchor(child, fragment))
        }
        Value::Array(items) => items.iter().find_map(|child| find_anchor(child, fragment)),
        _ => None,
    }
}
