//! JSON Pointer (RFC 6901) utilities.
//!
//! This crate implements helper functions for [JSON Pointer (RFC 6901)](https://tools.ietf.org/html/rfc6901)
//! and for the URI-fragment form of pointers (`#/definitions/a`) used by
//! JSON Schema `$ref` values.
//!
//! # Example
//!
//! ```
//! use json_warden_pointer::{escape_component, query_fragment, split_fragment};
//! use serde_json::json;
//!
//! // Split a reference into document and fragment
//! let (document, fragment) = split_fragment("http://x/s.json#/foo/a~1b");
//! assert_eq!(document, "http://x/s.json");
//!
//! // Query the fragment
//! let doc = json!({"foo": {"a/b": 42}});
//! assert_eq!(query_fragment(&doc, fragment).unwrap(), &json!(42));
//!
//! // Escape a key for use in a pointer
//! assert_eq!(escape_component("a/b"), "a~1b");
//! ```

use thiserror::Error;

pub mod fragment;

pub use fragment::{find_anchor, query_fragment, split_fragment};

/// Unescapes a JSON Pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// # Example
///
/// ```
/// use json_warden_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("no-escapes"), "no-escapes");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~1 must be replaced before ~0
    component.replace("~1", "/").replace("~0", "~")
}

/// Unescapes a path component taken from a URI fragment.
///
/// Applies [`unescape_component`], then decodes the percent-encoded `%25`
/// back to `%`.
///
/// # Example
///
/// ```
/// use json_warden_pointer::unescape_fragment_component;
///
/// assert_eq!(unescape_fragment_component("a~1b"), "a/b");
/// assert_eq!(unescape_fragment_component("100%25"), "100%");
/// ```
pub fn unescape_fragment_component(component: &str) -> String {
    let unescaped = unescape_component(component);
    if !unescaped.contains("%25") {
        return unescaped;
    }
    unescaped.replace("%25", "%")
}

/// Escapes a JSON Pointer path component.
///
/// Per RFC 6901, `/` is replaced with `~1` and `~` is replaced with `~0`.
///
/// # Example
///
/// ```
/// use json_warden_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// assert_eq!(escape_component("no-escapes"), "no-escapes");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~ must be escaped before /
    component.replace('~', "~0").replace('/', "~1")
}

/// Check if a string represents a valid non-negative integer array index.
///
/// # Example
///
/// ```
/// use json_warden_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("abc"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    // First char can't be leading zero unless it's just "0"
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPointerError {
    #[error("JSON pointers must start with a '#', found [{0}]")]
    NotFragment(String),
    #[error("failed to resolve JSON pointer [{fragment}]. Segment [{segment}] not found")]
    SegmentNotFound { fragment: String, segment: String },
    #[error("failed to resolve JSON pointer [{fragment}]. Segment [{segment}] is not a valid array index")]
    InvalidIndex { fragment: String, segment: String },
    #[error("failed to resolve JSON pointer [{fragment}]. Segment [{segment}] points into a scalar value")]
    NotContainer { fragment: String, segment: String },
    #[error("no subschema declares the identifier [{0}]")]
    AnchorNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_component() {
        // No escapes needed
        assert_eq!(unescape_component("foo"), "foo");

        // Escape sequences
        assert_eq!(unescape_component("a~0b"), "a~b");
        assert_eq!(unescape_component("c~1d"), "c/d");
        assert_eq!(unescape_component("a~0b~1c"), "a~b/c");

        // "~01" decodes to "~1", not "/"
        assert_eq!(unescape_component("~01"), "~1");
    }

    #[test]
    fn test_unescape_fragment_component() {
        assert_eq!(unescape_fragment_component("plain"), "plain");
        assert_eq!(unescape_fragment_component("a%25b"), "a%b");
        assert_eq!(unescape_fragment_component("~0%25~1"), "~%/");
        // Only %25 is decoded
        assert_eq!(unescape_fragment_component("a%20b"), "a%20b");
    }

    #[test]
    fn test_escape_component() {
        assert_eq!(escape_component("foo"), "foo");
        assert_eq!(escape_component("a~b/c"), "a~0b~1c");
        assert_eq!(escape_component("~1"), "~01");
    }

    #[test]
    fn test_is_valid_index() {
        assert!(is_valid_index("0"));
        assert!(is_valid_index("10"));
        assert!(!is_valid_index(""));
        assert!(!is_valid_index("00"));
        assert!(!is_valid_index("1.5"));
        assert!(!is_valid_index("-"));
    }

    #[test]
    fn test_error_messages_name_fragment_and_segment() {
        let err = JsonPointerError::SegmentNotFound {
            fragment: "#/definitions/missing".to_string(),
            segment: "missing".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to resolve JSON pointer [#/definitions/missing]. Segment [missing] not found"
        );
    }
}
