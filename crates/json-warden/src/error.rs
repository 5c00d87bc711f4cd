use std::io;

use json_warden_pointer::JsonPointerError;
use json_warden_util::type_name;
use thiserror::Error;

/// A malformed schema document. Loading stops at the first one.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("key [{keyword}]: expected type: {expected}, found: {found}")]
    WrongKeywordType {
        keyword: String,
        expected: &'static str,
        found: String,
    },

    #[error("unknown type: [{0}]")]
    UnknownType(String),

    #[error("cannot perform both tuple and list validation")]
    TupleAndListItems,

    #[error("expected at most 1 of 'allOf', 'anyOf', 'oneOf', {0} found")]
    MultipleCombinators(usize),

    #[error("invalid regular expression [{pattern}]")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    Pointer(#[from] JsonPointerError),

    #[error("reference [{reference}] does not point to a schema object, found: {found}")]
    NotASchemaObject {
        reference: String,
        found: &'static str,
    },

    #[error("failed to fetch [{url}]")]
    Fetch {
        url: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse JSON text fetched from [{url}]")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("schema node {0} is a reference that was never resolved")]
    UnresolvedReference(usize),

    #[error("schema node {0} is already built and cannot be resolved again")]
    ReferenceAlreadyResolved(usize),

    #[error("schema node {0} refers to missing node {1}")]
    DanglingHandle(usize, usize),

    #[error("schema node {0} leads back to itself without descending into the value")]
    CircularReference(usize),
}

impl SchemaError {
    pub(crate) fn wrong_type(
        keyword: impl Into<String>,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        SchemaError::WrongKeywordType {
            keyword: keyword.into(),
            expected,
            found: type_name(found).to_string(),
        }
    }
}
