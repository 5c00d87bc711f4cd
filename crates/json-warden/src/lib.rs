//! JSON Schema (draft-04) validation.
//!
//! A schema document is compiled once by the [`SchemaLoader`] into an
//! immutable [`Schema`]; validating a value against it either succeeds or
//! returns a [`ValidationError`] tree describing every violation found, each
//! located by a JSON Pointer into the validated value.
//!
//! ```
//! use serde_json::json;
//!
//! let schema = json_warden::load(&json!({
//!     "type": "object",
//!     "properties": {
//!         "rectangle": {
//!             "type": "object",
//!             "properties": {
//!                 "a": {"type": "number", "minimum": 0},
//!                 "b": {"type": "number", "minimum": 0}
//!             }
//!         }
//!     }
//! }))
//! .unwrap();
//!
//! let err = schema
//!     .validate(&json!({"rectangle": {"a": -5, "b": -3}}))
//!     .unwrap_err();
//! assert_eq!(err.pointer(), "#/rectangle");
//! assert_eq!(
//!     err.all_messages(),
//!     vec![
//!         "#/rectangle/a: -5 is not higher or equal to 0",
//!         "#/rectangle/b: -3 is not higher or equal to 0",
//!     ]
//! );
//! ```
//!
//! Remote `$ref` targets are fetched through a [`SchemaClient`]. The
//! [`DefaultSchemaClient`] reads `file://` URLs, and `http(s)://` URLs when
//! the `http` feature is enabled.

pub mod client;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use client::{DefaultSchemaClient, SchemaClient};
pub use error::SchemaError;
pub use loader::{LoaderOptions, SchemaLoader};
pub use schema::{Schema, SchemaKind, SchemaNode, SchemaRef};
pub use validation::ValidationError;

/// Compiles `json` with default [`LoaderOptions`].
pub fn load(json: &serde_json::Value) -> Result<Schema, SchemaError> {
    SchemaLoader::default().load(json)
}
