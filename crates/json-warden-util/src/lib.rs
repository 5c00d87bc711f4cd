//! json-warden-util - Utility functions for json-warden
//!
//! Structural equality over `serde_json::Value` trees and naming of JSON
//! value kinds for diagnostics.

pub mod json_equal;
pub mod json_type;

// Re-exports for convenience
pub use json_equal::{deep_equal, numbers_equal};
pub use json_type::{type_name, JsonType};
