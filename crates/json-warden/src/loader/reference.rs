use std::rc::Rc;

use serde_json::{Map, Value};
use tracing::debug;

use super::pointer::JsonPointer;
use super::scope::ResolutionScope;
use super::{Frame, LoadContext};
use crate::error::SchemaError;
use crate::schema::SchemaRef;

/// Shallow merge of two schema objects; keys of `additional` win.
///
/// An empty side returns the other one as is.
pub fn extend(additional: Map<String, Value>, original: Map<String, Value>) -> Map<String, Value> {
    if additional.is_empty() {
        return original;
    }
    if original.is_empty() {
        return additional;
    }
    let mut merged = original;
    for (key, value) in additional {
        merged.insert(key, value);
    }
    merged
}

/// Shallow copy of `object` without its `$ref` key.
pub fn without_ref(object: &Map<String, Value>) -> Map<String, Value> {
    object
        .iter()
        .filter(|(key, _)| key.as_str() != "$ref")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

impl LoadContext<'_> {
    /// Returns the reference node for `reference`, built on first use.
    ///
    /// The handle is cached before its target is loaded, so a target that
    /// refers back to it gets the same handle instead of recursing.
    pub(super) fn lookup_reference(
        &mut self,
        frame: &Frame<'_>,
        reference: &str,
    ) -> Result<SchemaRef, SchemaError> {
        let absolute = frame.scope.resolve(reference);
        if let Some(&cached) = self.pointer_schemas.get(&absolute) {
            debug!(reference = %absolute, "reference already loaded");
            return Ok(cached);
        }
        debug!(reference = %absolute, "resolving reference");
        let handle = self.tree.reserve_reference();
        self.pointer_schemas.insert(absolute.clone(), handle);

        let pointer = if absolute.starts_with('#') {
            JsonPointer::for_document(Rc::clone(frame.doc), absolute.as_str())
        } else {
            JsonPointer::for_url(&absolute)
        };
        let result = pointer.query(&mut self.documents, self.client)?;
        let merged = extend(without_ref(frame.json), result.query_result);
        let scope = ResolutionScope::new(result.containing_document.base());
        let target = self.load_schema(&merged, &result.containing_document, &scope)?;
        self.tree.resolve_reference(handle, target)?;
        Ok(handle)
    }
}
