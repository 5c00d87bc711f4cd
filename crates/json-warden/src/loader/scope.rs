use json_warden_pointer::split_fragment;
use serde_json::{Map, Value};
use tracing::trace;
use url::Url;

/// Base URI against which `id` and `$ref` values are resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionScope(String);

impl ResolutionScope {
    pub fn new(scope: impl Into<String>) -> Self {
        Self(scope.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The scope without its fragment.
    pub fn base(&self) -> &str {
        split_fragment(&self.0).0
    }

    /// Scope in effect inside `json`: a string `id` is resolved against this
    /// scope, otherwise the scope is inherited unchanged.
    pub fn enter(&self, json: &Map<String, Value>) -> ResolutionScope {
        match json.get("id").and_then(Value::as_str) {
            Some(id) => {
                let child = self.resolve(id);
                trace!(from = %self.0, to = %child, "resolution scope changed");
                ResolutionScope(child)
            }
            None => self.clone(),
        }
    }

    /// Resolves a URI reference against this scope.
    pub fn resolve(&self, reference: &str) -> String {
        resolve(&self.0, reference)
    }
}

impl std::fmt::Display for ResolutionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolves `reference` against `scope`.
///
/// An absolute reference is returned unchanged and a fragment-only reference
/// replaces the fragment of `scope`. Anything else is joined to an absolute
/// `scope` by RFC 3986 rules, or replaces the last path segment of a relative
/// one.
pub fn resolve(scope: &str, reference: &str) -> String {
    if Url::parse(reference).is_ok() {
        return reference.to_string();
    }
    if reference.starts_with('#') {
        return format!("{}{}", split_fragment(scope).0, reference);
    }
    if let Ok(base) = Url::parse(scope) {
        if let Ok(joined) = base.join(reference) {
            return joined.to_string();
        }
    }
    match scope.rfind('/') {
        Some(slash) => format!("{}{}", &scope[..=slash], reference),
        None => reference.to_string(),
    }
}
