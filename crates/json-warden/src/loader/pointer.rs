use std::collections::HashMap;
use std::rc::Rc;

use json_warden_pointer::{query_fragment, split_fragment};
use json_warden_util::type_name;
use serde_json::{Map, Value};
use tracing::debug;

use crate::client::SchemaClient;
use crate::error::SchemaError;

/// A schema document together with the URI it was loaded from.
#[derive(Debug)]
pub struct Document {
    base: String,
    root: Value,
}

impl Document {
    pub fn new(base: impl Into<String>, root: Value) -> Self {
        Self {
            base: base.into(),
            root,
        }
    }

    /// URI of the document without fragment; empty when unknown.
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn root(&self) -> &Value {
        &self.root
    }
}

/// Documents known to a loader, keyed by base URI.
pub type DocumentCache = HashMap<String, Rc<Document>>;

#[derive(Debug, Clone)]
enum Source {
    Document(Rc<Document>),
    Url(String),
}

/// A `$ref` target: a document (in memory or still to be fetched) and a URI
/// fragment inside it.
#[derive(Debug, Clone)]
pub struct JsonPointer {
    source: Source,
    fragment: String,
}

#[derive(Debug)]
pub struct QueryResult {
    /// The document the result was found in.
    pub containing_document: Rc<Document>,
    pub query_result: Map<String, Value>,
}

impl QueryResult {
    pub fn base(&self) -> &str {
        self.containing_document.base()
    }
}

impl JsonPointer {
    pub fn for_document(document: Rc<Document>, fragment: impl Into<String>) -> Self {
        Self {
            source: Source::Document(document),
            fragment: fragment.into(),
        }
    }

    /// Pointer into the document at `url`, split at its first `#`.
    pub fn for_url(url: &str) -> Self {
        let (document, fragment) = split_fragment(url);
        Self {
            source: Source::Url(document.to_string()),
            fragment: fragment.to_string(),
        }
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Locates the pointed-to schema object.
    ///
    /// A URL source is looked up in `documents` first and fetched through
    /// `client` otherwise; fetched documents are added to `documents`.
    pub fn query(
        &self,
        documents: &mut DocumentCache,
        client: &dyn SchemaClient,
    ) -> Result<QueryResult, SchemaError> {
        let document = match &self.source {
            Source::Document(document) => Rc::clone(document),
            Source::Url(url) => fetch(url, documents, client)?,
        };
        let found = query_fragment(document.root(), &self.fragment)?;
        let Value::Object(found) = found else {
            return Err(SchemaError::NotASchemaObject {
                reference: format!("{}{}", document.base(), self.fragment),
                found: type_name(found),
            });
        };
        Ok(QueryResult {
            query_result: found.clone(),
            containing_document: document,
        })
    }
}

fn fetch(
    url: &str,
    documents: &mut DocumentCache,
    client: &dyn SchemaClient,
) -> Result<Rc<Document>, SchemaError> {
    if let Some(document) = documents.get(url) {
        debug!(url, "schema document already loaded");
        return Ok(Rc::clone(document));
    }
    debug!(url, "fetching schema document");
    let reader = client.get(url).map_err(|source| SchemaError::Fetch {
        url: url.to_string(),
        source,
    })?;
    let root: Value = serde_json::from_reader(reader).map_err(|source| SchemaError::Parse {
        url: url.to_string(),
        source,
    })?;
    let document = Rc::new(Document::new(url, root));
    documents.insert(url.to_string(), Rc::clone(&document));
    Ok(document)
}
