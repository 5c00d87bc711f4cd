#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use json_warden::{LoaderOptions, Schema, SchemaClient, SchemaLoader};
use serde_json::Value;

/// Serves documents from memory and records every requested URL.
#[derive(Debug, Default)]
pub struct MapClient {
    documents: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl MapClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, document: Value) -> Self {
        self.documents.insert(url.to_string(), document.to_string());
        self
    }

    pub fn with_text(mut self, url: &str, text: &str) -> Self {
        self.documents.insert(url.to_string(), text.to_string());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl SchemaClient for MapClient {
    fn get(&self, url: &str) -> io::Result<Box<dyn Read>> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.documents.get(url) {
            Some(text) => Ok(Box::new(Cursor::new(text.clone().into_bytes()))),
            None => Err(io::Error::new(io::ErrorKind::NotFound, format!("no document at {url}"))),
        }
    }
}

pub fn loader_with(client: &Arc<MapClient>, resolution_scope: Option<&str>) -> SchemaLoader {
    SchemaLoader::new(LoaderOptions {
        client: client.clone(),
        resolution_scope: resolution_scope.map(str::to_string),
    })
}

pub fn load(json: &Value) -> Schema {
    json_warden::load(json).unwrap_or_else(|e| panic!("failed to load {json}: {e}"))
}

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

pub fn read_fixture(name: &str) -> Value {
    let path = fixtures_dir().join(name);
    let data =
        fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {:?}: {e}", path));
    serde_json::from_str(&data).unwrap_or_else(|e| panic!("failed to parse {:?}: {e}", path))
}
