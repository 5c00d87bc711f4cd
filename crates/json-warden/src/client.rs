//! Retrieval of remote schema documents.

use std::fs::File;
use std::io::{self, Read};

use url::Url;

/// Fetches the raw JSON text a remote `$ref` points at.
///
/// The loader calls it at most once per document URL. Closures of the form
/// `Fn(&str) -> io::Result<Box<dyn Read>>` implement this trait, which is the
/// easiest way to serve documents from memory.
pub trait SchemaClient {
    fn get(&self, url: &str) -> io::Result<Box<dyn Read>>;
}

impl<F> SchemaClient for F
where
    F: Fn(&str) -> io::Result<Box<dyn Read>>,
{
    fn get(&self, url: &str) -> io::Result<Box<dyn Read>> {
        self(url)
    }
}

/// Reads `file://` URLs from disk. With the `http` feature it also fetches
/// `http://` and `https://` URLs through a blocking reqwest client.
#[derive(Debug, Default)]
pub struct DefaultSchemaClient {
    #[cfg(feature = "http")]
    http: reqwest::blocking::Client,
}

impl DefaultSchemaClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn open_file(url: &Url) -> io::Result<Box<dyn Read>> {
        let path = url.to_file_path().map_err(|()| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("not a local path: {url}"))
        })?;
        Ok(Box::new(File::open(path)?))
    }

    #[cfg(feature = "http")]
    fn fetch_http(&self, url: &Url) -> io::Result<Box<dyn Read>> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(io::Error::other)?;
        let body = response.bytes().map_err(io::Error::other)?;
        Ok(Box::new(io::Cursor::new(body)))
    }

    #[cfg(not(feature = "http"))]
    fn fetch_http(&self, url: &Url) -> io::Result<Box<dyn Read>> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("fetching [{url}] requires the `http` feature"),
        ))
    }
}

impl SchemaClient for DefaultSchemaClient {
    fn get(&self, url: &str) -> io::Result<Box<dyn Read>> {
        let parsed = Url::parse(url)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("{url}: {e}")))?;
        match parsed.scheme() {
            "file" => Self::open_file(&parsed),
            "http" | "https" => self.fetch_http(&parsed),
            scheme => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("unsupported URL scheme [{scheme}] in [{url}]"),
            )),
        }
    }
}
