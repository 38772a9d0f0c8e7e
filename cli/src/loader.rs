#![deny(missing_docs)]

//! # Reference Loader
//!
//! Picks how to fetch a `$ref`'d document from its URL scheme: files through the
//! core [`FileLoader`], `http(s)` through `ureq` when the `client` feature is on.

use mockoon_sync_core::{AppError, AppResult, DocumentLoader, FileLoader};
use serde_json::Value;
use url::Url;

/// Dispatches on URL scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemeLoader {
    files: FileLoader,
}

impl DocumentLoader for SchemeLoader {
    fn load(&self, url: &Url) -> AppResult<Value> {
        match url.scheme() {
            "file" => self.files.load(url),
            #[cfg(feature = "client")]
            "http" | "https" => fetch_remote(url),
            other => Err(AppError::Reference(format!(
                "Unsupported reference scheme '{}' in '{}'",
                other, url
            ))),
        }
    }
}

/// Fetches a remote document. Blocks until the server answers.
#[cfg(feature = "client")]
fn fetch_remote(url: &Url) -> AppResult<Value> {
    tracing::debug!(%url, "Fetching remote document");
    let mut response = ureq::get(url.as_str())
        .call()
        .map_err(|e| AppError::Reference(format!("Failed to fetch '{}': {}", url, e)))?;
    let text = response
        .body_mut()
        .read_to_string()
        .map_err(|e| AppError::Reference(format!("Failed to read '{}': {}", url, e)))?;
    mockoon_sync_core::oas::parse_document(&text, url.path())
}
