#![deny(missing_docs)]

//! # Document Loading
//!
//! Fetches documents addressed by `$ref` targets. The core only reads from the
//! filesystem; other schemes are supplied by the caller through [`DocumentLoader`].

use crate::error::{AppError, AppResult};
use serde_json::Value;
use std::fs;
use std::path::Path;
use url::Url;

/// Interface for fetching a whole document by its absolute URL (no fragment).
///
/// Abstracted so callers can add remote schemes and tests can serve documents from memory.
pub trait DocumentLoader {
    /// Loads and parses the document at `url`.
    fn load(&self, url: &Url) -> AppResult<Value>;
}

/// Loads `file://` documents from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl DocumentLoader for FileLoader {
    fn load(&self, url: &Url) -> AppResult<Value> {
        if url.scheme() != "file" {
            return Err(AppError::Reference(format!(
                "Unsupported reference scheme '{}' in '{}'",
                url.scheme(),
                url
            )));
        }
        let path = url
            .to_file_path()
            .map_err(|_| AppError::Reference(format!("Invalid file URL '{}'", url)))?;
        let text = fs::read_to_string(&path).map_err(|e| {
            AppError::Reference(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        parse_document(&text, url.path())
    }
}

/// Parses document text as YAML when `location` ends in `.yaml`/`.yml`, JSON otherwise.
pub fn parse_document(text: &str, location: &str) -> AppResult<Value> {
    let lower = location.to_ascii_lowercase();
    if lower.ends_with(".yaml") || lower.ends_with(".yml") {
        Ok(serde_yaml::from_str(text)?)
    } else {
        Ok(serde_json::from_str(text)?)
    }
}

/// Builds the absolute `file://` URL of a local path.
pub fn file_url(path: &Path) -> AppResult<Url> {
    let absolute = fs::canonicalize(path)?;
    Url::from_file_path(&absolute).map_err(|_| {
        AppError::General(format!(
            "Cannot express '{}' as a file URL",
            absolute.display()
        ))
    })
}
