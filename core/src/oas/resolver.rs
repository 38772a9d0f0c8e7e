#![deny(missing_docs)]

//! # Schema Resolver
//!
//! Full dereferencing of an OpenAPI document: every `$ref` (local or in another
//! document) is replaced by a copy of its target, recursively, so the result
//! carries no indirection.
//!
//! References resolve against the URL of the document they appear in.
//! Documents are loaded once per run and cached by URL.

use crate::error::{AppError, AppResult};
use crate::oas::loader::{file_url, DocumentLoader};
use crate::oas::models::NamedSchemas;
use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;
use url::Url;

/// What to do when a `$ref` points back into a schema that is still being expanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CircularRefPolicy {
    /// Abort dereferencing with [`AppError::Reference`].
    #[default]
    Error,
    /// Keep the `$ref` object where the cycle closes.
    Ignore,
}

/// Dereferencing options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerefOptions {
    /// Circular reference handling.
    pub circular: CircularRefPolicy,
}

/// Dereferences documents fetched through a [`DocumentLoader`].
pub struct SchemaResolver<'a> {
    loader: &'a dyn DocumentLoader,
    options: DerefOptions,
    documents: HashMap<Url, Value>,
}

impl<'a> SchemaResolver<'a> {
    /// Creates a resolver with an empty document cache.
    pub fn new(loader: &'a dyn DocumentLoader, options: DerefOptions) -> Self {
        Self {
            loader,
            options,
            documents: HashMap::new(),
        }
    }

    /// Loads the root document at `path`, returning its URL and the raw (unresolved) value.
    pub fn load_root(&mut self, path: &Path) -> AppResult<(Url, Value)> {
        let url = file_url(path)?;
        let raw = self.document(&url)?.clone();
        Ok((url, raw))
    }

    /// Loads and fully dereferences the document at `path`.
    pub fn dereference_file(&mut self, path: &Path) -> AppResult<Value> {
        let (url, raw) = self.load_root(path)?;
        self.dereference(&raw, &url)
    }

    /// Returns a dereferenced copy of `value`, whose relative references resolve against `base`.
    ///
    /// `value` itself is left untouched.
    pub fn dereference(&mut self, value: &Value, base: &Url) -> AppResult<Value> {
        let mut expanding = Vec::new();
        self.walk(value, base, &mut expanding)
    }

    fn walk(&mut self, value: &Value, base: &Url, expanding: &mut Vec<Url>) -> AppResult<Value> {
        match value {
            Value::Object(map) => {
                if let Some(reference) = map.get("$ref").and_then(Value::as_str) {
                    return self.follow(reference, map, base, expanding);
                }
                let mut out = Map::with_capacity(map.len());
                for (key, child) in map {
                    out.insert(key.clone(), self.walk(child, base, expanding)?);
                }
                Ok(Value::Object(out))
            }
            Value::Array(items) => items
                .iter()
                .map(|item| self.walk(item, base, expanding))
                .collect::<AppResult<Vec<_>>>()
                .map(Value::Array),
            other => Ok(other.clone()),
        }
    }

    fn follow(
        &mut self,
        reference: &str,
        node: &Map<String, Value>,
        base: &Url,
        expanding: &mut Vec<Url>,
    ) -> AppResult<Value> {
        let target = base.join(reference).map_err(|e| {
            AppError::Reference(format!("Malformed $ref '{}': {}", reference, e))
        })?;

        if expanding.contains(&target) {
            return match self.options.circular {
                CircularRefPolicy::Error => Err(AppError::Reference(format!(
                    "Circular $ref '{}' (resolved to '{}')",
                    reference, target
                ))),
                CircularRefPolicy::Ignore => {
                    debug!(reference, "Leaving circular $ref in place");
                    Ok(Value::Object(node.clone()))
                }
            };
        }

        let mut document_url = target.clone();
        document_url.set_fragment(None);
        let pointer = target
            .fragment()
            .map(|f| percent_decode_str(f).decode_utf8_lossy().into_owned())
            .unwrap_or_default();

        let resolved = {
            let document = self.document(&document_url)?;
            lookup(document, &pointer)
                .cloned()
                .ok_or_else(|| {
                    AppError::Reference(format!(
                        "Unresolvable $ref '{}': nothing at '{}'",
                        reference, target
                    ))
                })?
        };

        expanding.push(target);
        let expanded = self.walk(&resolved, &document_url, expanding);
        expanding.pop();
        let mut expanded = expanded?;

        // Keys next to `$ref` override the target's own.
        if let Value::Object(out) = &mut expanded {
            for (key, sibling) in node {
                if key == "$ref" {
                    continue;
                }
                let sibling = self.walk(sibling, base, expanding)?;
                out.insert(key.clone(), sibling);
            }
        }

        Ok(expanded)
    }

    fn document(&mut self, url: &Url) -> AppResult<&Value> {
        if !self.documents.contains_key(url) {
            debug!(%url, "Loading referenced document");
            let document = self.loader.load(url)?;
            self.documents.insert(url.clone(), document);
        }
        self.documents
            .get(url)
            .ok_or_else(|| AppError::Reference(format!("Document '{}' not cached", url)))
    }
}

/// Applies a decoded fragment as a JSON Pointer. An empty fragment is the whole document.
fn lookup<'v>(document: &'v Value, pointer: &str) -> Option<&'v Value> {
    if pointer.is_empty() {
        return Some(document);
    }
    if !pointer.starts_with('/') {
        // Plain-name anchors are not supported.
        return None;
    }
    document.pointer(pointer)
}

/// Extracts `components.schemas` from a (dereferenced) document; empty when absent.
pub fn component_schemas(document: &Value) -> AppResult<NamedSchemas> {
    let schemas = match document.get("components").and_then(|c| c.get("schemas")) {
        None | Some(Value::Null) => return Ok(NamedSchemas::new()),
        Some(schemas) => schemas,
    };
    let map = schemas.as_object().ok_or_else(|| {
        AppError::InvalidDocument("'components.schemas' must be an object".into())
    })?;
    Ok(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
}
