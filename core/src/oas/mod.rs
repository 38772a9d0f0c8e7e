#![deny(missing_docs)]

//! # OpenAPI Module
//!
//! - **models**: Typed view of the OpenAPI document (paths, operations, responses).
//! - **loader**: Fetching and parsing documents addressed by `$ref`.
//! - **resolver**: Full `$ref` dereferencing.
//! - **ref_utils**: Name extraction from `$ref` strings.

pub mod loader;
pub mod models;
pub mod ref_utils;
pub mod resolver;

pub use loader::{file_url, parse_document, DocumentLoader, FileLoader};
pub use models::{
    MediaType, NamedSchemas, OpenApiDocument, Operation, PathItem, RefOr, RequestBody, Response,
};
pub use resolver::{component_schemas, CircularRefPolicy, DerefOptions, SchemaResolver};
