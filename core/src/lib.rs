#![deny(missing_docs)]

//! # Mockoon Sync Core
//!
//! Augments an existing Mockoon environment from an OpenAPI document:
//! schema data buckets, status selection rules, request validation rules and
//! example bodies.

/// Shared error types.
pub mod error;

/// OpenAPI models, loading and `$ref` dereferencing.
pub mod oas;

/// Mockoon environment models.
pub mod mockoon;

/// Schema data buckets.
pub mod buckets;

/// Operation to route matching.
pub mod matcher;

/// Response selection rules.
pub mod rules;

/// Example bodies.
pub mod body;

/// The end-to-end transformation.
pub mod transform;

pub use buckets::{
    build_buckets, BucketIdentity, FixedIdGenerator, IdGenerator, RandomIdGenerator,
    DEFAULT_BUCKET_ID,
};
pub use error::{AppError, AppResult};
pub use matcher::{find_route, normalize_path};
pub use mockoon::Environment;
pub use oas::{
    component_schemas, CircularRefPolicy, DerefOptions, DocumentLoader, FileLoader, NamedSchemas,
    OpenApiDocument, SchemaResolver,
};
pub use rules::STATUS_HEADER;
pub use transform::{transform, Diagnostic, TransformOptions, TransformReport};
