#![deny(missing_docs)]

//! # Schema Buckets
//!
//! Packages every named schema component into a Mockoon data bucket so the mock
//! server can validate request bodies against it by name.
//!
//! All buckets of one run share a single `id`/`uuid` pair. Response variants
//! link to that id through `databucketID`, and the validator looks schemas up by
//! bucket name.

use crate::error::AppResult;
use crate::mockoon::DataBucket;
use crate::oas::NamedSchemas;
use uuid::Uuid;

/// Bucket id used when none is configured.
pub const DEFAULT_BUCKET_ID: &str = "abc123";

/// Source of the shared bucket uuid.
///
/// Abstracted so runs can be made deterministic.
pub trait IdGenerator {
    /// Produces a new identifier.
    fn generate(&self) -> String;
}

/// Random v4 uuids.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Always returns the same identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedIdGenerator(String);

impl FixedIdGenerator {
    /// Creates a generator returning `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl IdGenerator for FixedIdGenerator {
    fn generate(&self) -> String {
        self.0.clone()
    }
}

/// The identifier pair shared by every bucket of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketIdentity {
    /// Short id referenced by `databucketID`.
    pub id: String,
    /// Bucket uuid.
    pub uuid: String,
}

impl BucketIdentity {
    /// Draws the uuid once from `generator`.
    pub fn new(id: impl Into<String>, generator: &dyn IdGenerator) -> Self {
        Self {
            id: id.into(),
            uuid: generator.generate(),
        }
    }
}

/// Builds one bucket per schema, in schema order.
///
/// `value` is the compact JSON of the (already dereferenced) schema.
pub fn build_buckets(
    schemas: &NamedSchemas,
    identity: &BucketIdentity,
) -> AppResult<Vec<DataBucket>> {
    schemas
        .iter()
        .map(|(name, schema)| -> AppResult<DataBucket> {
            Ok(DataBucket {
                uuid: identity.uuid.clone(),
                id: identity.id.clone(),
                name: name.clone(),
                documentation: String::new(),
                value: serde_json::to_string(schema)?,
            })
        })
        .collect()
}
