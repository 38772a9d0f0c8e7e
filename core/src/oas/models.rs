#![deny(missing_docs)]

//! # OpenAPI Models
//!
//! The slice of an OpenAPI document the transformation reads: paths, operations,
//! request bodies, responses and named component schemas.
//!
//! Schemas stay as raw `serde_json::Value`s since they are only forwarded
//! (into buckets and example enrichment), never interpreted.

use crate::error::{AppError, AppResult};
use crate::oas::ref_utils::extract_component_name;
use indexmap::IndexMap;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// HTTP methods that may key an Operation inside a Path Item.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Named schema components, in document order.
pub type NamedSchemas = IndexMap<String, Value>;

/// A `$ref` object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reference {
    /// The reference string, e.g. `#/components/schemas/User`.
    #[serde(rename = "$ref")]
    pub location: String,
}

/// Either a `$ref` or an inline object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// A reference to a component.
    Ref(Reference),
    /// An inline definition.
    T(T),
}

/// Root of the OpenAPI document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OpenApiDocument {
    /// Path templates mapped to their Path Items.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    /// Reusable components.
    #[serde(default)]
    pub components: Option<Components>,
}

/// The `components` object, limited to the sections operations may point into.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Components {
    /// Named schema definitions (possibly containing `$ref`s).
    #[serde(default)]
    pub schemas: NamedSchemas,

    /// Reusable request bodies.
    #[serde(default, rename = "requestBodies")]
    pub request_bodies: IndexMap<String, RefOr<RequestBody>>,

    /// Reusable responses.
    #[serde(default)]
    pub responses: IndexMap<String, RefOr<Response>>,
}

/// A Path Item: operations keyed by lower-cased HTTP method.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathItem {
    /// Operations in document order. Keys keep the casing used in the document.
    pub operations: IndexMap<String, Operation>,
    /// Every other Path Item field (`parameters`, `summary`, `x-...`).
    pub extras: IndexMap<String, Value>,
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut operations = IndexMap::new();
        let mut extras = IndexMap::new();

        for (key, value) in raw {
            if !HTTP_METHODS.contains(&key.to_lowercase().as_str()) {
                extras.insert(key, value);
                continue;
            }
            let operation = serde_json::from_value::<Operation>(value).map_err(|e| {
                DeError::custom(format!("Failed to parse operation '{}': {}", key, e))
            })?;
            operations.insert(key, operation);
        }

        Ok(Self { operations, extras })
    }
}

/// An Operation: one HTTP method under a path.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Operation {
    /// Optional request body.
    #[serde(default, rename = "requestBody")]
    pub request_body: Option<RefOr<RequestBody>>,

    /// Status code (or `default`) mapped to a Response.
    #[serde(default)]
    pub responses: Option<IndexMap<String, RefOr<Response>>>,
}

/// A Request Body object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestBody {
    /// Media type mapped to its content.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// A Response object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
    /// Media type mapped to its content.
    #[serde(default)]
    pub content: Option<IndexMap<String, MediaType>>,
}

/// A Media Type object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaType {
    /// Schema, inline or `$ref`.
    #[serde(default)]
    pub schema: Option<Value>,

    /// Inline example. A JSON `null` deserializes to `None`.
    #[serde(default)]
    pub example: Option<Value>,
}

impl MediaType {
    /// The `$ref` string of the schema, if the schema is a reference.
    pub fn schema_ref(&self) -> Option<&str> {
        self.schema.as_ref()?.get("$ref")?.as_str()
    }
}

impl OpenApiDocument {
    /// Reads the typed view out of an already parsed document.
    pub fn from_value(raw: &Value) -> AppResult<Self> {
        serde_json::from_value(raw.clone()).map_err(|e| {
            AppError::InvalidDocument(format!("Failed to parse OpenAPI document: {}", e))
        })
    }

    /// Iterates `(path, method, operation)` in document order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, &str, &Operation)> {
        self.paths.iter().flat_map(|(path, item)| {
            item.operations
                .iter()
                .map(move |(method, op)| (path.as_str(), method.as_str(), op))
        })
    }

    /// Follows a local `#/components/requestBodies/*` reference one level.
    pub fn request_body<'a>(&'a self, body: &'a RefOr<RequestBody>) -> Option<&'a RequestBody> {
        match body {
            RefOr::T(b) => Some(b),
            RefOr::Ref(r) => {
                let name = extract_component_name(&r.location, "requestBodies")?;
                match self.components.as_ref()?.request_bodies.get(&name)? {
                    RefOr::T(b) => Some(b),
                    RefOr::Ref(_) => None,
                }
            }
        }
    }

    /// Follows a local `#/components/responses/*` reference one level.
    pub fn response<'a>(&'a self, response: &'a RefOr<Response>) -> Option<&'a Response> {
        match response {
            RefOr::T(r) => Some(r),
            RefOr::Ref(r) => {
                let name = extract_component_name(&r.location, "responses")?;
                match self.components.as_ref()?.responses.get(&name)? {
                    RefOr::T(r) => Some(r),
                    RefOr::Ref(_) => None,
                }
            }
        }
    }
}
