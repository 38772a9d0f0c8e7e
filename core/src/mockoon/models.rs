#![deny(missing_docs)]

//! # Mockoon Models
//!
//! Typed view of a Mockoon environment file. Only the fields the transformation
//! reads or writes are modelled; everything else is carried in `extra` maps so
//! the file round-trips.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A Mockoon environment document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Shared data buckets.
    #[serde(default)]
    pub data: Vec<DataBucket>,

    /// Mock routes.
    #[serde(default)]
    pub routes: Vec<Route>,

    /// Remaining environment fields (uuid, name, port, folders, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Environment {
    /// Parses an environment from JSON text.
    pub fn from_json(text: &str) -> AppResult<Self> {
        serde_json::from_str(text).map_err(|e| {
            AppError::InvalidDocument(format!("Failed to parse Mockoon environment: {}", e))
        })
    }

    /// Serializes the environment pretty-printed with 2-space indentation.
    pub fn to_pretty_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A named blob of shared data the mock server can reference at request time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataBucket {
    /// Internal identifier.
    #[serde(default)]
    pub uuid: String,
    /// Short identifier used by `databucketID` and templating helpers.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Free-form documentation.
    #[serde(default)]
    pub documentation: String,
    /// Serialized content.
    #[serde(default)]
    pub value: String,
}

/// A mock route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Lower-case HTTP method.
    #[serde(default)]
    pub method: String,

    /// Path without leading slash, parameters as `:name`.
    #[serde(default)]
    pub endpoint: String,

    /// Response variants, selected by rules at request time.
    #[serde(default)]
    pub responses: Vec<RouteResponse>,

    /// Remaining route fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One canned response of a route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    /// HTTP status code returned by this variant.
    #[serde(rename = "statusCode")]
    pub status_code: u16,

    /// Selection rules.
    #[serde(default)]
    pub rules: Vec<Rule>,

    /// How `rules` combine.
    #[serde(
        rename = "rulesOperator",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub rules_operator: Option<RulesOperator>,

    /// Data bucket linked to this response.
    #[serde(
        rename = "databucketID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub databucket_id: Option<String>,

    /// Response body (may contain templating).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Remaining response fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Logical combination of a response's rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RulesOperator {
    /// Any rule matches.
    Or,
    /// All rules match.
    And,
}

/// A single request matching condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Which part of the request is inspected.
    pub target: RuleTarget,
    /// Header name, JSON path, property... depending on `target`.
    #[serde(default)]
    pub modifier: String,
    /// Expected value.
    #[serde(default)]
    pub value: String,
    /// Negates the rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invert: Option<bool>,
    /// Comparison.
    pub operator: RuleOperator,
}

/// Request part a rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum RuleTarget {
    Body,
    Query,
    Header,
    Cookie,
    Params,
    Path,
    Method,
    RequestNumber,
    GlobalVar,
    DataBucket,
    Templating,
}

/// Rule comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum RuleOperator {
    #[serde(rename = "equals")]
    Equals,
    #[serde(rename = "regex")]
    Regex,
    #[serde(rename = "regex_i")]
    RegexI,
    #[serde(rename = "null")]
    Null,
    #[serde(rename = "empty_array")]
    EmptyArray,
    #[serde(rename = "array_includes")]
    ArrayIncludes,
    /// Validates the target against a JSON schema held in a data bucket.
    #[serde(rename = "valid_json_schema")]
    ValidJsonSchema,
}
