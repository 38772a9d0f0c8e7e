#![deny(missing_docs)]

//! # Transformation
//!
//! Applies an OpenAPI document to a Mockoon environment in place:
//!
//! 1. **Buckets**: every named schema becomes a data bucket; the bucket list is replaced.
//! 2. **Routes**: each operation is matched to a route by method and normalized path.
//! 3. **Rules**: each numeric status code with a matching variant gets its selection rules.
//! 4. **Bodies**: the first inline example becomes the variant's body.
//!
//! Unmatched operations are reported, not fatal.

use crate::body::{first_example, render_body};
use crate::buckets::{build_buckets, BucketIdentity};
use crate::error::AppResult;
use crate::matcher::{find_route, normalize_path};
use crate::mockoon::Environment;
use crate::oas::{NamedSchemas, OpenApiDocument};
use crate::rules::{apply_status_rules, request_schema_name, STATUS_HEADER, VALIDATION_STATUS};
use std::fmt;
use tracing::{debug, info, warn};

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Identity shared by all buckets.
    pub identity: BucketIdentity,
    /// Header used by the status selection rule.
    pub status_header: String,
}

impl TransformOptions {
    /// Options with the default status header.
    pub fn new(identity: BucketIdentity) -> Self {
        Self {
            identity,
            status_header: STATUS_HEADER.to_string(),
        }
    }

    /// Overrides the status header.
    pub fn with_status_header(mut self, header: impl Into<String>) -> Self {
        self.status_header = header.into();
        self
    }
}

/// A recoverable condition met while transforming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// No route serves the operation.
    RouteNotFound {
        /// Method as written in the OpenAPI document.
        method: String,
        /// Normalized endpoint.
        endpoint: String,
    },
    /// The matched route has no response variants.
    RouteWithoutResponses {
        /// Method as written in the OpenAPI document.
        method: String,
        /// Normalized endpoint.
        endpoint: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::RouteNotFound { method, endpoint } => {
                write!(f, "No route for method {}, endpoint {}", method, endpoint)
            }
            Diagnostic::RouteWithoutResponses { method, endpoint } => write!(
                f,
                "Route for method {}, endpoint {} has no responses",
                method, endpoint
            ),
        }
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Number of buckets written.
    pub buckets: usize,
    /// Number of response variants that received rules.
    pub updated_responses: usize,
    /// Recoverable conditions, one per skipped operation.
    pub diagnostics: Vec<Diagnostic>,
}

/// Applies `openapi` to `environment`.
///
/// `openapi` is the document as written (its request body `$ref`s name the
/// validation schemas); `schemas` are the dereferenced component schemas.
pub fn transform(
    openapi: &OpenApiDocument,
    schemas: &NamedSchemas,
    environment: &mut Environment,
    options: &TransformOptions,
) -> AppResult<TransformReport> {
    let mut report = TransformReport::default();

    environment.data = build_buckets(schemas, &options.identity)?;
    report.buckets = environment.data.len();

    for (path, method, operation) in openapi.operations() {
        let Some(responses) = operation.responses.as_ref() else {
            continue;
        };

        let endpoint = normalize_path(path);
        let route = match find_route(&mut environment.routes, method, &endpoint) {
            Some(route) if !route.responses.is_empty() => route,
            Some(_) => {
                warn!(method, endpoint = %endpoint, "Route has no responses");
                report.diagnostics.push(Diagnostic::RouteWithoutResponses {
                    method: method.to_string(),
                    endpoint,
                });
                continue;
            }
            None => {
                warn!(method, endpoint = %endpoint, "No route for operation");
                report.diagnostics.push(Diagnostic::RouteNotFound {
                    method: method.to_string(),
                    endpoint,
                });
                continue;
            }
        };

        let request_schema = request_schema_name(openapi, operation);

        for (status, response) in responses {
            let Ok(code) = status.trim().parse::<u16>() else {
                debug!(
                    method,
                    endpoint = %endpoint,
                    status = %status,
                    "Skipping non-numeric status"
                );
                continue;
            };
            let Some(variant) = route
                .responses
                .iter_mut()
                .find(|r| r.status_code == code)
            else {
                debug!(
                    method,
                    endpoint = %endpoint,
                    status = %status,
                    "No response variant for status"
                );
                continue;
            };

            let validation_schema = if code == VALIDATION_STATUS {
                request_schema.as_deref()
            } else {
                None
            };
            apply_status_rules(
                variant,
                status,
                &options.status_header,
                validation_schema,
                &options.identity,
            );

            let example = openapi.response(response).and_then(first_example);
            if let Some(example) = example {
                let enrichment = validation_schema.and_then(|name| schemas.get(name));
                variant.body = Some(render_body(example, enrichment)?);
            }

            debug!(
                method,
                endpoint = %endpoint,
                status = %status,
                "Updated response variant"
            );
            report.updated_responses += 1;
        }
    }

    info!(
        buckets = report.buckets,
        updated = report.updated_responses,
        skipped = report.diagnostics.len(),
        "Transformation finished"
    );
    Ok(report)
}
