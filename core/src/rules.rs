#![deny(missing_docs)]

//! # Response Rules
//!
//! Selection rules attached to matched response variants.
//!
//! Every variant answers when the client asks for its status code through a
//! header. The 400 variant also answers when the request body fails validation
//! against the operation's request schema; the two triggers combine with `OR`.

use crate::buckets::BucketIdentity;
use crate::mockoon::{RouteResponse, Rule, RuleOperator, RuleTarget, RulesOperator};
use crate::oas::ref_utils::extract_ref_name;
use crate::oas::{OpenApiDocument, Operation};

/// Header carrying the requested status code.
pub const STATUS_HEADER: &str = "X-Mockoon-Response-Status";

/// Status code whose variant also fires on request body validation failures.
pub const VALIDATION_STATUS: u16 = 400;

/// Media type whose request schema drives body validation.
const JSON_MEDIA_TYPE: &str = "application/json";

/// `header(<header>) equals <status>`, with the status as written in the document.
pub fn status_rule(header: &str, status: &str) -> Rule {
    Rule {
        target: RuleTarget::Header,
        modifier: header.to_string(),
        value: status.to_string(),
        invert: None,
        operator: RuleOperator::Equals,
    }
}

/// Matches request bodies that do NOT validate against the schema bucket `schema_name`.
pub fn schema_validation_rule(schema_name: &str) -> Rule {
    Rule {
        target: RuleTarget::Body,
        modifier: String::new(),
        value: schema_name.to_string(),
        invert: Some(true),
        operator: RuleOperator::ValidJsonSchema,
    }
}

/// Name of the schema referenced by the operation's `application/json` request body.
///
/// Returns `None` when there is no body, no JSON content, or an inline schema.
pub fn request_schema_name(document: &OpenApiDocument, operation: &Operation) -> Option<String> {
    let body = document.request_body(operation.request_body.as_ref()?)?;
    let reference = body.content.get(JSON_MEDIA_TYPE)?.schema_ref()?;
    extract_ref_name(reference)
}

/// Replaces the variant's rules for `status`.
///
/// `validation_schema` is only consulted for [`VALIDATION_STATUS`]; when present the
/// variant is linked to the shared bucket and gains the inverted schema rule.
pub fn apply_status_rules(
    response: &mut RouteResponse,
    status: &str,
    header: &str,
    validation_schema: Option<&str>,
    identity: &BucketIdentity,
) {
    response.rules = vec![status_rule(header, status)];
    response.rules_operator = Some(RulesOperator::Or);

    if response.status_code != VALIDATION_STATUS {
        return;
    }
    if let Some(schema_name) = validation_schema {
        response.databucket_id = Some(identity.id.clone());
        response.rules.push(schema_validation_rule(schema_name));
    }
}
