#![deny(missing_docs)]

//! # Mockoon Environment Module
//!
//! - **models**: Typed environment, route, response, rule and data bucket definitions.

pub mod models;

pub use models::{
    DataBucket, Environment, Route, RouteResponse, Rule, RuleOperator, RuleTarget, RulesOperator,
};
