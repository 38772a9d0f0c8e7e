#![deny(missing_docs)]

//! # Sync Command
//!
//! Implements the pipeline: OpenAPI -> dereferenced schemas -> Mockoon environment.
//!
//! 1. **Inputs**: both files must exist.
//! 2. **Dereference**: the OpenAPI document is loaded and every `$ref` resolved.
//! 3. **Transform**: buckets, rules and bodies are applied to the environment in memory.
//! 4. **Write**: the environment file is overwritten once, at the very end.

use crate::error::{CliError, CliResult};
use crate::loader::SchemeLoader;
use mockoon_sync_core::{
    component_schemas, transform, BucketIdentity, CircularRefPolicy, DerefOptions, Environment,
    FixedIdGenerator, IdGenerator, OpenApiDocument, RandomIdGenerator, SchemaResolver,
    TransformOptions, TransformReport, DEFAULT_BUCKET_ID, STATUS_HEADER,
};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Arguments for the sync command.
#[derive(clap::Args, Debug, Clone)]
pub struct SyncArgs {
    /// Path to the OpenAPI document (JSON or YAML).
    #[clap(long, env = "MOCKOON_SYNC_OPENAPI")]
    pub openapi: PathBuf,

    /// Path to the Mockoon environment file. Overwritten in place.
    #[clap(long, env = "MOCKOON_SYNC_ENVIRONMENT")]
    pub mockoon: PathBuf,

    /// Id shared by every generated data bucket.
    #[clap(long, env = "MOCKOON_SYNC_BUCKET_ID", default_value = DEFAULT_BUCKET_ID)]
    pub bucket_id: String,

    /// Fixed uuid for the data buckets (random when omitted).
    #[clap(long, env = "MOCKOON_SYNC_BUCKET_UUID")]
    pub bucket_uuid: Option<String>,

    /// Request header used to select a response by status code.
    #[clap(long, default_value = STATUS_HEADER)]
    pub status_header: String,

    /// What to do with circular `$ref`s.
    #[clap(long, value_enum, default_value_t = CircularArg::Error)]
    pub circular: CircularArg,

    /// Print the updated environment instead of writing it.
    #[clap(long)]
    pub dry_run: bool,
}

/// Circular `$ref` handling.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircularArg {
    /// Fail the run.
    Error,
    /// Keep the `$ref` where the cycle closes.
    Ignore,
}

impl From<CircularArg> for CircularRefPolicy {
    fn from(arg: CircularArg) -> Self {
        match arg {
            CircularArg::Error => CircularRefPolicy::Error,
            CircularArg::Ignore => CircularRefPolicy::Ignore,
        }
    }
}

/// Executes the sync pipeline.
///
/// Every fatal error surfaces before the environment file is touched.
pub fn execute(args: &SyncArgs) -> CliResult<TransformReport> {
    for input in [&args.openapi, &args.mockoon] {
        if !input.exists() {
            return Err(CliError::MissingInput(input.clone()));
        }
    }

    let mut environment = Environment::from_json(&fs::read_to_string(&args.mockoon)?)?;

    let loader = SchemeLoader::default();
    let mut resolver = SchemaResolver::new(
        &loader,
        DerefOptions {
            circular: args.circular.into(),
        },
    );
    let (base, raw) = resolver.load_root(&args.openapi)?;
    let dereferenced = resolver.dereference(&raw, &base)?;
    let schemas = component_schemas(&dereferenced)?;
    let openapi = OpenApiDocument::from_value(&raw)?;

    let generator: Box<dyn IdGenerator> = match &args.bucket_uuid {
        Some(uuid) => Box::new(FixedIdGenerator::new(uuid.clone())),
        None => Box::new(RandomIdGenerator),
    };
    let identity = BucketIdentity::new(args.bucket_id.clone(), generator.as_ref());
    let options = TransformOptions::new(identity).with_status_header(args.status_header.clone());

    let report = transform(&openapi, &schemas, &mut environment, &options)?;
    let output = environment.to_pretty_json()?;

    if args.dry_run {
        println!("{}", output);
        return Ok(report);
    }

    fs::write(&args.mockoon, output)?;
    info!(path = %args.mockoon.display(), "Environment written");
    println!(
        "Updated {:?} with OpenAPI responses and rules.",
        args.mockoon
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::path::Path;
    use tempfile::tempdir;

    const OPENAPI: &str = r##"{
  "openapi": "3.0.3",
  "paths": {
    "/pets": {
      "post": {
        "requestBody": {
          "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } } }
        },
        "responses": {
          "201": { "content": { "application/json": { "example": { "name": "{{faker 'animal.dog'}}" } } } },
          "400": { "content": { "application/json": { "example": { "error": "invalid" } } } }
        }
      }
    }
  },
  "components": { "schemas": { "Pet": { "type": "object", "required": ["name"] } } }
}"##;

    const ENVIRONMENT: &str = r#"{
  "uuid": "env",
  "data": [],
  "routes": [
    {
      "method": "post",
      "endpoint": "pets",
      "responses": [
        { "statusCode": 201, "rules": [], "body": "" },
        { "statusCode": 400, "rules": [], "body": "" }
      ]
    }
  ]
}"#;

    fn args(dir: &Path) -> SyncArgs {
        SyncArgs {
            openapi: dir.join("openapi.json"),
            mockoon: dir.join("environment.json"),
            bucket_id: DEFAULT_BUCKET_ID.to_string(),
            bucket_uuid: Some("fixed-uuid".to_string()),
            status_header: STATUS_HEADER.to_string(),
            circular: CircularArg::Error,
            dry_run: false,
        }
    }

    #[test]
    fn test_execute_rewrites_environment() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("openapi.json"), OPENAPI).unwrap();
        fs::write(dir.path().join("environment.json"), ENVIRONMENT).unwrap();

        let report = execute(&args(dir.path())).unwrap();
        assert_eq!(report.updated_responses, 2);
        assert!(report.diagnostics.is_empty());

        let written = fs::read_to_string(dir.path().join("environment.json")).unwrap();
        assert!(written.starts_with("{\n  \""));
        let env: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(env["uuid"], "env");
        assert_eq!(env["data"][0]["name"], "Pet");
        assert_eq!(env["data"][0]["uuid"], "fixed-uuid");
        assert_eq!(env["data"][0]["id"], "abc123");
        assert_eq!(
            env["routes"][0]["responses"][0]["body"],
            r#"{"name":"{{faker 'animal.dog'}}"}"#
        );
        assert_eq!(env["routes"][0]["responses"][1]["databucketID"], "abc123");
        assert_eq!(
            env["routes"][0]["responses"][1]["rules"][1]["operator"],
            "valid_json_schema"
        );
    }

    #[test]
    fn test_execute_missing_openapi() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("environment.json"), ENVIRONMENT).unwrap();

        let err = execute(&args(dir.path())).unwrap_err();
        assert!(matches!(err, CliError::MissingInput(_)));
        assert!(format!("{}", err).contains("openapi.json"));
    }

    #[test]
    fn test_execute_missing_environment() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("openapi.json"), OPENAPI).unwrap();

        let err = execute(&args(dir.path())).unwrap_err();
        assert!(format!("{}", err).contains("environment.json"));
    }

    #[test]
    fn test_execute_dry_run_leaves_file_alone() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("openapi.json"), OPENAPI).unwrap();
        fs::write(dir.path().join("environment.json"), ENVIRONMENT).unwrap();

        let mut args = args(dir.path());
        args.dry_run = true;
        execute(&args).unwrap();

        let written = fs::read_to_string(dir.path().join("environment.json")).unwrap();
        assert_eq!(written, ENVIRONMENT);
    }

    #[test]
    fn test_execute_dereference_failure_does_not_write() {
        let dir = tempdir().unwrap();
        let broken = OPENAPI.replace("#/components/schemas/Pet", "#/components/schemas/Gone");
        fs::write(dir.path().join("openapi.json"), broken).unwrap();
        fs::write(dir.path().join("environment.json"), ENVIRONMENT).unwrap();

        let err = execute(&args(dir.path())).unwrap_err();
        assert!(matches!(err, CliError::Core(_)));

        let written = fs::read_to_string(dir.path().join("environment.json")).unwrap();
        assert_eq!(written, ENVIRONMENT);
    }

    #[test]
    fn test_circular_arg_maps_to_policy() {
        assert_eq!(
            CircularRefPolicy::from(CircularArg::Ignore),
            CircularRefPolicy::Ignore
        );
        assert_eq!(
            CircularRefPolicy::from(CircularArg::Error),
            CircularRefPolicy::Error
        );
    }
}
