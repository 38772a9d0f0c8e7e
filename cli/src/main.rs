#![deny(missing_docs)]

//! # Mockoon Sync CLI
//!
//! Applies an OpenAPI document to an existing Mockoon environment file:
//! schema data buckets, status selection rules, request validation rules and
//! example bodies.
//!
//! Logs go to stderr (`RUST_LOG` overrides the default `info` level).

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod error;
mod loader;
mod sync;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Augment a Mockoon environment with OpenAPI examples and response rules"
)]
struct Cli {
    #[clap(flatten)]
    sync: sync::SyncArgs,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match sync::execute(&cli.sync) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
