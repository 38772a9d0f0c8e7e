//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Everything in here is fatal for a run: the caller aborts before the
/// environment file is written.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// JSON (de)serialization failure.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// YAML deserialization failure.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// A `$ref` could not be dereferenced (malformed, missing target, unreachable or circular).
    #[from(ignore)]
    #[display("Reference Error: {_0}")]
    Reference(String),

    /// A document does not have the shape we expect on read.
    #[from(ignore)]
    #[display("Invalid Document: {_0}")]
    InvalidDocument(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
