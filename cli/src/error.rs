#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use mockoon_sync_core::AppError;
use std::path::PathBuf;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// An input file does not exist.
    #[from(ignore)]
    #[display("Input file not found: {}", _0.display())]
    MissingInput(PathBuf),

    /// Failure inside the transformation (dereferencing, parsing, serialization).
    #[display("{}", _0)]
    Core(AppError),

    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_message() {
        let err = CliError::MissingInput(PathBuf::from("openapi.json"));
        assert_eq!(format!("{}", err), "Input file not found: openapi.json");
    }

    #[test]
    fn test_core_error_passes_message_through() {
        let err: CliError = AppError::Reference("Circular $ref 'x'".into()).into();
        assert_eq!(format!("{}", err), "Reference Error: Circular $ref 'x'");
    }
}
