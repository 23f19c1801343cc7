//! CLI support for dml-lang
//!
//! Provides programmatic access to the `dml` commands so other tools can
//! check and canonicalize change events without spawning a process.

mod check;
mod convert;

pub use check::{execute_check, CheckMode, CheckOptions, CheckResult};
pub use convert::statements_to_json;

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Statement parse error
    #[error("Parse error: {0}")]
    Parse(crate::DmlError),

    /// Statement validation error, with the index of the statement
    #[error("Statement {index} is invalid: {source}")]
    Invalid {
        index: usize,
        source: crate::DmlError,
    },

    /// Canonical encoding error
    #[error("Encode error: {0}")]
    Encode(crate::DmlError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No input provided
    #[error("No input provided. Pass statements as an argument or pipe them to stdin.")]
    NoInput,
}
