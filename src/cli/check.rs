//! Check, format and convert DML input

use super::{statements_to_json, CliError};
use crate::{encode_all, parse_str, Statement};

/// What to produce from valid input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckMode {
    /// Only report how many statements are valid
    #[default]
    Validate,
    /// Canonical DML text
    Format,
    /// Statements as JSON
    Json,
}

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// DML source text
    pub input: Option<String>,
    pub mode: CheckMode,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Every statement parsed and validated
    Valid(usize),
    /// Canonical encoding of the input
    Canonical(String),
    /// JSON rendering of the parsed statements
    Json(serde_json::Value),
}

fn validate_all(statements: &[Statement]) -> Result<(), CliError> {
    for (index, stmt) in statements.iter().enumerate() {
        stmt.validate()
            .map_err(|source| CliError::Invalid { index, source })?;
    }
    Ok(())
}

/// Execute a dml check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let input = options.input.as_deref().ok_or(CliError::NoInput)?;

    let statements = parse_str(input).map_err(CliError::Parse)?;
    validate_all(&statements)?;

    match options.mode {
        CheckMode::Validate => Ok(CheckResult::Valid(statements.len())),
        CheckMode::Format => {
            let text = encode_all(&statements).map_err(CliError::Encode)?;
            Ok(CheckResult::Canonical(text))
        }
        CheckMode::Json => Ok(CheckResult::Json(statements_to_json(&statements)?)),
    }
}
