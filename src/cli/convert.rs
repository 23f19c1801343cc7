//! Statement to JSON conversion for downstream consumers

use serde_json::Value;

use super::CliError;
use crate::Statement;

/// Converts parsed statements to a JSON array, one object per statement.
pub fn statements_to_json(statements: &[Statement]) -> Result<Value, CliError> {
    Ok(serde_json::to_value(statements)?)
}
