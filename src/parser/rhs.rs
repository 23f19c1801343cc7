//! Right-hand sides of SET assignments.

use serde_json::Value;

use crate::{
    ast::AssignmentValue,
    error::DmlError,
    json,
    lexer::skip_blank,
    value::classify,
};

const ELLIPSIS: &str = "...";

fn expect_array(value: Value, buf: &str) -> Result<Vec<Value>, DmlError> {
    match value {
        Value::Array(elements) => Ok(elements),
        _ => Err(DmlError::syntax("expected an array literal next to '...'", buf)),
    }
}

/// Parses `"..." Array | Array "..." | JSONValue`.
///
/// # Examples
///
/// ```
/// use dml_lang::{ast::AssignmentValue, parser::rhs::parse_assign_rhs};
///
/// let (value, rest) = parse_assign_rhs(r#"...["x","y"] WHERE"#).unwrap();
/// assert!(matches!(value, AssignmentValue::Append(_)));
/// assert_eq!(rest, " WHERE");
/// ```
pub fn parse_assign_rhs(buf: &str) -> Result<(AssignmentValue, &str), DmlError> {
    if let Some(after) = buf.strip_prefix(ELLIPSIS) {
        let after = skip_blank(after);
        let (value, rest) = json::parse_value(after)?;
        let typed = classify(expect_array(value, after)?)?;
        return Ok((AssignmentValue::Append(typed), rest));
    }

    let (value, rest) = json::parse_value(buf)?;
    if let Value::Array(elements) = value {
        if let Some(rest) = skip_blank(rest).strip_prefix(ELLIPSIS) {
            let typed = classify(elements)?;
            return Ok((AssignmentValue::Prepend(typed), rest));
        }
        return Ok((AssignmentValue::Array(elements), rest));
    }
    Ok((AssignmentValue::from_json(value), rest))
}
