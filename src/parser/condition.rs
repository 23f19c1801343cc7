//! WHERE conditions and delete-filter binding conditions.
//!
//! ```text
//! Condition = Clause ("AND" Clause)*
//! Clause    = JSONObject | Ident "=" JSONValue | Ident "IN" JSONArray
//! ```

use serde_json::Value;

use crate::{
    ast::Condition,
    error::DmlError,
    json,
    lexer::{accept_keyword, is_identifier, next_identifier, skip_blank, Keyword},
};

fn parse_object_clause(buf: &str) -> Result<(Condition, &str), DmlError> {
    let (value, rest) = json::parse_value(buf)?;
    let Value::Object(object) = value else {
        return Err(DmlError::syntax("expected a JSON object", buf));
    };
    if object.is_empty() {
        return Err(DmlError::syntax("condition object is empty", buf));
    }

    let mut condition = Condition::new();
    for (field, value) in object {
        if !is_identifier(&field) {
            return Err(DmlError::syntax(
                format!("condition field {field:?} is not an identifier"),
                buf,
            ));
        }
        condition.insert(field, value)?;
    }
    Ok((condition, rest))
}

fn parse_equality_clause(buf: &str) -> Result<(String, Value, &str), DmlError> {
    let (field, rest) = next_identifier(buf)?;
    let rest = skip_blank(rest);

    if let Some(after) = rest.strip_prefix('=') {
        let (value, rest) = json::parse_value(skip_blank(after))?;
        return Ok((field.to_string(), value, rest));
    }

    if let Some(after) = accept_keyword(rest, Keyword::In) {
        let after = skip_blank(after);
        let (value, rest) = json::parse_value(after)?;
        if !value.is_array() {
            return Err(DmlError::syntax("expected an array after IN", after));
        }
        return Ok((field.to_string(), value, rest));
    }

    Err(DmlError::syntax("expected '=' or IN", rest))
}

/// Parses an AND-chain of clauses into one condition.
///
/// Clauses merge into a single mapping. Binding a field twice fails with
/// [`DmlError::ClauseDuplicated`]. The returned rest starts right after the
/// last clause.
///
/// # Examples
///
/// ```
/// use dml_lang::parser::condition::parse_condition;
///
/// let (cond, rest) = parse_condition(r#"{"a":1} AND b="x";"#).unwrap();
/// assert_eq!(cond.len(), 2);
/// assert_eq!(rest, ";");
/// ```
pub fn parse_condition(buf: &str) -> Result<(Condition, &str), DmlError> {
    let mut condition = Condition::new();
    let mut rest = buf;

    loop {
        rest = skip_blank(rest);
        if rest.starts_with('{') {
            let (object, r) = parse_object_clause(rest)?;
            condition.merge(object)?;
            rest = r;
        } else {
            let (field, value, r) = parse_equality_clause(rest)?;
            condition.insert(field, value)?;
            rest = r;
        }

        match accept_keyword(skip_blank(rest), Keyword::And) {
            Some(after) => rest = after,
            None => return Ok((condition, rest)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_chain() {
        let (cond, rest) = parse_condition(r#"a=1 and b = "x" WHERE"#).unwrap();
        assert_eq!(cond.get("a"), Some(&json!(1)));
        assert_eq!(cond.get("b"), Some(&json!("x")));
        assert_eq!(rest, " WHERE");
    }

    #[test]
    fn test_duplicate_clause() {
        let err = parse_condition("a=1 AND a=2;").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ClauseDuplicated);

        let err = parse_condition(r#"{"a":1} AND a=2;"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ClauseDuplicated);
    }

    #[test]
    fn test_objects_merge() {
        let (cond, _) = parse_condition(r#"{"a":1} AND {"b":2}"#).unwrap();
        assert_eq!(cond.len(), 2);
    }

    #[test]
    fn test_in_clause() {
        let (cond, rest) = parse_condition(r#"v IN ["us","ca"],"#).unwrap();
        assert_eq!(cond.get("v"), Some(&json!(["us", "ca"])));
        assert_eq!(rest, ",");

        let err = parse_condition("v IN 1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_invalid_objects() {
        assert_eq!(parse_condition("{}").unwrap_err().kind(), ErrorKind::Syntax);
        assert_eq!(
            parse_condition(r#"{"1a":1}"#).unwrap_err().kind(),
            ErrorKind::Syntax
        );
    }

    #[test]
    fn test_dangling_and() {
        assert!(parse_condition("a=1 AND;").is_err());
        assert!(parse_condition("a;").is_err());
    }
}
