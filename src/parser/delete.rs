//! DELETE targets.
//!
//! ```text
//! DeleteItem = Path ( "[" (Ident | "_") "]" ( "=>" Ident )? ":" Condition )?
//! ```
//!
//! The bracket declares a key variable, `=>` a value variable. The condition
//! after `:` must bind every declared variable and nothing else.

use serde_json::Value;

use crate::{
    ast::{Condition, DeleteTarget, FieldPath},
    error::DmlError,
    lexer::{expect_punct, next_identifier, skip_blank},
    parser::{condition::parse_condition, path::parse_path},
    value::{classify, TypedArray, ValueKind},
};

const IGNORED: &str = "_";

/// A declared filter variable.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Variable {
    Named(String),
    Ignored,
}

fn parse_key_variable(buf: &str) -> Result<(Variable, &str), DmlError> {
    if let Some(rest) = buf.strip_prefix(IGNORED) {
        return Ok((Variable::Ignored, rest));
    }
    let (ident, rest) = next_identifier(buf)?;
    Ok((Variable::Named(ident.to_string()), rest))
}

fn take_bound(condition: &mut Condition, name: &str) -> Result<Value, DmlError> {
    condition
        .take(name)
        .ok_or_else(|| DmlError::UnusedVariable(name.to_string()))
}

fn reject_leftovers(condition: &Condition) -> Result<(), DmlError> {
    match condition.fields().next() {
        Some(field) => Err(DmlError::UnknownVariable(field.clone())),
        None => Ok(()),
    }
}

fn type_error(variable: &str, expected: &'static str, value: &Value) -> DmlError {
    DmlError::TypeCheck {
        variable: variable.to_string(),
        expected,
        found: ValueKind::of(value).name(),
    }
}

/// Keys bound to a key variable: a string or an array of strings.
fn bound_keys(variable: &str, value: Value) -> Result<Vec<String>, DmlError> {
    match value {
        Value::String(key) => Ok(vec![key]),
        Value::Array(elements) => match classify(elements)? {
            TypedArray::Strings(keys) => Ok(keys),
            other => Err(DmlError::TypeCheck {
                variable: variable.to_string(),
                expected: "string",
                found: other.kind().name(),
            }),
        },
        other => Err(type_error(variable, "string", &other)),
    }
}

/// Values bound to a value variable: one scalar or a uniform scalar array.
fn bound_values(variable: &str, value: Value) -> Result<TypedArray, DmlError> {
    match value {
        Value::Array(elements) => {
            let typed = classify(elements)?;
            if !typed.kind().is_scalar() {
                return Err(DmlError::TypeCheck {
                    variable: variable.to_string(),
                    expected: "scalar",
                    found: typed.kind().name(),
                });
            }
            Ok(typed)
        }
        other => match TypedArray::from_scalar(other.clone()) {
            Some(typed) => Ok(typed),
            None => Err(type_error(variable, "scalar", &other)),
        },
    }
}

fn bind(
    key: Variable,
    value: Option<String>,
    mut condition: Condition,
) -> Result<DeleteTarget, DmlError> {
    match (key, value) {
        (Variable::Ignored, None) => Err(DmlError::UnusedVariable(IGNORED.to_string())),
        (Variable::Named(k), None) => {
            let bound = take_bound(&mut condition, &k)?;
            reject_leftovers(&condition)?;
            Ok(DeleteTarget::KeyFilter {
                keys: bound_keys(&k, bound)?,
            })
        }
        (Variable::Ignored, Some(v)) => {
            let bound = take_bound(&mut condition, &v)?;
            reject_leftovers(&condition)?;
            Ok(DeleteTarget::ValueFilter {
                values: bound_values(&v, bound)?,
            })
        }
        (Variable::Named(k), Some(v)) => {
            let bound_key = take_bound(&mut condition, &k)?;
            let bound_value = take_bound(&mut condition, &v)?;
            reject_leftovers(&condition)?;
            let key = match bound_key {
                Value::String(key) => key,
                other => return Err(type_error(&k, "string", &other)),
            };
            Ok(DeleteTarget::KeyValueFilter {
                key,
                values: bound_values(&v, bound_value)?,
            })
        }
    }
}

/// Parses one DELETE item.
///
/// # Examples
///
/// ```
/// use dml_lang::{ast::DeleteTarget, parser::delete::parse_delete_target};
///
/// let (path, target, _) = parse_delete_target(r#"tags[k]:k="a" WHERE"#).unwrap();
/// assert_eq!(path.as_str(), "tags");
/// assert_eq!(target, DeleteTarget::KeyFilter { keys: vec!["a".into()] });
/// ```
pub fn parse_delete_target(buf: &str) -> Result<(FieldPath, DeleteTarget, &str), DmlError> {
    let (path, rest) = parse_path(buf)?;

    let Some(after_bracket) = skip_blank(rest).strip_prefix('[') else {
        return Ok((path, DeleteTarget::DeleteKey, rest));
    };

    let (key, rest) = parse_key_variable(skip_blank(after_bracket))?;
    let rest = expect_punct(skip_blank(rest), "]")?;
    let rest = skip_blank(rest);

    let (value, rest) = match rest.strip_prefix("=>") {
        Some(after) => {
            let (ident, rest) = next_identifier(skip_blank(after))?;
            if key == Variable::Named(ident.to_string()) {
                return Err(DmlError::syntax(
                    format!("variable {ident:?} declared twice"),
                    after,
                ));
            }
            (Some(ident.to_string()), skip_blank(rest))
        }
        None => (None, rest),
    };

    let rest = expect_punct(rest, ":")?;
    let (condition, rest) = parse_condition(rest)?;
    let target = bind(key, value, condition)?;
    Ok((path, target, rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::Number;

    fn target(src: &str) -> Result<DeleteTarget, DmlError> {
        parse_delete_target(src).map(|(_, target, _)| target)
    }

    #[test]
    fn test_whole_key() {
        let (path, target, rest) = parse_delete_target("a.b, c").unwrap();
        assert_eq!(path.as_str(), "a.b");
        assert_eq!(target, DeleteTarget::DeleteKey);
        assert_eq!(rest, ", c");
    }

    #[test]
    fn test_key_set() {
        assert_eq!(
            target(r#"m[k]:k IN ["a","b"]"#).unwrap(),
            DeleteTarget::KeyFilter {
                keys: vec!["a".into(), "b".into()]
            }
        );
    }

    #[test]
    fn test_value_filter() {
        assert_eq!(
            target("m[_]=>v:v IN [1,2]").unwrap(),
            DeleteTarget::ValueFilter {
                values: TypedArray::Numbers(vec![Number::from(1), Number::from(2)])
            }
        );
    }

    #[test]
    fn test_key_value_filter() {
        assert_eq!(
            target(r#"m[k]=>v:k="country" AND v IN ["us","ca"]"#).unwrap(),
            DeleteTarget::KeyValueFilter {
                key: "country".into(),
                values: TypedArray::Strings(vec!["us".into(), "ca".into()])
            }
        );
    }

    #[test]
    fn test_unused_and_unknown_variables() {
        assert_eq!(
            target("m[k]=>v:v=1").unwrap_err().kind(),
            ErrorKind::UnusedVariable
        );
        assert_eq!(
            target(r#"m[_]:k="a""#).unwrap_err().kind(),
            ErrorKind::UnusedVariable
        );
        assert_eq!(
            target(r#"m[k]:k="a" AND x=1"#).unwrap_err().kind(),
            ErrorKind::UnknownVariable
        );
    }

    #[test]
    fn test_type_checks() {
        assert_eq!(target("m[k]:k=1").unwrap_err().kind(), ErrorKind::TypeCheck);
        assert_eq!(
            target("m[k]:k IN [1]").unwrap_err().kind(),
            ErrorKind::TypeCheck
        );
        assert_eq!(
            target(r#"m[k]=>v:k=["a"] AND v=1"#).unwrap_err().kind(),
            ErrorKind::TypeCheck
        );
        assert_eq!(
            target(r#"m[_]=>v:v={"a":1}"#).unwrap_err().kind(),
            ErrorKind::TypeCheck
        );
        assert_eq!(
            target("m[_]=>v:v IN [[1]]").unwrap_err().kind(),
            ErrorKind::TypeCheck
        );
        assert_eq!(
            target("m[_]=>v:v=null").unwrap_err().kind(),
            ErrorKind::TypeCheck
        );
    }

    #[test]
    fn test_same_variable_twice() {
        assert_eq!(
            target("m[k]=>k:k=1").unwrap_err().kind(),
            ErrorKind::Syntax
        );
    }
}
