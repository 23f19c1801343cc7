//! Embedded JSON values.
//!
//! JSON literals may appear at several points of the grammar and are followed
//! by more DML text, so they are read as a prefix of the remaining input.
//! Arrays, objects and strings are self-delimiting and go through serde_json's
//! stream deserializer, whose byte offset marks the end of the literal. Bare
//! literals (numbers, `true`, `false`, `null`) are delimited by the scanner
//! first, because serde_json rejects them when followed by characters like
//! `;`.

use serde_json::{Deserializer, Value};

use crate::error::DmlError;

fn is_bare_literal_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '+' | '.')
}

/// Parses one JSON value at the start of `buf`.
pub fn parse_value(buf: &str) -> Result<(Value, &str), DmlError> {
    match buf.chars().next() {
        None => Err(DmlError::syntax("expected a JSON value", buf)),
        Some('"' | '[' | '{') => {
            let mut stream = Deserializer::from_str(buf).into_iter::<Value>();
            match stream.next() {
                Some(Ok(value)) => {
                    let rest = buf
                        .get(stream.byte_offset()..)
                        .ok_or_else(|| DmlError::syntax("malformed JSON", buf))?;
                    Ok((value, rest))
                }
                Some(Err(e)) => Err(DmlError::syntax(format!("malformed JSON: {e}"), buf)),
                None => Err(DmlError::syntax("expected a JSON value", buf)),
            }
        }
        Some(_) => {
            let end = buf
                .find(|ch: char| !is_bare_literal_char(ch))
                .unwrap_or(buf.len());
            if end == 0 {
                return Err(DmlError::syntax("expected a JSON value", buf));
            }
            let value = serde_json::from_str(&buf[..end])
                .map_err(|e| DmlError::syntax(format!("malformed JSON: {e}"), buf))?;
            Ok((value, &buf[end..]))
        }
    }
}

/// Parses a JSON string literal at the start of `buf`, unescaped.
pub fn parse_quoted(buf: &str) -> Result<(String, &str), DmlError> {
    if !buf.starts_with('"') {
        return Err(DmlError::syntax("expected a quoted string", buf));
    }
    match parse_value(buf)? {
        (Value::String(s), rest) => Ok((s, rest)),
        _ => Err(DmlError::syntax("expected a quoted string", buf)),
    }
}

/// Compact JSON text of `value`.
pub fn to_json_string(value: &Value) -> String {
    // Display on serde_json::Value is the compact serializer and cannot fail.
    value.to_string()
}

/// JSON string literal for `s`, with escapes.
pub fn quote(s: &str) -> String {
    to_json_string(&Value::String(s.to_string()))
}
