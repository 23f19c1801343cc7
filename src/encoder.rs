//! Canonical DML serialization.
//!
//! The encoder writes statements back in the grammar the parser reads, in a
//! single deterministic form so that equal statements encode to equal text.
//!
//! # Canonical form
//!
//! - **No optional whitespace** - one space around keywords and the entity,
//!   none inside assignment lists or JSON values
//! - **Sorted assignments** - by path text, then by item text for repeated
//!   DELETE paths
//! - **Sorted objects** - JSON object keys in lexicographic order
//! - **Compact WHERE** - `field=value` for one field, one JSON object otherwise
//! - **Concatenation** - statements follow each other with no separator
//!
//! # Examples
//!
//! ```
//! use dml_lang::{encode, parse_str};
//!
//! let statements = parse_str("set feedbacks  b = 2 , a = 1 where id = 1 ;").unwrap();
//! assert_eq!(
//!     encode(&statements[0]).unwrap(),
//!     "SET feedbacks a=1,b=2 WHERE id=1;"
//! );
//! ```

use std::io::Write;

use serde_json::Value;

use crate::{
    ast::{AssignmentValue, Condition, DeleteItem, DeleteTarget, FieldPath, Mutation, Statement},
    error::DmlError,
    json::{quote, to_json_string},
    validator,
    value::TypedArray,
};

pub struct Encoder {
    out: String,
}

impl Encoder {
    pub fn new() -> Self {
        Encoder { out: String::new() }
    }

    pub fn finish(self) -> String {
        self.out
    }

    /// Appends the canonical form of `stmt`.
    ///
    /// # Errors
    ///
    /// The first validation failure of `stmt`; nothing is appended then.
    pub fn statement(&mut self, stmt: &Statement) -> Result<(), DmlError> {
        if let Some(err) = validator::validate(stmt).into_iter().next() {
            return Err(err);
        }

        self.out.push_str(stmt.operation().keyword().as_str());
        self.out.push(' ');
        self.out.push_str(&stmt.entity);

        let assignments = match &stmt.mutation {
            Mutation::Set(assignments) => assignments
                .iter()
                .map(|(path, value)| print_assignment(path, value))
                .collect::<Vec<_>>(),
            Mutation::Delete(items) => print_delete_items(items),
        };
        if !assignments.is_empty() {
            self.out.push(' ');
            self.out.push_str(&assignments.join(","));
        }

        self.out.push_str(" WHERE ");
        self.out.push_str(&print_condition(&stmt.condition));
        self.out.push(';');
        Ok(())
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

fn print_typed(typed: &TypedArray) -> String {
    to_json_string(&typed.to_json())
}

fn print_assignment(path: &FieldPath, value: &AssignmentValue) -> String {
    let rhs = match value {
        AssignmentValue::Scalar(scalar) => to_json_string(&scalar.to_json()),
        AssignmentValue::Object(object) => to_json_string(&object.clone().into()),
        AssignmentValue::Array(array) => to_json_string(&array.clone().into()),
        AssignmentValue::Append(typed) => format!("...{}", print_typed(typed)),
        AssignmentValue::Prepend(typed) => format!("{}...", print_typed(typed)),
    };
    format!("{path}={rhs}")
}

/// `v=<json>` for a single value, `v IN [...]` otherwise.
fn print_binding(variable: &str, values: &TypedArray) -> String {
    let elements = values.to_values();
    match elements.as_slice() {
        [single] => format!("{variable}={}", to_json_string(single)),
        _ => format!("{variable} IN {}", print_typed(values)),
    }
}

fn print_delete_item(item: &DeleteItem) -> String {
    let path = &item.path;
    match &item.target {
        DeleteTarget::DeleteKey => path.to_string(),
        DeleteTarget::KeyFilter { keys } => match keys.as_slice() {
            [key] => format!("{path}[k]:k={}", quote(key)),
            _ => format!("{path}[k]:k IN {}", to_json_string(&keys.clone().into())),
        },
        DeleteTarget::ValueFilter { values } => {
            format!("{path}[_]=>v:{}", print_binding("v", values))
        }
        DeleteTarget::KeyValueFilter { key, values } => format!(
            "{path}[k]=>v:k={} AND {}",
            quote(key),
            print_binding("v", values)
        ),
    }
}

fn print_delete_items(items: &[DeleteItem]) -> Vec<String> {
    let mut printed: Vec<(&FieldPath, String)> = items
        .iter()
        .map(|item| (&item.path, print_delete_item(item)))
        .collect();
    printed.sort();
    printed.into_iter().map(|(_, text)| text).collect()
}

fn print_condition(condition: &Condition) -> String {
    let mut fields = condition.iter();
    match (fields.next(), fields.next()) {
        (Some((field, value)), None) => format!("{field}={}", to_json_string(value)),
        _ => to_json_string(&Value::Object(
            condition
                .iter()
                .map(|(field, value)| (field.clone(), value.clone()))
                .collect(),
        )),
    }
}

/// Canonical text of one statement.
pub fn encode(stmt: &Statement) -> Result<String, DmlError> {
    let mut encoder = Encoder::new();
    encoder.statement(stmt)?;
    Ok(encoder.finish())
}

/// Canonical text of `statements`, concatenated.
pub fn encode_all(statements: &[Statement]) -> Result<String, DmlError> {
    let mut encoder = Encoder::new();
    for stmt in statements {
        encoder.statement(stmt)?;
    }
    Ok(encoder.finish())
}

/// Writes `statements` to `writer` one at a time.
///
/// Stops at the first invalid statement. Statements written before it stay
/// written; callers that need all-or-nothing output should encode into a
/// buffer with [`encode_all`] first.
pub fn encode_to<W: Write>(writer: &mut W, statements: &[Statement]) -> Result<(), DmlError> {
    let mut bytes = 0;
    for (index, stmt) in statements.iter().enumerate() {
        let text = encode(stmt).inspect_err(|e| {
            tracing::debug!(error = %e, index, "DML encode failed");
        })?;
        writer.write_all(text.as_bytes())?;
        bytes += text.len();
    }
    tracing::debug!(statements = statements.len(), bytes, "encoded DML");
    Ok(())
}
