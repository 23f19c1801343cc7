use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::value::TypedArray;

/// Scalar JSON literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Number(n) => Value::Number(n.clone()),
            Scalar::String(s) => Value::String(s.clone()),
        }
    }
}

/// Right-hand side of a SET assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AssignmentValue {
    /// Replace with a scalar
    ///
    /// # Example
    /// ```text
    /// score=3
    /// ```
    Scalar(Scalar),

    /// Replace with an object
    ///
    /// # Example
    /// ```text
    /// meta={"a":1}
    /// ```
    Object(Map<String, Value>),

    /// Replace with an array
    ///
    /// # Example
    /// ```text
    /// labels=["x",1]
    /// ```
    Array(Vec<Value>),

    /// Append to the stored collection
    ///
    /// # Example
    /// ```text
    /// labels=...["x","y"]
    /// ```
    Append(TypedArray),

    /// Prepend to the stored collection
    ///
    /// # Example
    /// ```text
    /// labels=["x","y"]...
    /// ```
    Prepend(TypedArray),
}

impl AssignmentValue {
    /// Plain replacement with a JSON value.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => AssignmentValue::Scalar(Scalar::Null),
            Value::Bool(b) => AssignmentValue::Scalar(Scalar::Bool(b)),
            Value::Number(n) => AssignmentValue::Scalar(Scalar::Number(n)),
            Value::String(s) => AssignmentValue::Scalar(Scalar::String(s)),
            Value::Array(a) => AssignmentValue::Array(a),
            Value::Object(o) => AssignmentValue::Object(o),
        }
    }
}

impl From<Value> for AssignmentValue {
    fn from(value: Value) -> Self {
        AssignmentValue::from_json(value)
    }
}
