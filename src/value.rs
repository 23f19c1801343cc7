use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::DmlError;

/// The JSON kind of a value, as seen by the array classifier and the
/// delete-filter type checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Human-readable name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }

    pub fn is_scalar(self) -> bool {
        matches!(self, ValueKind::Bool | ValueKind::Number | ValueKind::String)
    }
}

/// A homogeneous array literal.
///
/// Produced by [`classify`] for append/prepend payloads and delete-filter
/// value lists. Every element shares one JSON kind and no element is `null`.
///
/// # Examples
///
/// ```
/// use dml_lang::value::{classify, TypedArray};
/// use serde_json::json;
///
/// let typed = classify(vec![json!(1), json!(null), json!(3)]).unwrap();
/// assert_eq!(typed.len(), 2);
/// assert!(matches!(typed, TypedArray::Numbers(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum TypedArray {
    Strings(Vec<String>),
    Numbers(Vec<Number>),
    Bools(Vec<bool>),
    Arrays(Vec<Vec<Value>>),
    Objects(Vec<Map<String, Value>>),
}

impl TypedArray {
    pub fn kind(&self) -> ValueKind {
        match self {
            TypedArray::Strings(_) => ValueKind::String,
            TypedArray::Numbers(_) => ValueKind::Number,
            TypedArray::Bools(_) => ValueKind::Bool,
            TypedArray::Arrays(_) => ValueKind::Array,
            TypedArray::Objects(_) => ValueKind::Object,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TypedArray::Strings(v) => v.len(),
            TypedArray::Numbers(v) => v.len(),
            TypedArray::Bools(v) => v.len(),
            TypedArray::Arrays(v) => v.len(),
            TypedArray::Objects(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wraps a single scalar as a one-element array.
    pub fn from_scalar(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(TypedArray::Strings(vec![s])),
            Value::Number(n) => Some(TypedArray::Numbers(vec![n])),
            Value::Bool(b) => Some(TypedArray::Bools(vec![b])),
            _ => None,
        }
    }

    /// The elements as plain JSON values, in order.
    pub fn to_values(&self) -> Vec<Value> {
        match self {
            TypedArray::Strings(v) => v.iter().cloned().map(Value::String).collect(),
            TypedArray::Numbers(v) => v.iter().cloned().map(Value::Number).collect(),
            TypedArray::Bools(v) => v.iter().copied().map(Value::Bool).collect(),
            TypedArray::Arrays(v) => v.iter().cloned().map(Value::Array).collect(),
            TypedArray::Objects(v) => v.iter().cloned().map(Value::Object).collect(),
        }
    }

    pub fn to_json(&self) -> Value {
        Value::Array(self.to_values())
    }
}

/// Classifies an array literal into a [`TypedArray`].
///
/// `null` elements are dropped first. The remaining elements must share a
/// single kind among string, number, bool, array and object.
///
/// # Errors
///
/// - [`DmlError::MissingArrayValues`] when nothing is left after dropping nulls
/// - [`DmlError::ArrayWithMixedTypes`] when two kinds are present
/// - [`DmlError::UnsupportedArrayValue`] when the shared kind cannot be typed
pub fn classify(elements: Vec<Value>) -> Result<TypedArray, DmlError> {
    let elements: Vec<Value> = elements.into_iter().filter(|v| !v.is_null()).collect();

    let Some(first) = elements.first() else {
        return Err(DmlError::MissingArrayValues);
    };
    let kind = ValueKind::of(first);

    if let Some(other) = elements.iter().map(ValueKind::of).find(|k| *k != kind) {
        return Err(DmlError::ArrayWithMixedTypes(kind.name(), other.name()));
    }

    let typed = match kind {
        ValueKind::String => TypedArray::Strings(
            elements
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        ValueKind::Number => TypedArray::Numbers(
            elements
                .into_iter()
                .filter_map(|v| match v {
                    Value::Number(n) => Some(n),
                    _ => None,
                })
                .collect(),
        ),
        ValueKind::Bool => TypedArray::Bools(elements.iter().filter_map(Value::as_bool).collect()),
        ValueKind::Array => TypedArray::Arrays(
            elements
                .into_iter()
                .filter_map(|v| match v {
                    Value::Array(a) => Some(a),
                    _ => None,
                })
                .collect(),
        ),
        ValueKind::Object => TypedArray::Objects(
            elements
                .into_iter()
                .filter_map(|v| match v {
                    Value::Object(o) => Some(o),
                    _ => None,
                })
                .collect(),
        ),
        ValueKind::Null => return Err(DmlError::UnsupportedArrayValue(kind.name())),
    };
    Ok(typed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn classify_numbers() {
        let typed = classify(vec![json!(1), json!(2), json!(3)]).unwrap();
        assert_eq!(
            typed,
            TypedArray::Numbers(vec![Number::from(1), Number::from(2), Number::from(3)])
        );
    }

    #[test]
    fn classify_drops_nulls() {
        let typed = classify(vec![json!(1), Value::Null, json!(3)]).unwrap();
        assert_eq!(typed.kind(), ValueKind::Number);
        assert_eq!(typed.len(), 2);
    }

    #[test]
    fn classify_mixed_is_rejected() {
        let err = classify(vec![json!("a"), json!(2)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArrayWithMixedTypes);
    }

    #[test]
    fn classify_all_null_is_missing_values() {
        let err = classify(vec![Value::Null, Value::Null]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingArrayValues);
        let err = classify(vec![]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingArrayValues);
    }

    #[test]
    fn classify_nested_kinds() {
        let typed = classify(vec![json!([1]), json!(["a", 2])]).unwrap();
        assert_eq!(typed.kind(), ValueKind::Array);

        let typed = classify(vec![json!({"a": 1}), json!({})]).unwrap();
        assert_eq!(typed.kind(), ValueKind::Object);
        assert_eq!(typed.to_json(), json!([{"a": 1}, {}]));
    }

    #[test]
    fn scalar_wrapping() {
        assert_eq!(
            TypedArray::from_scalar(json!(true)),
            Some(TypedArray::Bools(vec![true]))
        );
        assert_eq!(TypedArray::from_scalar(Value::Null), None);
        assert_eq!(TypedArray::from_scalar(json!([1])), None);
    }
}
