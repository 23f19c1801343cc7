use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DmlError;

/// AND-conjoined equality condition: every field must equal its value.
///
/// Used both as a statement's WHERE clause and as the binding condition of
/// a delete filter. A field can be bound only once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Condition(BTreeMap<String, Value>);

impl Condition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `field` to `value`.
    ///
    /// # Errors
    ///
    /// [`DmlError::ClauseDuplicated`] when `field` is already bound.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Result<(), DmlError> {
        let field = field.into();
        if self.0.contains_key(&field) {
            return Err(DmlError::ClauseDuplicated(field));
        }
        self.0.insert(field, value);
        Ok(())
    }

    /// Builder form of [`Condition::insert`].
    pub fn with(mut self, field: impl Into<String>, value: Value) -> Result<Self, DmlError> {
        self.insert(field, value)?;
        Ok(self)
    }

    /// Moves every binding of `other` into `self`.
    pub fn merge(&mut self, other: Condition) -> Result<(), DmlError> {
        for (field, value) in other.0 {
            self.insert(field, value)?;
        }
        Ok(())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Removes and returns the binding of `field`.
    pub fn take(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn fields(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, Value> {
        &self.0
    }
}
