use serde::{Deserialize, Serialize};

use crate::{ast::FieldPath, value::TypedArray};

/// What a DELETE removes at its path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeleteTarget {
    /// The whole value at the path
    ///
    /// # Example
    /// ```text
    /// DELETE feedbacks labels WHERE id=1;
    /// ```
    DeleteKey,

    /// Map entries whose key is in `keys`
    ///
    /// # Example
    /// ```text
    /// custom_fields[k]:k IN ["a","b"]
    /// ```
    KeyFilter { keys: Vec<String> },

    /// Collection entries whose value is in `values`, whatever their key
    ///
    /// # Example
    /// ```text
    /// labels[_]=>v:v="spam"
    /// ```
    ValueFilter { values: TypedArray },

    /// Map entries with key `key` and a value in `values`
    ///
    /// # Example
    /// ```text
    /// custom_fields[k]=>v:k="country" AND v IN ["us","ca"]
    /// ```
    KeyValueFilter { key: String, values: TypedArray },
}

/// One comma-separated item of a DELETE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteItem {
    pub path: FieldPath,
    pub target: DeleteTarget,
}

impl DeleteItem {
    pub fn new(path: FieldPath, target: DeleteTarget) -> Self {
        DeleteItem { path, target }
    }
}
