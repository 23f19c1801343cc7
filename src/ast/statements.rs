use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    ast::{AssignmentValue, Condition, DeleteItem, DeleteTarget, FieldPath},
    error::{DmlError, Violations},
    lexer::Keyword,
};

/// Statement operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Set,
    Delete,
}

impl Operation {
    pub fn keyword(self) -> Keyword {
        match self {
            Operation::Set => Keyword::Set,
            Operation::Delete => Keyword::Delete,
        }
    }

    /// Operation named by `ident`, in any case.
    pub fn from_keyword(ident: &str) -> Option<Self> {
        [Operation::Set, Operation::Delete]
            .into_iter()
            .find(|op| op.keyword().matches(ident))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword().as_str())
    }
}

/// The changes a statement carries, by operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", content = "assignments", rename_all = "UPPERCASE")]
pub enum Mutation {
    /// SET assignments, one per path
    Set(BTreeMap<FieldPath, AssignmentValue>),

    /// DELETE targets; a path may repeat with distinct filters
    Delete(Vec<DeleteItem>),
}

/// One change event against one entity.
///
/// # Example
/// ```text
/// SET feedbacks a=1, b.c="x" WHERE id=1;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub entity: String,
    #[serde(flatten)]
    pub mutation: Mutation,
    #[serde(rename = "where")]
    pub condition: Condition,
}

impl Statement {
    /// Statement without assignments or targets.
    pub fn new(entity: impl Into<String>, operation: Operation, condition: Condition) -> Self {
        let mutation = match operation {
            Operation::Set => Mutation::Set(BTreeMap::new()),
            Operation::Delete => Mutation::Delete(Vec::new()),
        };
        Statement {
            entity: entity.into(),
            mutation,
            condition,
        }
    }

    pub fn operation(&self) -> Operation {
        match self.mutation {
            Mutation::Set(_) => Operation::Set,
            Mutation::Delete(_) => Operation::Delete,
        }
    }

    /// Adds a SET assignment.
    ///
    /// # Panics
    ///
    /// In debug builds, when called on a DELETE statement. Release builds
    /// leave the statement unchanged.
    pub fn with_assignment(mut self, path: FieldPath, value: AssignmentValue) -> Self {
        debug_assert_eq!(
            self.operation(),
            Operation::Set,
            "assignment to {path} added to a DELETE statement"
        );
        if let Mutation::Set(assignments) = &mut self.mutation {
            assignments.insert(path, value);
        }
        self
    }

    /// Adds a DELETE target.
    ///
    /// # Panics
    ///
    /// In debug builds, when called on a SET statement. Release builds leave
    /// the statement unchanged.
    pub fn with_delete(mut self, path: FieldPath, target: DeleteTarget) -> Self {
        debug_assert_eq!(
            self.operation(),
            Operation::Delete,
            "delete target {path} added to a SET statement"
        );
        if let Mutation::Delete(items) = &mut self.mutation {
            items.push(DeleteItem::new(path, target));
        }
        self
    }

    /// Assignment or delete paths in stored order, repeats included.
    pub fn paths(&self) -> Vec<&FieldPath> {
        match &self.mutation {
            Mutation::Set(assignments) => assignments.keys().collect(),
            Mutation::Delete(items) => items.iter().map(|item| &item.path).collect(),
        }
    }

    /// Number of assignments or delete targets.
    pub fn assignment_count(&self) -> usize {
        match &self.mutation {
            Mutation::Set(assignments) => assignments.len(),
            Mutation::Delete(items) => items.len(),
        }
    }

    /// Runs every validation check.
    ///
    /// # Errors
    ///
    /// [`DmlError::Invalid`] carrying every violation found.
    pub fn validate(&self) -> Result<(), DmlError> {
        let violations = crate::validator::validate(self);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(DmlError::Invalid(Violations(violations)))
        }
    }
}

impl FromStr for Statement {
    type Err = DmlError;

    /// Parses exactly one statement.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut statements = crate::parser::parse_str(s)?;
        match statements.len() {
            1 => Ok(statements.remove(0)),
            n => Err(DmlError::syntax(
                format!("expected exactly one statement, found {n}"),
                s,
            )),
        }
    }
}
