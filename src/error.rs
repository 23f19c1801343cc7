//! Error types for the DML front end.
//!
//! Every failure the scanner, parsers, validator or encoder can produce is a
//! variant of [`DmlError`]. Callers that only need to branch on the kind of
//! failure use [`DmlError::kind`], which strips the payload.

use std::fmt;

use thiserror::Error;

/// Maximum number of characters of unparsed input kept in a syntax error.
const EXCERPT_LEN: usize = 24;

/// Errors raised while parsing, validating or encoding DML.
#[derive(Error, Debug)]
pub enum DmlError {
    /// Token or grammar mismatch, unexpected end of input or malformed JSON.
    #[error("syntax error: {message} near {near:?}")]
    Syntax { message: String, near: String },

    /// Leading keyword is neither `SET` nor `DELETE`.
    #[error("invalid operation near {0:?}, expected SET or DELETE")]
    InvalidOperation(String),

    /// Token does not follow the identifier grammar.
    #[error("not an identifier: {0:?}")]
    NotIdentifier(String),

    /// Statement has an empty entity name.
    #[error("missing entity")]
    MissingEntity,

    /// SET statement without assignments.
    #[error("missing assignment")]
    MissingAssign,

    /// Statement without a WHERE condition.
    #[error("missing WHERE clause")]
    MissingWhereClause,

    /// The whole-record path `.` is combined with other assignments.
    #[error("'.' assignment must be the only assignment")]
    InvalidDotAssign,

    /// The same assignment appears twice in one statement.
    #[error("duplicated assignment to {0}")]
    AssignDuplicated(String),

    /// Array literal is empty once nulls are dropped.
    #[error("array has no non-null values")]
    MissingArrayValues,

    /// Array literal mixes JSON kinds.
    #[error("array mixes {0} and {1} values")]
    ArrayWithMixedTypes(&'static str, &'static str),

    /// Array literal holds a kind that cannot be typed.
    #[error("unsupported array value of kind {0}")]
    UnsupportedArrayValue(&'static str),

    /// The same field is bound twice in one condition.
    #[error("clause on {0:?} is duplicated")]
    ClauseDuplicated(String),

    /// A declared filter variable is never bound by its condition.
    #[error("variable {0:?} is declared but not used")]
    UnusedVariable(String),

    /// A filter condition binds a name that was never declared.
    #[error("variable {0:?} is not declared")]
    UnknownVariable(String),

    /// A bound filter variable holds the wrong JSON kind.
    #[error("variable {variable:?} must be {expected}, got {found}")]
    TypeCheck {
        variable: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A path segment is neither an identifier nor a valid quoted string.
    #[error("invalid assignment key {0:?}")]
    InvalidAssignKey(String),

    /// Several validation failures of one statement.
    #[error("{0}")]
    Invalid(Violations),

    /// Writing encoded output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Payload-free discriminant of [`DmlError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    InvalidOperation,
    NotIdentifier,
    MissingEntity,
    MissingAssign,
    MissingWhereClause,
    InvalidDotAssign,
    AssignDuplicated,
    MissingArrayValues,
    ArrayWithMixedTypes,
    UnsupportedArrayValue,
    ClauseDuplicated,
    UnusedVariable,
    UnknownVariable,
    TypeCheck,
    InvalidAssignKey,
    Invalid,
    Io,
}

impl DmlError {
    /// Builds a syntax error whose excerpt starts at `rest`.
    pub fn syntax(message: impl Into<String>, rest: &str) -> Self {
        DmlError::Syntax {
            message: message.into(),
            near: excerpt(rest),
        }
    }

    pub fn not_identifier(rest: &str) -> Self {
        DmlError::NotIdentifier(excerpt(rest))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DmlError::Syntax { .. } => ErrorKind::Syntax,
            DmlError::InvalidOperation(_) => ErrorKind::InvalidOperation,
            DmlError::NotIdentifier(_) => ErrorKind::NotIdentifier,
            DmlError::MissingEntity => ErrorKind::MissingEntity,
            DmlError::MissingAssign => ErrorKind::MissingAssign,
            DmlError::MissingWhereClause => ErrorKind::MissingWhereClause,
            DmlError::InvalidDotAssign => ErrorKind::InvalidDotAssign,
            DmlError::AssignDuplicated(_) => ErrorKind::AssignDuplicated,
            DmlError::MissingArrayValues => ErrorKind::MissingArrayValues,
            DmlError::ArrayWithMixedTypes(..) => ErrorKind::ArrayWithMixedTypes,
            DmlError::UnsupportedArrayValue(_) => ErrorKind::UnsupportedArrayValue,
            DmlError::ClauseDuplicated(_) => ErrorKind::ClauseDuplicated,
            DmlError::UnusedVariable(_) => ErrorKind::UnusedVariable,
            DmlError::UnknownVariable(_) => ErrorKind::UnknownVariable,
            DmlError::TypeCheck { .. } => ErrorKind::TypeCheck,
            DmlError::InvalidAssignKey(_) => ErrorKind::InvalidAssignKey,
            DmlError::Invalid(_) => ErrorKind::Invalid,
            DmlError::Io(_) => ErrorKind::Io,
        }
    }

    /// Kinds of every individual failure, flattening [`DmlError::Invalid`].
    pub fn kinds(&self) -> Vec<ErrorKind> {
        match self {
            DmlError::Invalid(violations) => violations.iter().map(DmlError::kind).collect(),
            other => vec![other.kind()],
        }
    }
}

/// All validation failures of a single statement.
#[derive(Debug, Default)]
pub struct Violations(pub Vec<DmlError>);

impl Violations {
    pub fn iter(&self) -> impl Iterator<Item = &DmlError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl IntoIterator for Violations {
    type Item = DmlError;
    type IntoIter = std::vec::IntoIter<DmlError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn excerpt(rest: &str) -> String {
    if rest.is_empty() {
        return "<end of input>".to_string();
    }
    rest.chars().take(EXCERPT_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_excerpt_is_bounded() {
        let long = "x".repeat(100);
        match DmlError::syntax("boom", &long) {
            DmlError::Syntax { near, .. } => assert_eq!(near.len(), EXCERPT_LEN),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_excerpt_names_end_of_input() {
        let err = DmlError::syntax("expected ';'", "");
        assert_eq!(err.to_string(), "syntax error: expected ';' near \"<end of input>\"");
    }

    #[test]
    fn violations_join_messages() {
        let err = DmlError::Invalid(Violations(vec![
            DmlError::MissingEntity,
            DmlError::MissingWhereClause,
        ]));
        assert_eq!(err.to_string(), "missing entity; missing WHERE clause");
        assert_eq!(
            err.kinds(),
            vec![ErrorKind::MissingEntity, ErrorKind::MissingWhereClause]
        );
    }
}
