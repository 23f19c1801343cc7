//! Textual data-manipulation language for change events.
//!
//! A DML statement says which fields of which entity records to set or
//! delete, independently of the transport or storage that applies it:
//!
//! ```text
//! SET feedbacks labels=...["x","y"] WHERE id="1";
//! DELETE feedbacks custom_fields[k]:k IN ["a","b"] WHERE id="1";
//! ```
//!
//! [`parse`] turns source text into [`Statement`]s, [`validate`] checks a
//! statement's invariants and [`encode`] writes it back in canonical form.
pub mod ast;
pub mod encoder;
pub mod error;
pub mod json;
pub mod lexer;
pub mod parser;
pub mod validator;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{
    AssignmentValue, Condition, DeleteItem, DeleteTarget, FieldPath, Mutation, Operation,
    PathSegment, Scalar, Statement,
};
pub use encoder::{encode, encode_all, encode_to, Encoder};
pub use error::{DmlError, ErrorKind, Violations};
pub use parser::{parse, parse_str};
pub use validator::validate;
pub use value::{classify, TypedArray, ValueKind};
