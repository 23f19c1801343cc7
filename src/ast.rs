//! # DML Abstract Syntax Tree
//!
//! A DML source text is a sequence of statements, each describing one change
//! event against one entity:
//!
//! ```text
//! SET feedbacks labels=...["x","y"], meta.score=3 WHERE id="1";
//! DELETE feedbacks custom_fields[k]=>v:k="country" AND v IN ["us","ca"] WHERE id="1";
//! ```
//!
//! ## Submodules
//!
//! - **[path]** - canonical dotted field paths
//! - **[assignments]** - right-hand sides of SET assignments
//! - **[filters]** - DELETE targets and their filters
//! - **[condition]** - WHERE conditions (AND-conjoined equalities)
//! - **[statements]** - the statement itself and its operation
//!
//! ## Whole-record path
//!
//! The path `.` addresses the whole record. When it appears it must be the
//! only assignment or delete target of its statement.
//!
//! ## Values
//!
//! JSON literals are kept as [`serde_json::Value`]. Object keys are kept in
//! serde_json's sorted map, so every value has a single canonical rendering.
pub mod assignments;
pub mod condition;
pub mod filters;
pub mod path;
pub mod statements;

pub use assignments::{AssignmentValue, Scalar};
pub use condition::Condition;
pub use filters::{DeleteItem, DeleteTarget};
pub use path::{FieldPath, PathSegment};
pub use statements::{Mutation, Operation, Statement};
