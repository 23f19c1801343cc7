//! Statement validation.
//!
//! Parsed statements already satisfy most of these checks by construction;
//! statements built directly by callers may not. Every check runs, so one
//! call reports every problem of a statement.

use crate::{
    ast::{AssignmentValue, DeleteTarget, Mutation, Statement},
    error::DmlError,
    lexer::is_identifier,
    value::TypedArray,
};

fn check_entity(stmt: &Statement, errors: &mut Vec<DmlError>) {
    if stmt.entity.is_empty() {
        errors.push(DmlError::MissingEntity);
    } else if !is_identifier(&stmt.entity) {
        errors.push(DmlError::NotIdentifier(stmt.entity.clone()));
    }
}

fn check_paths(stmt: &Statement, errors: &mut Vec<DmlError>) {
    let paths = stmt.paths();
    let roots = paths.iter().filter(|p| p.is_root()).count();
    if roots > 1 || (roots == 1 && paths.len() > 1) {
        errors.push(DmlError::InvalidDotAssign);
    }

    for path in paths.into_iter().filter(|p| !p.is_root()) {
        if let Err(e) = path.segments() {
            errors.push(e);
        }
    }
}

fn check_typed(typed: &TypedArray, errors: &mut Vec<DmlError>) {
    if typed.is_empty() {
        errors.push(DmlError::MissingArrayValues);
    }
}

fn check_filter_values(typed: &TypedArray, errors: &mut Vec<DmlError>) {
    check_typed(typed, errors);
    if !typed.kind().is_scalar() {
        errors.push(DmlError::TypeCheck {
            variable: "v".to_string(),
            expected: "scalar",
            found: typed.kind().name(),
        });
    }
}

fn check_mutation(stmt: &Statement, errors: &mut Vec<DmlError>) {
    match &stmt.mutation {
        Mutation::Set(assignments) => {
            if assignments.is_empty() {
                errors.push(DmlError::MissingAssign);
            }
            for value in assignments.values() {
                if let AssignmentValue::Append(typed) | AssignmentValue::Prepend(typed) = value {
                    check_typed(typed, errors);
                }
            }
        }
        Mutation::Delete(items) => {
            for (i, item) in items.iter().enumerate() {
                if items[..i].contains(item) {
                    errors.push(DmlError::AssignDuplicated(item.path.to_string()));
                }
                match &item.target {
                    DeleteTarget::DeleteKey => {}
                    DeleteTarget::KeyFilter { keys } => {
                        if keys.is_empty() {
                            errors.push(DmlError::MissingArrayValues);
                        }
                    }
                    DeleteTarget::ValueFilter { values }
                    | DeleteTarget::KeyValueFilter { values, .. } => {
                        check_filter_values(values, errors);
                    }
                }
            }
        }
    }
}

fn check_condition(stmt: &Statement, errors: &mut Vec<DmlError>) {
    if stmt.condition.is_empty() {
        errors.push(DmlError::MissingWhereClause);
    }
    for field in stmt.condition.fields() {
        if !is_identifier(field) {
            errors.push(DmlError::NotIdentifier(field.clone()));
        }
    }
}

/// Every invariant violation of `stmt`, in check order. Empty when valid.
pub fn validate(stmt: &Statement) -> Vec<DmlError> {
    let mut errors = Vec::new();
    check_entity(stmt, &mut errors);
    check_mutation(stmt, &mut errors);
    check_paths(stmt, &mut errors);
    check_condition(stmt, &mut errors);
    errors
}
