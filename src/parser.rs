//! Recursive-descent DML parser.
//!
//! Every parse function takes the remaining input and returns the node it
//! read together with the new remainder, so no cursor state outlives a call.
//!
//! ```text
//! Stmts      = Stmt*
//! Stmt       = ("SET" Ident AssignList | "DELETE" Ident DeleteList?) "WHERE" Condition ";"
//! AssignList = (Path "=" RHS) ("," AssignList)?
//! DeleteList = DeleteItem ("," DeleteItem)*
//! ```
pub mod condition;
pub mod delete;
pub mod path;
pub mod rhs;

use std::collections::BTreeMap;

use crate::{
    ast::{AssignmentValue, DeleteItem, FieldPath, Mutation, Operation, Statement},
    error::DmlError,
    lexer::{accept_keyword, expect_keyword, expect_punct, next_identifier, skip_blank, Keyword},
};

use condition::parse_condition;
use delete::parse_delete_target;
use path::parse_path;
use rhs::parse_assign_rhs;

fn parse_operation(buf: &str) -> Result<(Operation, &str), DmlError> {
    let invalid = || DmlError::InvalidOperation(buf.chars().take(16).collect());
    let (ident, rest) = next_identifier(buf).map_err(|_| invalid())?;
    let op = Operation::from_keyword(ident).ok_or_else(invalid)?;
    Ok((op, rest))
}

fn parse_assign_list(buf: &str) -> Result<(BTreeMap<FieldPath, AssignmentValue>, &str), DmlError> {
    let mut assignments = BTreeMap::new();
    let mut rest = buf;

    loop {
        rest = skip_blank(rest);
        let (path, r) = parse_path(rest)?;
        if (path.is_root() && !assignments.is_empty())
            || assignments.contains_key(&FieldPath::root())
        {
            return Err(DmlError::InvalidDotAssign);
        }
        if assignments.contains_key(&path) {
            return Err(DmlError::AssignDuplicated(path.to_string()));
        }

        let r = expect_punct(skip_blank(r), "=")?;
        let (value, r) = parse_assign_rhs(skip_blank(r))?;
        assignments.insert(path, value);

        match skip_blank(r).strip_prefix(',') {
            Some(after) => rest = after,
            None => return Ok((assignments, r)),
        }
    }
}

/// Whether `buf`, following a leading `where` word, can only be the rest of
/// a delete item.
fn continues_delete_item(buf: &str) -> bool {
    if buf.starts_with(['.', '[']) {
        return true;
    }
    let buf = skip_blank(buf);
    buf.starts_with([',', '[']) || accept_keyword(buf, Keyword::Where).is_some()
}

fn parse_delete_list(buf: &str) -> Result<(Vec<DeleteItem>, &str), DmlError> {
    let mut items: Vec<DeleteItem> = Vec::new();
    let mut rest = skip_blank(buf);

    // A bare `DELETE entity WHERE ...` deletes nothing. A first path named
    // `where` is only read as a path when the clause reading fails and the
    // text after it continues a delete item.
    if let Some(after) = accept_keyword(rest, Keyword::Where) {
        let clause = parse_condition(after).and_then(|(_, r)| expect_punct(skip_blank(r), ";"));
        match clause {
            Ok(_) => return Ok((items, rest)),
            Err(e) if !continues_delete_item(after) => return Err(e),
            Err(_) => {}
        }
    }

    loop {
        rest = skip_blank(rest);
        let (path, target, r) = parse_delete_target(rest)?;
        if (path.is_root() && !items.is_empty()) || items.iter().any(|item| item.path.is_root()) {
            return Err(DmlError::InvalidDotAssign);
        }
        let item = DeleteItem::new(path, target);
        if items.contains(&item) {
            return Err(DmlError::AssignDuplicated(item.path.to_string()));
        }
        items.push(item);

        match skip_blank(r).strip_prefix(',') {
            Some(after) => rest = after,
            None => return Ok((items, r)),
        }
    }
}

/// Parses one statement, including its terminating `;`.
pub fn parse_statement(buf: &str) -> Result<(Statement, &str), DmlError> {
    let (operation, rest) = parse_operation(skip_blank(buf))?;
    let (entity, rest) = next_identifier(skip_blank(rest))?;

    let (mutation, rest) = match operation {
        Operation::Set => {
            let (assignments, rest) = parse_assign_list(rest)?;
            (Mutation::Set(assignments), rest)
        }
        Operation::Delete => {
            let (items, rest) = parse_delete_list(rest)?;
            (Mutation::Delete(items), rest)
        }
    };

    let rest = expect_keyword(skip_blank(rest), Keyword::Where)?;
    let (condition, rest) = parse_condition(rest)?;
    let rest = expect_punct(skip_blank(rest), ";")?;

    let statement = Statement {
        entity: entity.to_string(),
        mutation,
        condition,
    };
    tracing::trace!(entity = %statement.entity, operation = %operation, "parsed statement");
    Ok((statement, rest))
}

/// Parses every statement of `input`.
///
/// Parsing is all-or-nothing: the first failing statement fails the whole
/// call and no statement is returned. Blank input yields no statements.
///
/// # Examples
///
/// ```
/// let statements = dml_lang::parse_str("SET feedbacks a=1 WHERE id=1;").unwrap();
/// assert_eq!(statements.len(), 1);
/// assert_eq!(statements[0].entity, "feedbacks");
/// ```
pub fn parse_str(input: &str) -> Result<Vec<Statement>, DmlError> {
    let mut statements = Vec::new();
    let mut rest = skip_blank(input);

    while !rest.is_empty() {
        let (statement, r) = parse_statement(rest).inspect_err(|e| {
            tracing::debug!(
                error = %e,
                offset = input.len() - rest.len(),
                index = statements.len(),
                "DML parse failed"
            );
        })?;
        statements.push(statement);
        rest = skip_blank(r);
    }

    tracing::debug!(statements = statements.len(), bytes = input.len(), "parsed DML input");
    Ok(statements)
}

/// Parses a raw byte buffer. Bytes that are not UTF-8 are a syntax error.
pub fn parse(input: &[u8]) -> Result<Vec<Statement>, DmlError> {
    let text = std::str::from_utf8(input).map_err(|e| {
        let near = String::from_utf8_lossy(&input[e.valid_up_to()..]);
        DmlError::syntax(format!("input is not UTF-8: {e}"), &near)
    })?;
    parse_str(text)
}
