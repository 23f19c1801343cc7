//! Rune-aware scanner.
//!
//! The scanner works on borrowed slices: every function takes the remaining
//! input and hands back what it recognized together with the new remainder.
//! Keywords are ordinary identifiers compared case-insensitively at the
//! positions where the grammar expects them.

use crate::error::DmlError;

/// Positional keywords of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Set,
    Delete,
    Where,
    And,
    In,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Set => "SET",
            Keyword::Delete => "DELETE",
            Keyword::Where => "WHERE",
            Keyword::And => "AND",
            Keyword::In => "IN",
        }
    }

    pub fn matches(self, ident: &str) -> bool {
        ident.eq_ignore_ascii_case(self.as_str())
    }
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '-'
}

/// Reads an identifier from the start of `buf`.
///
/// An identifier starts with a letter, continues with letters, digits, `_`
/// or `-`, and never ends with `-`: trailing dashes are left in the rest.
pub fn next_identifier(buf: &str) -> Result<(&str, &str), DmlError> {
    match buf.chars().next() {
        Some(ch) if ch.is_alphabetic() => {}
        _ => return Err(DmlError::not_identifier(buf)),
    }

    let end = buf
        .char_indices()
        .skip(1)
        .find(|(_, ch)| !is_ident_continue(*ch))
        .map_or(buf.len(), |(i, _)| i);

    let ident = buf[..end].trim_end_matches('-');
    Ok((ident, &buf[ident.len()..]))
}

/// Whether the whole of `s` is one identifier.
pub fn is_identifier(s: &str) -> bool {
    matches!(next_identifier(s), Ok((_, rest)) if rest.is_empty())
}

pub fn skip_blank(buf: &str) -> &str {
    buf.trim_start()
}

/// Reads the keyword `kw` (any case), failing with a syntax error otherwise.
pub fn expect_keyword(buf: &str, kw: Keyword) -> Result<&str, DmlError> {
    match next_identifier(buf) {
        Ok((ident, rest)) if kw.matches(ident) => Ok(rest),
        _ => Err(DmlError::syntax(format!("expected {}", kw.as_str()), buf)),
    }
}

/// Consumes `kw` when it is the next identifier, without failing otherwise.
pub fn accept_keyword(buf: &str, kw: Keyword) -> Option<&str> {
    match next_identifier(buf) {
        Ok((ident, rest)) if kw.matches(ident) => Some(rest),
        _ => None,
    }
}

pub fn expect_punct<'a>(buf: &'a str, punct: &str) -> Result<&'a str, DmlError> {
    buf.strip_prefix(punct)
        .ok_or_else(|| DmlError::syntax(format!("expected '{punct}'"), buf))
}
