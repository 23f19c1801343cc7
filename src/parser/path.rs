//! Dotted field paths.

use crate::{
    ast::{FieldPath, PathSegment},
    error::DmlError,
    json,
    lexer::next_identifier,
};

/// Reads `ident ("." (ident | quoted))*` as written, without canonicalizing.
pub(crate) fn read_segments(buf: &str) -> Result<(Vec<PathSegment>, &str), DmlError> {
    let (first, mut rest) = next_identifier(buf)?;
    let mut segments = vec![PathSegment::Ident(first.to_string())];

    while let Some(after_dot) = rest.strip_prefix('.') {
        if after_dot.starts_with('"') {
            let (name, r) = json::parse_quoted(after_dot)?;
            segments.push(PathSegment::Quoted(name));
            rest = r;
        } else {
            let (ident, r) = next_identifier(after_dot)
                .map_err(|_| DmlError::syntax("expected a path segment after '.'", after_dot))?;
            segments.push(PathSegment::Ident(ident.to_string()));
            rest = r;
        }
    }
    Ok((segments, rest))
}

/// Parses a field path into its canonical form.
///
/// A lone `.` is the whole-record path. Quoted segments that are valid
/// identifiers lose their quotes.
///
/// # Examples
///
/// ```
/// use dml_lang::parser::path::parse_path;
///
/// let (path, rest) = parse_path(r#"a."b.c"."d"=1"#).unwrap();
/// assert_eq!(path.as_str(), r#"a."b.c".d"#);
/// assert_eq!(rest, "=1");
/// ```
pub fn parse_path(buf: &str) -> Result<(FieldPath, &str), DmlError> {
    if let Some(rest) = buf.strip_prefix('.') {
        return Ok((FieldPath::root(), rest));
    }

    let (segments, rest) = read_segments(buf)?;
    let names: Vec<&str> = segments.iter().map(PathSegment::name).collect();
    Ok((FieldPath::from_segments(&names)?, rest))
}
