use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{error::DmlError, json, lexer, parser::path::read_segments};

/// One segment of a dotted field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Bare identifier segment
    ///
    /// # Example
    /// ```text
    /// custom_fields.country
    /// ```
    Ident(String),

    /// Quoted segment, for names that are not identifiers
    ///
    /// # Example
    /// ```text
    /// meta."b.c"."with space"
    /// ```
    Quoted(String),
}

impl PathSegment {
    /// Picks the bare form when `name` is an identifier, quoted otherwise.
    pub fn new(name: &str) -> Self {
        if lexer::is_identifier(name) {
            PathSegment::Ident(name.to_string())
        } else {
            PathSegment::Quoted(name.to_string())
        }
    }

    /// The field name this segment addresses, unquoted.
    pub fn name(&self) -> &str {
        match self {
            PathSegment::Ident(s) | PathSegment::Quoted(s) => s,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Ident(s) => f.write_str(s),
            PathSegment::Quoted(s) => f.write_str(&json::quote(s)),
        }
    }
}

/// Canonical dotted path to a field of an entity record.
///
/// Held as its canonical text: segments joined by `.`, bare when the
/// segment is an identifier and JSON-quoted otherwise. Ordering is the
/// lexicographic order of that text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    /// Text of the whole-record path.
    pub const ROOT: &'static str = ".";

    /// Single-segment path. `first` must be an identifier.
    pub fn new(first: &str) -> Result<Self, DmlError> {
        if !lexer::is_identifier(first) {
            return Err(DmlError::not_identifier(first));
        }
        Ok(FieldPath(first.to_string()))
    }

    /// The whole-record path `.`.
    pub fn root() -> Self {
        FieldPath(Self::ROOT.to_string())
    }

    /// Takes `text` as canonical path text without checking it.
    ///
    /// The validator rejects paths whose segments do not parse.
    pub fn from_raw(text: impl Into<String>) -> Self {
        FieldPath(text.into())
    }

    /// Builds a path from field names, quoting the ones that need it.
    pub fn from_segments<S: AsRef<str>>(names: &[S]) -> Result<Self, DmlError> {
        let (first, rest) = names
            .split_first()
            .ok_or_else(|| DmlError::InvalidAssignKey(String::new()))?;
        let mut path = FieldPath::new(first.as_ref())?;
        for name in rest {
            path.push(name.as_ref());
        }
        Ok(path)
    }

    pub fn push(&mut self, name: &str) {
        self.0.push('.');
        self.0.push_str(&PathSegment::new(name).to_string());
    }

    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the canonical text back into segments.
    ///
    /// # Errors
    ///
    /// [`DmlError::InvalidAssignKey`] when a segment is neither an identifier
    /// nor a valid quoted string, or when the text is not canonical: quotes
    /// around an identifier, or escapes the encoder would not write. The root
    /// path has no segments.
    pub fn segments(&self) -> Result<Vec<PathSegment>, DmlError> {
        if self.is_root() {
            return Ok(Vec::new());
        }
        let invalid = || DmlError::InvalidAssignKey(self.0.clone());
        let segments = match read_segments(&self.0) {
            Ok((segments, "")) => segments,
            _ => return Err(invalid()),
        };
        let names: Vec<&str> = segments.iter().map(PathSegment::name).collect();
        match FieldPath::from_segments(&names) {
            Ok(canonical) if canonical == *self => Ok(segments),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_only_where_needed() {
        let path = FieldPath::from_segments(&["a", "b.c", "d", "e f"]).unwrap();
        assert_eq!(path.as_str(), r#"a."b.c".d."e f""#);
    }

    #[test]
    fn segments_round_trip() {
        let path = FieldPath::from_raw(r#"a."b.c".d"#);
        assert_eq!(
            path.segments().unwrap(),
            vec![
                PathSegment::Ident("a".into()),
                PathSegment::Quoted("b.c".into()),
                PathSegment::Ident("d".into()),
            ]
        );
    }

    #[test]
    fn invalid_raw_paths() {
        for raw in ["", "a.", "1a", "a.\"x", "a b", ".a", r#"a."b""#, r#"a."x\/y""#] {
            assert!(FieldPath::from_raw(raw).segments().is_err(), "{raw:?}");
        }
    }

    #[test]
    fn root_path() {
        assert!(FieldPath::root().is_root());
        assert!(FieldPath::root().segments().unwrap().is_empty());
    }
}
