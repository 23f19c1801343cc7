// Field path tests

use dml_lang::{parser::path::parse_path, parse_str, ErrorKind, FieldPath, Mutation, PathSegment};

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_root_path() {
    let (path, rest) = parse_path(".={}").unwrap();
    assert!(path.is_root());
    assert_eq!(path.as_str(), FieldPath::ROOT);
    assert_eq!(rest, "={}");
}

#[test]
fn test_quoted_identifier_segments_lose_quotes() {
    let (path, _) = parse_path(r#"a."b"."c d""#).unwrap();
    assert_eq!(path.as_str(), r#"a.b."c d""#);
}

#[test]
fn test_first_segment_must_be_identifier() {
    assert_eq!(
        parse_path(r#""a".b"#).unwrap_err().kind(),
        ErrorKind::NotIdentifier
    );
    assert_eq!(parse_path("9a").unwrap_err().kind(), ErrorKind::NotIdentifier);
}

#[test]
fn test_identifier_characters() {
    let (path, rest) = parse_path("snake_case.kebab-case.x1=").unwrap();
    assert_eq!(path.as_str(), "snake_case.kebab-case.x1");
    assert_eq!(rest, "=");
}

#[test]
fn test_unterminated_quoted_segment() {
    assert!(parse_path(r#"a."b"#).is_err());
}

#[test]
fn test_equal_paths_parse_to_equal_values() {
    let (plain, _) = parse_path("a.b").unwrap();
    let (quoted, _) = parse_path(r#"a."b""#).unwrap();
    assert_eq!(plain, quoted);
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_from_segments() {
    let path = FieldPath::from_segments(&["custom_fields", "country code"]).unwrap();
    assert_eq!(path.as_str(), r#"custom_fields."country code""#);
    assert_eq!(
        path.segments().unwrap(),
        vec![
            PathSegment::Ident("custom_fields".into()),
            PathSegment::Quoted("country code".into()),
        ]
    );

    let empty: [&str; 0] = [];
    assert_eq!(
        FieldPath::from_segments(&empty).unwrap_err().kind(),
        ErrorKind::InvalidAssignKey
    );
    assert_eq!(
        FieldPath::from_segments(&["not ident"]).unwrap_err().kind(),
        ErrorKind::NotIdentifier
    );
}

#[test]
fn test_push_quotes_when_needed() {
    let mut path = FieldPath::new("a").unwrap();
    path.push("b");
    path.push("x.y");
    assert_eq!(path.to_string(), r#"a.b."x.y""#);
}

#[test]
fn test_segment_names() {
    assert_eq!(PathSegment::new("ok").name(), "ok");
    assert_eq!(PathSegment::new("not ok").to_string(), r#""not ok""#);
    assert_eq!(PathSegment::new(r#"q"x"#).to_string(), r#""q\"x""#);
}

// ============================================================================
// In statements
// ============================================================================

#[test]
fn test_statement_paths_are_canonical() {
    let statements = parse_str(r#"SET e a."b"=1, a."c d"=2 WHERE id=1;"#).unwrap();
    let Mutation::Set(assignments) = &statements[0].mutation else {
        panic!("expected SET");
    };
    let paths: Vec<&str> = assignments.keys().map(FieldPath::as_str).collect();
    assert_eq!(paths, vec!["a.b", r#"a."c d""#]);
}

#[test]
fn test_quoted_and_bare_spelling_collide() {
    let err = parse_str(r#"SET e a.b=1, a."b"=2 WHERE id=1;"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AssignDuplicated);
}
