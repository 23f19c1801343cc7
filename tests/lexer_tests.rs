// tests/lexer_tests.rs

use dml_lang::lexer::{
    accept_keyword, expect_keyword, expect_punct, is_identifier, next_identifier, skip_blank,
    Keyword,
};
use dml_lang::ErrorKind;

// ============================================================================
// Identifiers
// ============================================================================

#[test]
fn test_identifiers() {
    let test_cases = vec![
        ("feedbacks a=1", "feedbacks", " a=1"),
        ("custom_fields[k]", "custom_fields", "[k]"),
        ("x-y.z", "x-y", ".z"),
        ("a1b2;", "a1b2", ";"),
        ("Ünïcödé=1", "Ünïcödé", "=1"),
        ("id", "id", ""),
    ];

    for (input, ident, rest) in test_cases {
        let (got_ident, got_rest) = next_identifier(input).unwrap();
        assert_eq!(got_ident, ident, "Failed for input: {}", input);
        assert_eq!(got_rest, rest, "Failed for input: {}", input);
    }
}

#[test]
fn test_trailing_dash_not_part_of_identifier() {
    let (ident, rest) = next_identifier("abc-=1").unwrap();
    assert_eq!(ident, "abc");
    assert_eq!(rest, "-=1");
}

#[test]
fn test_not_identifiers() {
    for input in ["", "1abc", "_abc", "-a", "\"a\"", " a", "."] {
        let err = next_identifier(input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotIdentifier, "input: {:?}", input);
    }
}

#[test]
fn test_is_identifier() {
    assert!(is_identifier("a"));
    assert!(is_identifier("a-b_c9"));
    assert!(!is_identifier("a-"));
    assert!(!is_identifier("a b"));
    assert!(!is_identifier("a.b"));
    assert!(!is_identifier(""));
}

// ============================================================================
// Blanks, keywords and punctuation
// ============================================================================

#[test]
fn test_skip_blank() {
    assert_eq!(skip_blank(" \t\r\n x "), "x ");
    assert_eq!(skip_blank(""), "");
}

#[test]
fn test_keywords_are_case_insensitive() {
    for (kw, spellings) in [
        (Keyword::Set, ["set", "SET", "Set"]),
        (Keyword::Delete, ["delete", "DELETE", "dElEtE"]),
        (Keyword::Where, ["where", "WHERE", "Where"]),
        (Keyword::And, ["and", "AND", "And"]),
        (Keyword::In, ["in", "IN", "iN"]),
    ] {
        for spelling in spellings {
            assert!(kw.matches(spelling), "{:?} should match {}", kw, spelling);
        }
    }
}

#[test]
fn test_keyword_needs_whole_identifier() {
    assert_eq!(expect_keyword("where id=1", Keyword::Where).unwrap(), " id=1");
    assert!(expect_keyword("whereas", Keyword::Where).is_err());
    assert!(accept_keyword("INTO", Keyword::In).is_none());
    assert_eq!(accept_keyword("in [1]", Keyword::In), Some(" [1]"));
}

#[test]
fn test_punctuation() {
    assert_eq!(expect_punct("=>v", "=>").unwrap(), "v");
    let err = expect_punct(":", ";").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
}
