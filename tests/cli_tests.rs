// CLI command tests
#![cfg(feature = "cli")]

use dml_lang::cli::{execute_check, CheckMode, CheckOptions, CheckResult, CliError};

fn run(input: &str, mode: CheckMode) -> Result<CheckResult, CliError> {
    execute_check(&CheckOptions {
        input: Some(input.to_string()),
        mode,
    })
}

#[test]
fn test_check_counts_statements() {
    let result = run(
        "SET a x=1 WHERE id=1; DELETE b WHERE id=2;",
        CheckMode::Validate,
    )
    .unwrap();
    assert!(matches!(result, CheckResult::Valid(2)));
}

#[test]
fn test_check_empty_input() {
    assert!(matches!(
        run("  \n", CheckMode::Validate).unwrap(),
        CheckResult::Valid(0)
    ));
}

#[test]
fn test_no_input() {
    let err = execute_check(&CheckOptions::default()).unwrap_err();
    assert!(matches!(err, CliError::NoInput));
}

#[test]
fn test_parse_error_reported() {
    let err = run("SET a WHERE id=1;", CheckMode::Validate).unwrap_err();
    assert!(matches!(err, CliError::Parse(_)));
    assert!(err.to_string().starts_with("Parse error:"));
}

#[test]
fn test_format_outputs_canonical_text() {
    let result = run("set a  y = 2, x = 1 where id = 1 ;", CheckMode::Format).unwrap();
    match result {
        CheckResult::Canonical(text) => assert_eq!(text, "SET a x=1,y=2 WHERE id=1;"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_json_output() {
    let result = run(r#"SET feedbacks a=1 WHERE id="1";"#, CheckMode::Json).unwrap();
    let CheckResult::Json(value) = result else {
        panic!("expected JSON result");
    };
    let stmt = &value[0];
    assert_eq!(stmt["entity"], "feedbacks");
    assert_eq!(stmt["operation"], "SET");
    assert_eq!(stmt["where"]["id"], "1");
    assert_eq!(stmt["assignments"]["a"]["type"], "scalar");
    assert_eq!(stmt["assignments"]["a"]["value"], 1);
}
