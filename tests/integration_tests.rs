//! Integration tests for end-to-end compilation.
//!
//! These tests drive the public pipeline from source text through lexing,
//! parsing, semantic analysis and listing generation.

use std::fs;

use h45c::{
    errors::errors::ErrorKind,
    pipeline::{compile_file, compile_source, output_path, CompileError, Phase},
};

fn diagnostics_of(error: &CompileError) -> &h45c::errors::diagnostics::Diagnostics {
    error.diagnostics().expect("a failed phase")
}

#[test]
fn test_compile_simple_arithmetic() {
    let source = "int main() { int x = 10; int y = 20; int sum = x + y; print(sum); return 0; }";

    let listing = compile_source(source).expect("program should compile");
    let lines: Vec<String> = listing
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();

    assert!(lines.contains(&String::from("main:")));
    for name in ["x", "y", "sum"] {
        let store = format!("mov [{}], eax ; store initial value", name);
        assert!(lines.contains(&store), "missing store for {}", name);
    }
    assert!(lines.contains(&String::from("add eax, ebx ; addition")));
    assert!(lines.contains(&String::from("call print_int ; call print function")));
    assert!(lines.contains(&String::from("; Return statement")));
    assert!(lines.contains(&String::from("ret")));
}

#[test]
fn test_declaration_as_branch_body_is_rejected() {
    let source = "int main() { bool b = true; if (b) int x = 1; print(x); return 0; }";
    let error = compile_source(source).unwrap_err();

    assert_eq!(error.phase(), Some(Phase::Parsing));
    assert_eq!(diagnostics_of(&error).errors()[0].message(), "Expected expression");
}

#[test]
fn test_string_assigned_to_int() {
    let error = compile_source("int x = \"hello\";").unwrap_err();

    assert_eq!(error.phase(), Some(Phase::Analysis));
    let diagnostics = diagnostics_of(&error);
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.errors()[0].kind(), ErrorKind::TypeError);
    assert_eq!(
        diagnostics.errors()[0].message(),
        "Cannot assign string to variable of type int"
    );
}

#[test]
fn test_undefined_function() {
    let error = compile_source("foo(1, 2);").unwrap_err();

    let diagnostics = diagnostics_of(&error);
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.count_of(ErrorKind::FunctionNotFound), 1);
}

#[test]
fn test_analysis_continues_after_undefined_function() {
    let source = "foo(1);\nint y = missing;\nreturn 3;";
    let error = compile_source(source).unwrap_err();

    let diagnostics = diagnostics_of(&error);
    assert_eq!(diagnostics.error_count(), 3);
    assert_eq!(diagnostics.count_of(ErrorKind::FunctionNotFound), 1);
    assert_eq!(diagnostics.count_of(ErrorKind::UndeclaredVariable), 1);
    assert_eq!(diagnostics.count_of(ErrorKind::SemanticError), 1);
}

#[test]
fn test_recursive_factorial() {
    let source = r#"
int factorial(int n) {
    if (n <= 1) {
        return 1;
    }
    return n * factorial(n - 1);
}

int main() {
    int i;
    for (i = 1; i <= 5; i = i + 1) {
        print(factorial(i));
    }
    return 0;
}
"#;

    let listing = compile_source(source).expect("program should compile");

    assert!(listing.contains("factorial:"));
    assert!(listing.contains("call factorial"));
    assert!(listing.contains("forloop_"));
    assert!(listing.contains("else_0:"));
}

#[test]
fn test_numeric_promotion() {
    let source = "float f = 1 + 2.5;\nfloat g = 4;\nbool b = 3 < 4.5;";

    assert!(compile_source(source).is_ok());
}

#[test]
fn test_condition_must_be_boolean() {
    let error = compile_source("int x = 1;\nwhile (x) { x = x - 1; }").unwrap_err();

    let diagnostics = diagnostics_of(&error);
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(
        diagnostics.errors()[0].message(),
        "While condition must be boolean, got int"
    );
}

#[test]
fn test_lexical_errors_stop_the_pipeline() {
    let error = compile_source("int x = 1 $ 2;\nint y = \"unterminated;").unwrap_err();

    assert_eq!(error.phase(), Some(Phase::Lexing));
    assert_eq!(diagnostics_of(&error).error_count(), 2);
}

#[test]
fn test_syntax_errors_are_all_reported() {
    let source = "int x = ;\nint y = 5;\nint z = (1 + ;\nint w = 2;";
    let error = compile_source(source).unwrap_err();

    assert_eq!(error.phase(), Some(Phase::Parsing));
    assert_eq!(diagnostics_of(&error).error_count(), 2);
}

#[test]
fn test_compile_file_and_output_path() {
    let directory = std::env::temp_dir().join("h45c_integration");
    fs::create_dir_all(&directory).unwrap();

    let source_path = directory.join("program.h45");
    fs::write(&source_path, "int main() { print(42); return 0; }").unwrap();

    let listing = compile_file(&source_path).unwrap();
    assert!(listing.contains("mov eax, 42"));
    assert_eq!(output_path(&source_path), directory.join("program.asm"));
}
