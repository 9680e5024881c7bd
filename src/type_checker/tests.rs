use super::type_checker::type_check;
use crate::{
    errors::{diagnostics::Diagnostics, errors::ErrorKind},
    lexer::lexer::tokenize,
    parser::parser::parse,
    Position,
};

fn analyze(source: &str) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize(source, &mut diagnostics);
    let program = parse(tokens, &mut diagnostics);
    assert!(!diagnostics.has_errors(), "{}", diagnostics);

    type_check(&program, &mut diagnostics);
    diagnostics
}

fn messages(diagnostics: &Diagnostics) -> Vec<String> {
    diagnostics.errors().iter().map(|error| error.message()).collect()
}

#[test]
fn test_well_typed_program() {
    let diagnostics = analyze(
        "int add(int a, int b) {\n\
           return a + b;\n\
         }\n\
         int main() {\n\
           int x = 5;\n\
           float y = x * 2;\n\
           bool ok = x < 10 && !(y == 3.0);\n\
           string s = \"hi\";\n\
           print(add(x, 3));\n\
           return 0;\n\
         }",
    );

    assert!(!diagnostics.has_errors(), "{}", diagnostics);
}

#[test]
fn test_redeclaration_in_same_scope() {
    let diagnostics = analyze("int x = 1;\nint x = 2;");

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.count_of(ErrorKind::RedeclarationError), 1);
    assert_eq!(messages(&diagnostics), vec!["Variable 'x' is already declared"]);
    assert_eq!(diagnostics.errors()[0].get_position(), &Position::new(2, 5));
}

#[test]
fn test_shadowing_in_nested_block_is_allowed() {
    let diagnostics = analyze("int x = 1;\n{ string x = \"inner\"; print(x); }\nx = 3;");
    assert!(!diagnostics.has_errors(), "{}", diagnostics);
}

#[test]
fn test_parameter_may_be_shadowed_in_body() {
    let diagnostics = analyze("int f(int n) { int n = 2; return n; }");
    assert!(!diagnostics.has_errors(), "{}", diagnostics);
}

#[test]
fn test_duplicate_parameters_and_functions() {
    let diagnostics = analyze("int f(int a, int a) { return a; }\nint f() { return 0; }");

    assert_eq!(
        messages(&diagnostics),
        vec![
            "Parameter 'a' is already declared",
            "Function 'f' is already declared"
        ]
    );
}

#[test]
fn test_int_widens_to_float_only() {
    assert!(!analyze("float f = 1;").has_errors());

    let diagnostics = analyze("int i = 1.5;");
    assert_eq!(diagnostics.count_of(ErrorKind::TypeError), 1);
    assert_eq!(
        messages(&diagnostics),
        vec!["Cannot assign float to variable of type int"]
    );

    assert_eq!(analyze("bool b = 1;").count_of(ErrorKind::TypeError), 1);
    assert_eq!(analyze("string s = true;").count_of(ErrorKind::TypeError), 1);
}

#[test]
fn test_assignment_type_mismatch() {
    let diagnostics = analyze("int x;\nx = \"text\";");

    assert_eq!(
        messages(&diagnostics),
        vec!["Cannot assign string to variable of type int"]
    );
    assert_eq!(diagnostics.errors()[0].get_position(), &Position::new(2, 1));
}

#[test]
fn test_undeclared_variable_reported_once_per_use() {
    let diagnostics = analyze("int a = b + b;\nc = 1;");

    assert_eq!(diagnostics.count_of(ErrorKind::UndeclaredVariable), 3);
    assert_eq!(
        messages(&diagnostics),
        vec![
            "Undefined variable 'b'",
            "Undefined variable 'b'",
            "Undefined variable 'c'"
        ]
    );
    // The failed operands do not cascade into an operand type error.
    assert_eq!(diagnostics.count_of(ErrorKind::TypeError), 0);
}

#[test]
fn test_initializer_cannot_see_its_own_variable() {
    let diagnostics = analyze("int x = x;");
    assert_eq!(messages(&diagnostics), vec!["Undefined variable 'x'"]);
}

#[test]
fn test_return_outside_function() {
    let diagnostics = analyze("return 1;\n{ return; }");

    assert_eq!(diagnostics.count_of(ErrorKind::SemanticError), 2);
    assert_eq!(
        messages(&diagnostics)[0],
        "Return statement outside function"
    );
}

#[test]
fn test_return_outside_function_in_loops() {
    let diagnostics = analyze(
        "bool go = true;\n\
         while (go) { { return; } }\n\
         for (int i = 0; i < 2; i = i + 1) { while (go) return i; }\n\
         if (go) for (;;) return 1;",
    );

    assert_eq!(diagnostics.error_count(), 3);
    assert_eq!(diagnostics.count_of(ErrorKind::SemanticError), 3);
    assert!(messages(&diagnostics)
        .iter()
        .all(|message| message == "Return statement outside function"));
}

#[test]
fn test_return_type_checks() {
    let diagnostics = analyze(
        "int f() { return \"no\"; }\n\
         float g() { return 1; }\n\
         int h() { return; }",
    );

    assert_eq!(
        messages(&diagnostics),
        vec![
            "Cannot return string from function expecting int",
            "Function must return a value of type int"
        ]
    );
}

#[test]
fn test_non_boolean_conditions() {
    let diagnostics = analyze(
        "int x = 1;\n\
         if (x) print(x);\n\
         while (x + 1) x = 0;\n\
         for (int i = 0; \"s\"; i = i + 1) print(i);",
    );

    assert_eq!(
        messages(&diagnostics),
        vec![
            "If condition must be boolean, got int",
            "While condition must be boolean, got int",
            "For condition must be boolean, got string"
        ]
    );
    assert_eq!(diagnostics.errors()[0].get_position(), &Position::new(2, 5));
    assert!(diagnostics
        .errors()
        .iter()
        .all(|error| error.get_position().is_known()));
}

#[test]
fn test_for_loop_variable_is_scoped_to_loop() {
    let diagnostics = analyze("for (int i = 0; i < 3; i = i + 1) print(i);\nprint(i);");
    assert_eq!(messages(&diagnostics), vec!["Undefined variable 'i'"]);
}

#[test]
fn test_operand_rules() {
    let diagnostics = analyze(
        "int a = 1 + true;\n\
         bool b = 1 && 2;\n\
         bool c = \"x\" < 2;\n\
         int d = -\"x\";\n\
         bool e = !1;\n\
         float f = 1 + 2.5;",
    );

    assert_eq!(
        messages(&diagnostics),
        vec![
            "Invalid operand types for +: int and bool",
            "Invalid operand types for &&: int and int",
            "Invalid operand types for <: string and int",
            "Invalid operand type for -: string",
            "Invalid operand type for !: int"
        ]
    );
}

#[test]
fn test_calls() {
    let diagnostics = analyze("int x = 1;\nfoo(1, 2);\nx(3);\n(x)(4);");

    assert_eq!(diagnostics.count_of(ErrorKind::FunctionNotFound), 1);
    assert_eq!(
        messages(&diagnostics),
        vec![
            "Undefined function 'foo'",
            "'x' is not a function",
            "'x' is not a function"
        ]
    );
}

#[test]
fn test_non_name_callee() {
    let diagnostics = analyze("int f() { return 1; }\nf()();");

    assert_eq!(messages(&diagnostics), vec!["Only functions can be called"]);
    assert_eq!(diagnostics.errors()[0].kind(), ErrorKind::SemanticError);
}

#[test]
fn test_recursion_resolves() {
    let diagnostics = analyze(
        "int fact(int n) {\n\
           if (n <= 1) { return 1; }\n\
           return n * fact(n - 1);\n\
         }",
    );

    assert!(!diagnostics.has_errors(), "{}", diagnostics);
}

#[test]
fn test_arity_is_not_checked() {
    let diagnostics = analyze("int f(int a) { return a; }\nf(1, 2, 3);\nf();");
    assert!(!diagnostics.has_errors(), "{}", diagnostics);
}
