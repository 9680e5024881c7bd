//! Unit tests for code generation.

use super::{
    compiler::{compile, Compiler},
    instructions::{Instruction, Label, Line, Operand, Reg},
};
use crate::{
    ast::ast::Program,
    errors::diagnostics::Diagnostics,
    lexer::lexer::tokenize,
    parser::parser::parse,
};

fn parse_source(source: &str) -> Program {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize(source, &mut diagnostics);
    let program = parse(tokens, &mut diagnostics);
    assert!(!diagnostics.has_errors(), "{}", diagnostics);

    program
}

/// Generated lines with runs of whitespace collapsed, so tests do not depend
/// on comment alignment.
fn generate(source: &str) -> Vec<String> {
    compile(&parse_source(source))
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect()
}

fn contains_sequence(lines: &[String], expected: &[&str]) -> bool {
    lines
        .windows(expected.len())
        .any(|window| window.iter().zip(expected).all(|(line, want)| line == want))
}

#[test]
fn test_labels_are_unique_and_increasing() {
    let mut compiler = Compiler::new();

    let first = compiler.new_label("loop");
    let second = compiler.new_label("endloop");
    let third = compiler.new_label("loop");

    assert_eq!(first.to_string(), "loop_0");
    assert_eq!(second.to_string(), "endloop_1");
    assert_eq!(third.to_string(), "loop_2");
    assert_ne!(first, third);
}

#[test]
fn test_line_rendering() {
    let commented = Line::Code(
        Instruction::Mov(Reg::Eax.into(), Operand::Imm(5)),
        Some(String::from("integer literal")),
    );
    assert_eq!(commented.to_string(), "    mov eax, 5      ; integer literal");

    let store = Line::Code(
        Instruction::Mov(Operand::Memory(String::from("x")), Reg::Eax.into()),
        None,
    );
    assert_eq!(store.to_string(), "    mov [x], eax");

    let label = Line::Label(Label {
        prefix: "else",
        id: 3,
    });
    assert_eq!(label.to_string(), "else_3:");
    assert_eq!(Line::Comment(String::from("If statement")).to_string(), "    ; If statement");
    assert_eq!(Instruction::Interrupt(0x80).to_string(), "int 0x80");
}

#[test]
fn test_simple_program_listing() {
    let lines = generate("int main() { return 0; }");

    let expected = vec![
        "; H-45 generated code",
        "; Target: stack-machine intermediate listing",
        "",
        "section .text",
        "global _start",
        "",
        "",
        "main:",
        "push ebp",
        "mov ebp, esp",
        "sub esp, 64 ; reserve space for locals",
        "; Block start",
        "; Return statement",
        "mov eax, 0 ; integer literal",
        "mov esp, ebp",
        "pop ebp",
        "ret",
        "; Block end",
        "mov esp, ebp",
        "pop ebp",
        "ret",
        "",
        "_start:",
        "call main",
        "mov eax, 1 ; sys_exit",
        "mov ebx, 0 ; exit status",
        "int 0x80 ; call kernel",
    ];

    assert_eq!(lines, expected);
}

#[test]
fn test_empty_program_still_has_entry() {
    let lines = generate("");

    assert!(lines.contains(&String::from("section .text")));
    assert!(contains_sequence(&lines, &["_start:", "call main"]));
}

#[test]
fn test_binary_expression_uses_stack() {
    let lines = generate("int x = 1 + 2;");

    assert!(contains_sequence(
        &lines,
        &[
            "; Variable declaration: x",
            "mov eax, 1 ; integer literal",
            "push eax ; save left operand",
            "mov eax, 2 ; integer literal",
            "mov ebx, eax ; right operand in ebx",
            "pop eax ; left operand in eax",
            "add eax, ebx ; addition",
            "mov [x], eax ; store initial value",
        ]
    ));
}

#[test]
fn test_declaration_without_initializer_only_comments() {
    let lines = generate("int x;");

    let position = lines
        .iter()
        .position(|line| line == "; Variable declaration: x")
        .expect("declaration comment");
    assert_eq!(lines[position + 1], "");
}

#[test]
fn test_comparison_and_modulo() {
    let lines = generate("bool b = 4 <= 5; int r = 7 % 2;");

    assert!(contains_sequence(
        &lines,
        &["cmp eax, ebx", "setle al", "movzx eax, al"]
    ));
    assert!(contains_sequence(
        &lines,
        &[
            "cdq ; sign extend",
            "idiv ebx ; division",
            "mov eax, edx ; remainder in edx",
        ]
    ));
}

#[test]
fn test_unary_operators() {
    let lines = generate("int n = -5; bool b = !true;");

    assert!(contains_sequence(
        &lines,
        &["mov eax, 5 ; integer literal", "neg eax ; negate"]
    ));
    assert!(contains_sequence(
        &lines,
        &[
            "mov eax, 1 ; boolean literal",
            "cmp eax, 0",
            "sete al",
            "movzx eax, al",
        ]
    ));
}

#[test]
fn test_call_pushes_arguments_in_reverse() {
    let lines = generate("add(1, 2);");

    assert!(contains_sequence(
        &lines,
        &[
            "; Function call: add",
            "mov eax, 2 ; integer literal",
            "push eax ; push argument 1",
            "mov eax, 1 ; integer literal",
            "push eax ; push argument 0",
            "call add",
            "add esp, 8 ; clean up arguments",
        ]
    ));
}

#[test]
fn test_call_without_arguments_has_no_cleanup() {
    let lines = generate("tick();");

    assert!(lines.contains(&String::from("call tick")));
    assert!(!lines.iter().any(|line| line.contains("clean up arguments")));
}

#[test]
fn test_if_else_labels() {
    let lines = generate("if (x) { print(1); } else { print(2); }");

    assert!(contains_sequence(
        &lines,
        &["; If statement", "mov eax, [x] ; load variable x", "cmp eax, 0", "je else_0"]
    ));
    assert!(lines.contains(&String::from("jmp endif_1")));
    assert!(lines.contains(&String::from("else_0:")));
    assert_eq!(lines.iter().filter(|line| *line == "endif_1:").count(), 1);
    assert!(contains_sequence(
        &lines,
        &[
            "push eax ; push value to print",
            "call print_int ; call print function",
            "add esp, 4 ; clean up stack",
        ]
    ));
}

#[test]
fn test_while_loop_shape() {
    let lines = generate("while (x) { x = 0; }");

    let start = lines.iter().position(|line| line == "loop_0:").expect("loop label");
    let back = lines.iter().position(|line| line == "jmp loop_0").expect("back edge");
    let end = lines.iter().position(|line| line == "endloop_1:").expect("end label");

    assert_eq!(lines[start - 1], "; While loop");
    assert!(start < back && back < end);
    assert!(lines.contains(&String::from("je endloop_1")));
    assert!(lines.contains(&String::from("mov [x], eax ; assign to x")));
}

#[test]
fn test_for_loop_shape() {
    let lines = generate("for (int i = 0; i < 3; i = i + 1) { print(i); }");

    let init = lines
        .iter()
        .position(|line| line == "; Variable declaration: i")
        .expect("initializer");
    let head = lines.iter().position(|line| line == "forloop_0:").expect("head");
    let increment = lines
        .iter()
        .rposition(|line| line == "mov [i], eax ; assign to i")
        .expect("increment");
    let back = lines.iter().position(|line| line == "jmp forloop_0").expect("back edge");

    assert!(init < head && head < increment && increment < back);
    assert_eq!(lines[back + 1], "endfor_1:");
}

#[test]
fn test_for_without_condition_has_no_exit_test() {
    let lines = generate("for (;;) { print(1); }");

    assert!(!lines.iter().any(|line| line == "je endfor_1"));
    assert!(lines.contains(&String::from("endfor_1:")));
}

#[test]
fn test_literals() {
    let lines = generate("float f = 3.9; string a = \"x\"; string b = \"y\"; bool c = false;");

    assert!(contains_sequence(
        &lines,
        &["; Float literal (truncated to integer)", "mov eax, 3"]
    ));
    assert!(lines.contains(&String::from("mov eax, str_0 ; string literal")));
    assert!(lines.contains(&String::from("mov eax, str_1 ; string literal")));
    assert!(lines.contains(&String::from("mov eax, 0 ; boolean literal")));
}

#[test]
fn test_return_without_value() {
    let lines = generate("int main() { return; }");

    assert!(contains_sequence(
        &lines,
        &[
            "; Return statement",
            "mov eax, 0 ; default return value",
            "mov esp, ebp",
            "pop ebp",
            "ret",
        ]
    ));
}

#[test]
fn test_generation_is_deterministic() {
    let program = parse_source(
        "int fact(int n) { if (n <= 1) { return 1; } return n * fact(n - 1); }\nint main() { print(fact(5)); return 0; }",
    );

    assert_eq!(compile(&program), compile(&program));
}
