//! Main code generator module.
//!
//! This module contains the core Compiler structure that lowers a checked
//! `Program` into the textual stack-machine listing. It owns the output
//! buffer and the label counter for a single generation pass.

use tracing::debug;

use crate::ast::ast::Program;

use super::{
    instructions::{Instruction, Label, Line, Operand, Reg},
    stmt::gen_statement,
};

/// Bytes reserved for locals in every function frame.
pub const FRAME_SIZE: i64 = 64;
/// Bytes one pushed argument occupies on the stack.
pub const ARGUMENT_SIZE: i64 = 4;

/// The code generator for one pass over one program.
///
/// Every label comes from the single counter held here, so labels are unique
/// within the listing and numbered in the order they were allocated.
#[derive(Debug, Default)]
pub struct Compiler {
    /// Lines emitted so far
    lines: Vec<Line>,
    /// Next label number, shared by every label prefix
    label_counter: u32,
}

impl Compiler {
    pub fn new() -> Self {
        Compiler {
            lines: vec![],
            label_counter: 0,
        }
    }

    /// Allocates a fresh label such as `loop_4`.
    pub fn new_label(&mut self, prefix: &'static str) -> Label {
        let label = Label {
            prefix,
            id: self.label_counter,
        };
        self.label_counter += 1;

        debug!(%label, "allocated label");
        label
    }

    pub fn emit(&mut self, instruction: Instruction) {
        self.lines.push(Line::Code(instruction, None));
    }

    pub fn emit_commented(&mut self, instruction: Instruction, comment: &str) {
        self.lines
            .push(Line::Code(instruction, Some(String::from(comment))));
    }

    pub fn set_label(&mut self, label: Label) {
        self.lines.push(Line::Label(label));
    }

    pub fn comment(&mut self, text: impl Into<String>) {
        self.lines.push(Line::Comment(text.into()));
    }

    pub fn raw(&mut self, text: &str) {
        self.lines.push(Line::Raw(String::from(text)));
    }

    pub fn symbol(&mut self, name: &str) {
        self.lines.push(Line::Symbol(String::from(name)));
    }

    pub fn blank(&mut self) {
        self.lines.push(Line::Blank);
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// `push ebp; mov ebp, esp` plus the fixed local reservation.
    pub fn emit_prologue(&mut self) {
        self.emit(Instruction::Push(Reg::Ebp));
        self.emit(Instruction::Mov(Reg::Ebp.into(), Reg::Esp.into()));
        self.emit_commented(
            Instruction::Sub(Reg::Esp.into(), Operand::Imm(FRAME_SIZE)),
            "reserve space for locals",
        );
    }

    pub fn emit_epilogue(&mut self) {
        self.emit(Instruction::Mov(Reg::Esp.into(), Reg::Ebp.into()));
        self.emit(Instruction::Pop(Reg::Ebp));
        self.emit(Instruction::Ret);
    }

    /// Lowers the whole program.
    ///
    /// Top-level statements are emitted in source order after the section
    /// directives, followed by the `_start` entry that calls `main` and exits.
    pub fn gen(&mut self, program: &Program) {
        self.raw("; H-45 generated code");
        self.raw("; Target: stack-machine intermediate listing");
        self.blank();
        self.raw("section .text");
        self.raw("global _start");
        self.blank();

        for statement in &program.statements {
            gen_statement(self, statement);
        }

        self.blank();
        self.raw("_start:");
        self.emit(Instruction::Call(String::from("main")));
        self.emit_commented(
            Instruction::Mov(Reg::Eax.into(), Operand::Imm(1)),
            "sys_exit",
        );
        self.emit_commented(
            Instruction::Mov(Reg::Ebx.into(), Operand::Imm(0)),
            "exit status",
        );
        self.emit_commented(Instruction::Interrupt(0x80), "call kernel");
    }

    /// Renders the listing, one line per entry, ending with a newline.
    pub fn render(&self) -> String {
        let mut output = String::new();
        for line in &self.lines {
            output.push_str(&line.to_string());
            output.push('\n');
        }
        output
    }
}

/// Generates the listing for a program that passed semantic analysis.
pub fn compile(program: &Program) -> String {
    let mut compiler = Compiler::new();
    compiler.gen(program);

    debug!(lines = compiler.lines().len(), "generated listing");
    compiler.render()
}
