//! The instruction set of the textual stack machine.
//!
//! One accumulator (`eax`), a second operand register (`ebx`), `edx` for the
//! remainder of a division, and the stack addressed through `esp`/`ebp`.

use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg {
    Eax,
    Ebx,
    Edx,
    Esp,
    Ebp,
    Al,
}

impl Display for Reg {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Reg::*;

        let name = match self {
            Eax => "eax",
            Ebx => "ebx",
            Edx => "edx",
            Esp => "esp",
            Ebp => "ebp",
            Al => "al",
        };

        formatter.write_str(name)
    }
}

/// A generated jump target such as `loop_3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label {
    pub prefix: &'static str,
    pub id: u32,
}

impl Display for Label {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}_{}", self.prefix, self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Reg(Reg),
    Imm(i64),
    /// A variable addressed by its source name
    Memory(String),
    Label(Label),
}

impl Display for Operand {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg(reg) => write!(formatter, "{}", reg),
            Operand::Imm(value) => write!(formatter, "{}", value),
            Operand::Memory(name) => write!(formatter, "[{}]", name),
            Operand::Label(label) => write!(formatter, "{}", label),
        }
    }
}

impl From<Reg> for Operand {
    fn from(reg: Reg) -> Self {
        Operand::Reg(reg)
    }
}

/// Condition tested by a `setcc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl Display for Condition {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self {
            Condition::Equal => "e",
            Condition::NotEqual => "ne",
            Condition::Less => "l",
            Condition::LessEqual => "le",
            Condition::Greater => "g",
            Condition::GreaterEqual => "ge",
        };

        formatter.write_str(suffix)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Push(Reg),
    Pop(Reg),
    Mov(Operand, Operand),
    Movzx(Reg, Reg),
    Add(Operand, Operand),
    Sub(Operand, Operand),
    Imul(Reg, Reg),
    Cdq,
    Idiv(Reg),
    Neg(Reg),
    And(Reg, Reg),
    Or(Reg, Reg),
    Cmp(Operand, Operand),
    Set(Condition, Reg),
    Jmp(Label),
    Je(Label),
    Call(String),
    Ret,
    Interrupt(u8),
}

impl Display for Instruction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match self {
            Push(reg) => write!(formatter, "push {}", reg),
            Pop(reg) => write!(formatter, "pop {}", reg),
            Mov(destination, source) => write!(formatter, "mov {}, {}", destination, source),
            Movzx(destination, source) => write!(formatter, "movzx {}, {}", destination, source),
            Add(destination, source) => write!(formatter, "add {}, {}", destination, source),
            Sub(destination, source) => write!(formatter, "sub {}, {}", destination, source),
            Imul(destination, source) => write!(formatter, "imul {}, {}", destination, source),
            Cdq => formatter.write_str("cdq"),
            Idiv(divisor) => write!(formatter, "idiv {}", divisor),
            Neg(reg) => write!(formatter, "neg {}", reg),
            And(destination, source) => write!(formatter, "and {}, {}", destination, source),
            Or(destination, source) => write!(formatter, "or {}, {}", destination, source),
            Cmp(left, right) => write!(formatter, "cmp {}, {}", left, right),
            Set(condition, reg) => write!(formatter, "set{} {}", condition, reg),
            Jmp(label) => write!(formatter, "jmp {}", label),
            Je(label) => write!(formatter, "je {}", label),
            Call(target) => write!(formatter, "call {}", target),
            Ret => formatter.write_str("ret"),
            Interrupt(vector) => write!(formatter, "int 0x{:x}", vector),
        }
    }
}

/// One line of generated output.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Code(Instruction, Option<String>),
    Label(Label),
    /// Entry label of a function, named after it
    Symbol(String),
    Comment(String),
    /// Unindented text, for the file header and section directives
    Raw(String),
    Blank,
}

/// Column trailing comments are aligned to, relative to the indentation.
const COMMENT_COLUMN: usize = 15;

impl Display for Line {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Code(instruction, None) => write!(formatter, "    {}", instruction),
            Line::Code(instruction, Some(comment)) => write!(
                formatter,
                "    {:<width$} ; {}",
                instruction.to_string(),
                comment,
                width = COMMENT_COLUMN
            ),
            Line::Label(label) => write!(formatter, "{}:", label),
            Line::Symbol(name) => write!(formatter, "{}:", name),
            Line::Comment(text) => write!(formatter, "    ; {}", text),
            Line::Raw(text) => formatter.write_str(text),
            Line::Blank => Ok(()),
        }
    }
}
