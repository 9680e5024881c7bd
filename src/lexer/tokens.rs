use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{ast::types::TypeTag, Position};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("int", TokenKind::Int);
        map.insert("float", TokenKind::Float);
        map.insert("bool", TokenKind::Bool);
        map.insert("string", TokenKind::String);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("function", TokenKind::Function);
        map.insert("return", TokenKind::Return);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("print", TokenKind::Print);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Newline,

    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Semicolon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Int,
    Float,
    Bool,
    String,
    If,
    Else,
    While,
    For,
    Function,
    Return,
    True,
    False,
    Print,
}

impl TokenKind {
    /// The declared type a type keyword stands for.
    pub fn as_type_tag(&self) -> Option<TypeTag> {
        match self {
            TokenKind::Int => Some(TypeTag::Int),
            TokenKind::Float => Some(TypeTag::Float),
            TokenKind::Bool => Some(TypeTag::Bool),
            TokenKind::String => Some(TypeTag::String),
            _ => None,
        }
    }

    pub fn is_type_keyword(&self) -> bool {
        self.as_type_tag().is_some()
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Token{{type={}, value='{}', line={}, column={}}}",
            self.kind, self.value, self.position.line, self.position.column
        )
    }
}

impl Token {
    /// Text used when the token shows up in a diagnostic.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EOF => String::from("end of input"),
            TokenKind::Newline => String::from("newline"),
            TokenKind::StringLiteral => format!("\"{}\"", self.value),
            _ => self.value.clone(),
        }
    }
}
