//! Type definitions for the AST.
//!
//! The language has exactly four types. A `TypeTag` is written by the user in
//! declarations and is also what the analyzer infers for every expression.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Int,
    Float,
    Bool,
    String,
}

impl TypeTag {
    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeTag::Int | TypeTag::Float)
    }

    /// Whether a value of type `actual` may be stored where `self` is expected.
    ///
    /// Identical types are compatible, and an int may widen to a float.
    pub fn accepts(&self, actual: TypeTag) -> bool {
        *self == actual || (*self == TypeTag::Float && actual == TypeTag::Int)
    }

    /// Result type of an arithmetic operation on two numeric operands.
    pub fn promote(left: TypeTag, right: TypeTag) -> TypeTag {
        if left == TypeTag::Float || right == TypeTag::Float {
            TypeTag::Float
        } else {
            TypeTag::Int
        }
    }
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Bool => "bool",
            TypeTag::String => "string",
        };

        write!(f, "{}", name)
    }
}

/// A literal value as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i32),
    Float(f64),
    String(String),
    Boolean(bool),
}

impl Literal {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Literal::Integer(_) => TypeTag::Int,
            Literal::Float(_) => TypeTag::Float,
            Literal::String(_) => TypeTag::String,
            Literal::Boolean(_) => TypeTag::Bool,
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Integer(value) => write!(f, "{}", value),
            Literal::Float(value) => write!(f, "{:?}", value),
            Literal::String(value) => write!(f, "\"{}\"", value),
            Literal::Boolean(value) => write!(f, "{}", value),
        }
    }
}
