use std::fmt::Display;

use crate::Position;

use super::{
    ast::{Expr, Stmt},
    types::TypeTag,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
}

impl Display for ExpressionStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{};", self.expression)
    }
}

/// `type name [= initializer];`
///
/// `position` is the position of the variable name.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub type_tag: TypeTag,
    pub name: String,
    pub initializer: Option<Expr>,
    pub position: Position,
}

impl Display for VarDeclStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.initializer {
            Some(initializer) => write!(f, "{} {} = {};", self.type_tag, self.name, initializer),
            None => write!(f, "{} {};", self.type_tag, self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub position: Position,
}

impl Display for BlockStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{{")?;
        for stmt in &self.body {
            writeln!(f, "  {}", stmt)?;
        }
        write!(f, "}}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
    pub position: Position,
}

impl Display for IfStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.else_branch {
            Some(else_branch) => write!(
                f,
                "if ({}) {} else {}",
                self.condition, self.then_branch, else_branch
            ),
            None => write!(f, "if ({}) {}", self.condition, self.then_branch),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub position: Position,
}

impl Display for WhileStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "while ({}) {}", self.condition, self.body)
    }
}

/// `for (initializer; condition; increment) body`, every header part optional.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub initializer: Option<Box<Stmt>>,
    pub condition: Option<Expr>,
    pub increment: Option<Expr>,
    pub body: Box<Stmt>,
    pub position: Position,
}

impl Display for ForStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "for (")?;
        match &self.initializer {
            Some(initializer) => write!(f, "{} ", initializer)?,
            None => write!(f, "; ")?,
        }
        if let Some(condition) = &self.condition {
            write!(f, "{}", condition)?;
        }
        write!(f, "; ")?;
        if let Some(increment) = &self.increment {
            write!(f, "{}", increment)?;
        }
        write!(f, ") {}", self.body)
    }
}

/// `position` is the position of the `return` keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub position: Position,
}

impl Display for ReturnStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "return {};", value),
            None => write!(f, "return;"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub type_tag: TypeTag,
    pub name: String,
    pub position: Position,
}

impl Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.type_tag, self.name)
    }
}

/// `return_type name(parameters) { body }`
///
/// `position` is the position of the function name.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub return_type: TypeTag,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub body: BlockStmt,
    pub position: Position,
}

impl Display for FnDeclStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}(", self.return_type, self.name)?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", parameter)?;
        }
        write!(f, ") {}", self.body)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub expression: Expr,
    pub position: Position,
}

impl Display for PrintStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "print({});", self.expression)
    }
}
