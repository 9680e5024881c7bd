use std::fmt::Display;

use crate::Position;

use super::{
    expressions::{AssignmentExpr, BinaryExpr, CallExpr, LiteralExpr, UnaryExpr, VariableExpr},
    statements::{
        BlockStmt, ExpressionStmt, FnDeclStmt, ForStmt, IfStmt, PrintStmt, ReturnStmt,
        VarDeclStmt, WhileStmt,
    },
};

/// Every statement kind the parser can produce.
///
/// The set is closed: passes match on it exhaustively, so adding a variant
/// is a compile error everywhere a pass forgot to handle it.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(ExpressionStmt),
    VarDecl(VarDeclStmt),
    Block(BlockStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Return(ReturnStmt),
    FnDecl(FnDeclStmt),
    Print(PrintStmt),
}

impl Stmt {
    pub fn position(&self) -> Position {
        match self {
            Stmt::Expression(stmt) => stmt.expression.position(),
            Stmt::VarDecl(stmt) => stmt.position,
            Stmt::Block(stmt) => stmt.position,
            Stmt::If(stmt) => stmt.position,
            Stmt::While(stmt) => stmt.position,
            Stmt::For(stmt) => stmt.position,
            Stmt::Return(stmt) => stmt.position,
            Stmt::FnDecl(stmt) => stmt.position,
            Stmt::Print(stmt) => stmt.position,
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::Expression(stmt) => stmt.fmt(f),
            Stmt::VarDecl(stmt) => stmt.fmt(f),
            Stmt::Block(stmt) => stmt.fmt(f),
            Stmt::If(stmt) => stmt.fmt(f),
            Stmt::While(stmt) => stmt.fmt(f),
            Stmt::For(stmt) => stmt.fmt(f),
            Stmt::Return(stmt) => stmt.fmt(f),
            Stmt::FnDecl(stmt) => stmt.fmt(f),
            Stmt::Print(stmt) => stmt.fmt(f),
        }
    }
}

/// Every expression kind the parser can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Literal(LiteralExpr),
    Variable(VariableExpr),
    Call(CallExpr),
    Assignment(AssignmentExpr),
}

impl Expr {
    /// Position diagnostics about this expression are reported at.
    pub fn position(&self) -> Position {
        match self {
            Expr::Binary(expr) => expr.position,
            Expr::Unary(expr) => expr.position,
            Expr::Literal(expr) => expr.position,
            Expr::Variable(expr) => expr.position,
            Expr::Call(expr) => expr.position,
            Expr::Assignment(expr) => expr.position,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Binary(expr) => expr.fmt(f),
            Expr::Unary(expr) => expr.fmt(f),
            Expr::Literal(expr) => expr.fmt(f),
            Expr::Variable(expr) => expr.fmt(f),
            Expr::Call(expr) => expr.fmt(f),
            Expr::Assignment(expr) => expr.fmt(f),
        }
    }
}

/// The root of a parsed source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Program { statements }
    }

    /// Top-level function declarations, in source order.
    pub fn functions(&self) -> impl Iterator<Item = &FnDeclStmt> {
        self.statements.iter().filter_map(|stmt| match stmt {
            Stmt::FnDecl(function) => Some(function),
            _ => None,
        })
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for stmt in &self.statements {
            writeln!(f, "{}", stmt)?;
        }

        Ok(())
    }
}
