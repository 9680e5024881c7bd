use super::{
    ast::{Expr, Program, Stmt},
    expressions::{BinaryExpr, BinaryOperator, CallExpr, LiteralExpr, VariableExpr},
    statements::{ExpressionStmt, ReturnStmt},
    types::{Literal, TypeTag},
};
use crate::Position;

fn int(value: i32, column: i32) -> Expr {
    Expr::Literal(LiteralExpr {
        value: Literal::Integer(value),
        position: Position::new(1, column),
    })
}

#[test]
fn test_type_compatibility() {
    assert!(TypeTag::Int.accepts(TypeTag::Int));
    assert!(TypeTag::Float.accepts(TypeTag::Int));
    assert!(!TypeTag::Int.accepts(TypeTag::Float));
    assert!(!TypeTag::String.accepts(TypeTag::Bool));
    assert!(!TypeTag::Bool.accepts(TypeTag::Int));
}

#[test]
fn test_numeric_promotion() {
    assert_eq!(TypeTag::promote(TypeTag::Int, TypeTag::Int), TypeTag::Int);
    assert_eq!(TypeTag::promote(TypeTag::Int, TypeTag::Float), TypeTag::Float);
    assert_eq!(TypeTag::promote(TypeTag::Float, TypeTag::Int), TypeTag::Float);
    assert!(!TypeTag::String.is_numeric());
}

#[test]
fn test_expression_display() {
    let expr = Expr::Binary(BinaryExpr {
        left: Box::new(int(1, 1)),
        operator: BinaryOperator::Add,
        right: Box::new(int(2, 5)),
        position: Position::new(1, 3),
    });

    assert_eq!(expr.to_string(), "(1 + 2)");
    assert_eq!(expr.position(), Position::new(1, 3));
}

#[test]
fn test_call_callee_name() {
    let call = CallExpr {
        callee: Box::new(Expr::Variable(VariableExpr {
            name: "add".to_string(),
            position: Position::new(1, 1),
        })),
        arguments: vec![int(1, 5), int(2, 8)],
        position: Position::new(1, 9),
    };

    assert_eq!(call.callee_name(), Some("add"));
    assert_eq!(call.to_string(), "add(1, 2)");
}

#[test]
fn test_program_display() {
    let program = Program::new(vec![
        Stmt::Expression(ExpressionStmt {
            expression: int(7, 1),
        }),
        Stmt::Return(ReturnStmt {
            value: None,
            position: Position::new(2, 1),
        }),
    ]);

    assert_eq!(program.to_string(), "7;\nreturn;\n");
    assert_eq!(program.functions().count(), 0);
}
