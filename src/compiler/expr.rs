use crate::ast::{
    ast::Expr,
    expressions::{BinaryExpr, BinaryOperator, CallExpr, UnaryOperator},
    types::Literal,
};

use super::{
    compiler::{Compiler, ARGUMENT_SIZE},
    instructions::{Condition, Instruction, Operand, Reg},
};

/// Emits code leaving the value of `expression` in `eax`.
pub fn gen_expression(compiler: &mut Compiler, expression: &Expr) {
    match expression {
        Expr::Literal(literal) => gen_literal(compiler, &literal.value),
        Expr::Variable(variable) => {
            compiler.emit_commented(
                Instruction::Mov(Reg::Eax.into(), Operand::Memory(variable.name.clone())),
                &format!("load variable {}", variable.name),
            );
        }
        Expr::Assignment(assignment) => {
            gen_expression(compiler, &assignment.value);
            compiler.emit_commented(
                Instruction::Mov(Operand::Memory(assignment.name.clone()), Reg::Eax.into()),
                &format!("assign to {}", assignment.name),
            );
        }
        Expr::Binary(binary) => gen_binary(compiler, binary),
        Expr::Unary(unary) => {
            gen_expression(compiler, &unary.operand);

            match unary.operator {
                UnaryOperator::Negate => {
                    compiler.emit_commented(Instruction::Neg(Reg::Eax), "negate");
                }
                UnaryOperator::Not => {
                    compiler.emit(Instruction::Cmp(Reg::Eax.into(), Operand::Imm(0)));
                    gen_flag_to_eax(compiler, Condition::Equal);
                }
            }
        }
        Expr::Call(call) => gen_call(compiler, call),
    }
}

fn gen_literal(compiler: &mut Compiler, literal: &Literal) {
    match literal {
        Literal::Integer(value) => compiler.emit_commented(
            Instruction::Mov(Reg::Eax.into(), Operand::Imm(i64::from(*value))),
            "integer literal",
        ),
        Literal::Float(value) => {
            compiler.comment("Float literal (truncated to integer)");
            compiler.emit(Instruction::Mov(
                Reg::Eax.into(),
                Operand::Imm(value.trunc() as i64),
            ));
        }
        Literal::Boolean(value) => compiler.emit_commented(
            Instruction::Mov(Reg::Eax.into(), Operand::Imm(i64::from(*value))),
            "boolean literal",
        ),
        Literal::String(_) => {
            let label = compiler.new_label("str");
            compiler.emit_commented(
                Instruction::Mov(Reg::Eax.into(), Operand::Label(label)),
                "string literal",
            );
        }
    }
}

/// `setcc al; movzx eax, al` after a `cmp`.
fn gen_flag_to_eax(compiler: &mut Compiler, condition: Condition) {
    compiler.emit(Instruction::Set(condition, Reg::Al));
    compiler.emit(Instruction::Movzx(Reg::Eax, Reg::Al));
}

fn gen_binary(compiler: &mut Compiler, binary: &BinaryExpr) {
    gen_expression(compiler, &binary.left);
    compiler.emit_commented(Instruction::Push(Reg::Eax), "save left operand");

    gen_expression(compiler, &binary.right);
    compiler.emit_commented(
        Instruction::Mov(Reg::Ebx.into(), Reg::Eax.into()),
        "right operand in ebx",
    );
    compiler.emit_commented(Instruction::Pop(Reg::Eax), "left operand in eax");

    let comparison = match binary.operator {
        BinaryOperator::Add => {
            compiler.emit_commented(
                Instruction::Add(Reg::Eax.into(), Reg::Ebx.into()),
                "addition",
            );
            None
        }
        BinaryOperator::Subtract => {
            compiler.emit_commented(
                Instruction::Sub(Reg::Eax.into(), Reg::Ebx.into()),
                "subtraction",
            );
            None
        }
        BinaryOperator::Multiply => {
            compiler.emit_commented(Instruction::Imul(Reg::Eax, Reg::Ebx), "multiplication");
            None
        }
        BinaryOperator::Divide | BinaryOperator::Modulo => {
            compiler.emit_commented(Instruction::Cdq, "sign extend");
            compiler.emit_commented(Instruction::Idiv(Reg::Ebx), "division");
            if binary.operator == BinaryOperator::Modulo {
                compiler.emit_commented(
                    Instruction::Mov(Reg::Eax.into(), Reg::Edx.into()),
                    "remainder in edx",
                );
            }
            None
        }
        BinaryOperator::And => {
            compiler.emit_commented(Instruction::And(Reg::Eax, Reg::Ebx), "logical and");
            None
        }
        BinaryOperator::Or => {
            compiler.emit_commented(Instruction::Or(Reg::Eax, Reg::Ebx), "logical or");
            None
        }
        BinaryOperator::Equal => Some(Condition::Equal),
        BinaryOperator::NotEqual => Some(Condition::NotEqual),
        BinaryOperator::Less => Some(Condition::Less),
        BinaryOperator::LessEqual => Some(Condition::LessEqual),
        BinaryOperator::Greater => Some(Condition::Greater),
        BinaryOperator::GreaterEqual => Some(Condition::GreaterEqual),
    };

    if let Some(condition) = comparison {
        compiler.emit(Instruction::Cmp(Reg::Eax.into(), Reg::Ebx.into()));
        gen_flag_to_eax(compiler, condition);
    }
}

/// Arguments are pushed last to first, and the caller pops them.
fn gen_call(compiler: &mut Compiler, call: &CallExpr) {
    // Analysis rejects any other callee.
    let Some(name) = call.callee_name() else {
        return;
    };

    compiler.comment(format!("Function call: {}", name));

    for (index, argument) in call.arguments.iter().enumerate().rev() {
        gen_expression(compiler, argument);
        compiler.emit_commented(
            Instruction::Push(Reg::Eax),
            &format!("push argument {}", index),
        );
    }

    compiler.emit(Instruction::Call(String::from(name)));

    if !call.arguments.is_empty() {
        let cleanup = ARGUMENT_SIZE * call.arguments.len() as i64;
        compiler.emit_commented(
            Instruction::Add(Reg::Esp.into(), Operand::Imm(cleanup)),
            "clean up arguments",
        );
    }
}
