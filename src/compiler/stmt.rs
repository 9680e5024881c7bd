use crate::ast::{
    ast::Stmt,
    statements::{BlockStmt, FnDeclStmt, ForStmt, IfStmt, ReturnStmt, VarDeclStmt, WhileStmt},
};

use super::{
    compiler::Compiler,
    expr::gen_expression,
    instructions::{Instruction, Label, Operand, Reg},
};

pub fn gen_statement(compiler: &mut Compiler, statement: &Stmt) {
    match statement {
        Stmt::Expression(stmt) => gen_expression(compiler, &stmt.expression),
        Stmt::VarDecl(stmt) => gen_var_decl(compiler, stmt),
        Stmt::Block(stmt) => gen_block(compiler, stmt),
        Stmt::If(stmt) => gen_if(compiler, stmt),
        Stmt::While(stmt) => gen_while(compiler, stmt),
        Stmt::For(stmt) => gen_for(compiler, stmt),
        Stmt::Return(stmt) => gen_return(compiler, stmt),
        Stmt::FnDecl(stmt) => gen_function(compiler, stmt),
        Stmt::Print(stmt) => {
            compiler.comment("Print statement");
            gen_expression(compiler, &stmt.expression);
            compiler.emit_commented(Instruction::Push(Reg::Eax), "push value to print");
            compiler.emit_commented(
                Instruction::Call(String::from("print_int")),
                "call print function",
            );
            compiler.emit_commented(
                Instruction::Add(Reg::Esp.into(), Operand::Imm(4)),
                "clean up stack",
            );
        }
    }
}

fn gen_var_decl(compiler: &mut Compiler, stmt: &VarDeclStmt) {
    compiler.comment(format!("Variable declaration: {}", stmt.name));

    if let Some(initializer) = &stmt.initializer {
        gen_expression(compiler, initializer);
        compiler.emit_commented(
            Instruction::Mov(Operand::Memory(stmt.name.clone()), Reg::Eax.into()),
            "store initial value",
        );
    }
}

fn gen_block(compiler: &mut Compiler, stmt: &BlockStmt) {
    compiler.comment("Block start");

    for statement in &stmt.body {
        gen_statement(compiler, statement);
    }

    compiler.comment("Block end");
}

/// Jumps to `target` when `eax` is zero.
fn gen_branch_if_false(compiler: &mut Compiler, target: Label) {
    compiler.emit(Instruction::Cmp(Reg::Eax.into(), Operand::Imm(0)));
    compiler.emit(Instruction::Je(target));
}

fn gen_if(compiler: &mut Compiler, stmt: &IfStmt) {
    let else_label = compiler.new_label("else");
    let end_label = compiler.new_label("endif");

    compiler.comment("If statement");

    gen_expression(compiler, &stmt.condition);
    gen_branch_if_false(compiler, else_label);

    gen_statement(compiler, &stmt.then_branch);
    compiler.emit(Instruction::Jmp(end_label));

    compiler.set_label(else_label);
    if let Some(else_branch) = &stmt.else_branch {
        gen_statement(compiler, else_branch);
    }

    compiler.set_label(end_label);
}

fn gen_while(compiler: &mut Compiler, stmt: &WhileStmt) {
    let loop_label = compiler.new_label("loop");
    let end_label = compiler.new_label("endloop");

    compiler.comment("While loop");
    compiler.set_label(loop_label);

    gen_expression(compiler, &stmt.condition);
    gen_branch_if_false(compiler, end_label);

    gen_statement(compiler, &stmt.body);
    compiler.emit(Instruction::Jmp(loop_label));

    compiler.set_label(end_label);
}

fn gen_for(compiler: &mut Compiler, stmt: &ForStmt) {
    let loop_label = compiler.new_label("forloop");
    let end_label = compiler.new_label("endfor");

    compiler.comment("For loop");

    if let Some(initializer) = &stmt.initializer {
        gen_statement(compiler, initializer);
    }

    compiler.set_label(loop_label);

    if let Some(condition) = &stmt.condition {
        gen_expression(compiler, condition);
        gen_branch_if_false(compiler, end_label);
    }

    gen_statement(compiler, &stmt.body);

    if let Some(increment) = &stmt.increment {
        gen_expression(compiler, increment);
    }

    compiler.emit(Instruction::Jmp(loop_label));
    compiler.set_label(end_label);
}

fn gen_return(compiler: &mut Compiler, stmt: &ReturnStmt) {
    compiler.comment("Return statement");

    match &stmt.value {
        Some(value) => gen_expression(compiler, value),
        None => compiler.emit_commented(
            Instruction::Mov(Reg::Eax.into(), Operand::Imm(0)),
            "default return value",
        ),
    }

    compiler.emit_epilogue();
}

fn gen_function(compiler: &mut Compiler, stmt: &FnDeclStmt) {
    compiler.blank();
    compiler.symbol(&stmt.name);
    compiler.emit_prologue();

    gen_block(compiler, &stmt.body);

    compiler.emit_epilogue();
}
