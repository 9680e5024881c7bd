use tracing::debug;

use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        expressions::{
            AssignmentExpr, BinaryExpr, BinaryOperator, CallExpr, UnaryExpr, UnaryOperator,
        },
        statements::{BlockStmt, FnDeclStmt, ForStmt, ReturnStmt, VarDeclStmt},
        types::TypeTag,
    },
    errors::{diagnostics::Diagnostics, errors::ErrorImpl},
    symbol_table::symbol_table::{SymbolKind, SymbolTable},
    Position,
};

/// State carried through one analysis walk.
pub struct TypeChecker<'a> {
    pub symbols: SymbolTable,
    /// Whether the walk is inside a function body
    pub in_function: bool,
    /// Declared return type of the enclosing function; `None` accepts any return
    pub expected_return: Option<TypeTag>,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> TypeChecker<'a> {
    pub fn new(diagnostics: &'a mut Diagnostics) -> Self {
        TypeChecker {
            symbols: SymbolTable::new(),
            in_function: false,
            expected_return: None,
            diagnostics,
        }
    }

    pub fn error(&mut self, error: ErrorImpl, position: Position) {
        self.diagnostics.report_at(error, position);
    }

    /// Declares a symbol in the current scope, reporting a redeclaration.
    fn declare(&mut self, name: &str, type_tag: TypeTag, kind: SymbolKind, position: Position) {
        if let Err(error) = self.symbols.declare(name, type_tag, kind, position) {
            self.diagnostics.report(error);
        }
    }

    fn redeclared(&mut self, name: &str, kind: SymbolKind, position: Position) -> bool {
        if !self.symbols.is_defined_in_current_scope(name) {
            return false;
        }

        self.error(
            ErrorImpl::AlreadyDeclared {
                what: kind.to_string(),
                name: String::from(name),
            },
            position,
        );
        true
    }
}

/// Infers the type of `ast`.
///
/// `None` means the subtree already produced a diagnostic; callers never
/// report anything further about an absent type.
pub fn type_check_expr(type_checker: &mut TypeChecker, ast: &Expr) -> Option<TypeTag> {
    match ast {
        Expr::Literal(literal) => Some(literal.value.type_tag()),
        Expr::Variable(variable) => match type_checker.symbols.lookup(&variable.name) {
            Some(symbol) => Some(symbol.type_tag),
            None => {
                type_checker.error(
                    ErrorImpl::VariableNotDeclared {
                        variable: variable.name.clone(),
                    },
                    variable.position,
                );
                None
            }
        },
        Expr::Assignment(assignment) => type_check_assignment(type_checker, assignment),
        Expr::Binary(binary) => type_check_binary(type_checker, binary),
        Expr::Unary(unary) => type_check_unary(type_checker, unary),
        Expr::Call(call) => type_check_call(type_checker, call),
    }
}

fn type_check_assignment(type_checker: &mut TypeChecker, ast: &AssignmentExpr) -> Option<TypeTag> {
    let target_type = match type_checker.symbols.lookup(&ast.name) {
        Some(symbol) => symbol.type_tag,
        None => {
            type_checker.error(
                ErrorImpl::VariableNotDeclared {
                    variable: ast.name.clone(),
                },
                ast.position,
            );
            return None;
        }
    };

    if let Some(value_type) = type_check_expr(type_checker, &ast.value) {
        if !target_type.accepts(value_type) {
            type_checker.error(
                ErrorImpl::TypeMatchError {
                    expected: target_type.to_string(),
                    received: value_type.to_string(),
                },
                ast.position,
            );
        }
    }

    Some(target_type)
}

fn type_check_binary(type_checker: &mut TypeChecker, ast: &BinaryExpr) -> Option<TypeTag> {
    let left = type_check_expr(type_checker, &ast.left);
    let right = type_check_expr(type_checker, &ast.right);
    let (left, right) = (left?, right?);

    let result = match ast.operator {
        BinaryOperator::Add
        | BinaryOperator::Subtract
        | BinaryOperator::Multiply
        | BinaryOperator::Divide
        | BinaryOperator::Modulo => {
            (left.is_numeric() && right.is_numeric()).then(|| TypeTag::promote(left, right))
        }
        BinaryOperator::Equal | BinaryOperator::NotEqual => {
            left.accepts(right).then_some(TypeTag::Bool)
        }
        BinaryOperator::Less
        | BinaryOperator::LessEqual
        | BinaryOperator::Greater
        | BinaryOperator::GreaterEqual => {
            (left.is_numeric() && right.is_numeric()).then_some(TypeTag::Bool)
        }
        BinaryOperator::And | BinaryOperator::Or => {
            (left == TypeTag::Bool && right == TypeTag::Bool).then_some(TypeTag::Bool)
        }
    };

    if result.is_none() {
        type_checker.error(
            ErrorImpl::InvalidOperandTypes {
                operator: ast.operator.to_string(),
                left: left.to_string(),
                right: right.to_string(),
            },
            ast.position,
        );
    }

    result
}

fn type_check_unary(type_checker: &mut TypeChecker, ast: &UnaryExpr) -> Option<TypeTag> {
    let operand = type_check_expr(type_checker, &ast.operand)?;

    let result = match ast.operator {
        UnaryOperator::Negate => operand.is_numeric().then_some(operand),
        UnaryOperator::Not => (operand == TypeTag::Bool).then_some(TypeTag::Bool),
    };

    if result.is_none() {
        type_checker.error(
            ErrorImpl::InvalidOperandType {
                operator: ast.operator.to_string(),
                operand: operand.to_string(),
            },
            ast.position,
        );
    }

    result
}

fn type_check_call(type_checker: &mut TypeChecker, ast: &CallExpr) -> Option<TypeTag> {
    let Some(name) = ast.callee_name() else {
        type_checker.error(ErrorImpl::CalleeNotCallable, ast.position);
        return None;
    };

    let (return_type, kind) = match type_checker.symbols.lookup(name) {
        Some(symbol) => (symbol.type_tag, symbol.kind),
        None => {
            type_checker.error(
                ErrorImpl::FunctionNotFound {
                    function: String::from(name),
                },
                ast.position,
            );
            return None;
        }
    };

    if kind != SymbolKind::Function {
        type_checker.error(
            ErrorImpl::NotAFunction {
                name: String::from(name),
            },
            ast.position,
        );
        return None;
    }

    // Arguments are checked on their own; arity and parameter types are not.
    for argument in &ast.arguments {
        type_check_expr(type_checker, argument);
    }

    Some(return_type)
}

fn type_check_condition(type_checker: &mut TypeChecker, construct: &str, condition: &Expr) {
    if let Some(found) = type_check_expr(type_checker, condition) {
        if found != TypeTag::Bool {
            type_checker.error(
                ErrorImpl::NonBooleanCondition {
                    construct: String::from(construct),
                    found: found.to_string(),
                },
                condition.position(),
            );
        }
    }
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, ast: &Stmt) {
    match ast {
        Stmt::Expression(stmt) => {
            type_check_expr(type_checker, &stmt.expression);
        }
        Stmt::VarDecl(stmt) => type_check_var_decl(type_checker, stmt),
        Stmt::Block(stmt) => type_check_block(type_checker, stmt),
        Stmt::If(stmt) => {
            type_check_condition(type_checker, "If", &stmt.condition);
            type_check_stmt(type_checker, &stmt.then_branch);
            if let Some(else_branch) = &stmt.else_branch {
                type_check_stmt(type_checker, else_branch);
            }
        }
        Stmt::While(stmt) => {
            type_check_condition(type_checker, "While", &stmt.condition);
            type_check_stmt(type_checker, &stmt.body);
        }
        Stmt::For(stmt) => type_check_for(type_checker, stmt),
        Stmt::Return(stmt) => type_check_return(type_checker, stmt),
        Stmt::FnDecl(stmt) => type_check_fn_decl(type_checker, stmt),
        Stmt::Print(stmt) => {
            type_check_expr(type_checker, &stmt.expression);
        }
    }
}

fn type_check_var_decl(type_checker: &mut TypeChecker, ast: &VarDeclStmt) {
    if type_checker.redeclared(&ast.name, SymbolKind::Variable, ast.position) {
        return;
    }

    // The initializer is checked before the name comes into scope.
    if let Some(initializer) = &ast.initializer {
        if let Some(initializer_type) = type_check_expr(type_checker, initializer) {
            if !ast.type_tag.accepts(initializer_type) {
                type_checker.error(
                    ErrorImpl::TypeMatchError {
                        expected: ast.type_tag.to_string(),
                        received: initializer_type.to_string(),
                    },
                    ast.position,
                );
            }
        }
    }

    type_checker.declare(&ast.name, ast.type_tag, SymbolKind::Variable, ast.position);
}

pub fn type_check_block(type_checker: &mut TypeChecker, ast: &BlockStmt) {
    type_checker.symbols.push_scope();

    for stmt in &ast.body {
        type_check_stmt(type_checker, stmt);
    }

    type_checker.symbols.pop_scope();
}

fn type_check_for(type_checker: &mut TypeChecker, ast: &ForStmt) {
    type_checker.symbols.push_scope();

    if let Some(initializer) = &ast.initializer {
        type_check_stmt(type_checker, initializer);
    }
    if let Some(condition) = &ast.condition {
        type_check_condition(type_checker, "For", condition);
    }
    if let Some(increment) = &ast.increment {
        type_check_expr(type_checker, increment);
    }
    type_check_stmt(type_checker, &ast.body);

    type_checker.symbols.pop_scope();
}

fn type_check_return(type_checker: &mut TypeChecker, ast: &ReturnStmt) {
    if !type_checker.in_function {
        type_checker.error(ErrorImpl::ReturnOutsideFunction, ast.position);
        return;
    }

    let expected = type_checker.expected_return;

    match &ast.value {
        Some(value) => {
            let returned = type_check_expr(type_checker, value);
            if let (Some(returned), Some(expected)) = (returned, expected) {
                if !expected.accepts(returned) {
                    type_checker.error(
                        ErrorImpl::ReturnTypeMatchError {
                            expected: expected.to_string(),
                            received: returned.to_string(),
                        },
                        ast.position,
                    );
                }
            }
        }
        None => {
            if let Some(expected) = expected {
                type_checker.error(
                    ErrorImpl::MissingReturnValue {
                        expected: expected.to_string(),
                    },
                    ast.position,
                );
            }
        }
    }
}

/// The function is declared before its body is checked, so it can call
/// itself. Parameters get a scope of their own and the body block opens
/// another one inside it.
fn type_check_fn_decl(type_checker: &mut TypeChecker, ast: &FnDeclStmt) {
    if type_checker.redeclared(&ast.name, SymbolKind::Function, ast.position) {
        return;
    }

    type_checker.declare(&ast.name, ast.return_type, SymbolKind::Function, ast.position);

    type_checker.symbols.push_scope();
    let was_in_function = type_checker.in_function;
    let previous_return = type_checker.expected_return;
    type_checker.in_function = true;
    type_checker.expected_return = Some(ast.return_type);

    for parameter in &ast.parameters {
        type_checker.declare(
            &parameter.name,
            parameter.type_tag,
            SymbolKind::Parameter,
            parameter.position,
        );
    }

    type_check_block(type_checker, &ast.body);

    type_checker.in_function = was_in_function;
    type_checker.expected_return = previous_return;
    type_checker.symbols.pop_scope();
}

/// Analyzes a whole program, reporting every problem to `diagnostics`.
pub fn type_check(ast: &Program, diagnostics: &mut Diagnostics) {
    let mut type_checker = TypeChecker::new(diagnostics);

    for stmt in &ast.statements {
        type_check_stmt(&mut type_checker, stmt);
    }

    debug!(
        statements = ast.statements.len(),
        "semantic analysis walked program"
    );
}
