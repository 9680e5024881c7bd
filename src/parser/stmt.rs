use crate::{
    ast::{
        ast::Stmt,
        statements::{
            BlockStmt, ExpressionStmt, FnDeclStmt, ForStmt, IfStmt, Parameter, PrintStmt,
            ReturnStmt, VarDeclStmt, WhileStmt,
        },
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{
    parser::{parse_declaration, Parser},
    types::{expected_declaration_type, expected_parameter_type, parse_type},
};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();

    match handler {
        Some(handler) => handler(parser),
        None => parse_expression_stmt(parser),
    }
}

/// Body of an `if`, `else`, `while` or `for`.
///
/// Declarations are not statements here: a type keyword falls through to the
/// expression parser and is reported there.
pub fn parse_body_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if parser.current_token_kind().is_type_keyword() {
        return parse_expression_stmt(parser);
    }

    parse_stmt(parser)
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let expression = parse_expr(parser, BindingPower::Default)?;

    parser.expect(TokenKind::Semicolon, "Expected ';' after expression")?;

    Ok(Stmt::Expression(ExpressionStmt { expression }))
}

/// A type keyword starts either a function or a variable declaration;
/// `type name (` decides for a function.
pub fn parse_declaration_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if parser.peek(1).kind == TokenKind::Identifier && parser.peek(2).kind == TokenKind::OpenParen
    {
        parse_fn_decl_stmt(parser)
    } else {
        parse_var_decl_stmt(parser)
    }
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let type_tag = parse_type(parser, expected_declaration_type)?;
    let name = parser.expect(TokenKind::Identifier, "Expected variable name")?;

    let initializer = if parser.matches(TokenKind::Assignment) {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(
        TokenKind::Semicolon,
        "Expected ';' after variable declaration",
    )?;

    Ok(Stmt::VarDecl(VarDeclStmt {
        type_tag,
        name: name.value,
        initializer,
        position: name.position,
    }))
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let return_type = parse_type(parser, expected_declaration_type)?;
    let name = parser.expect(TokenKind::Identifier, "Expected function name")?;

    parser.expect(TokenKind::OpenParen, "Expected '(' after function name")?;

    let mut parameters = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let type_tag = parse_type(parser, expected_parameter_type)?;
            let parameter_name = parser.expect(TokenKind::Identifier, "Expected parameter name")?;

            parameters.push(Parameter {
                type_tag,
                name: parameter_name.value,
                position: parameter_name.position,
            });

            if !parser.matches(TokenKind::Comma) {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen, "Expected ')' after parameters")?;
    let open = parser.expect(TokenKind::OpenCurly, "Expected '{' before function body")?;

    let body = parse_block_body(parser, open.position)?;

    Ok(Stmt::FnDecl(FnDeclStmt {
        return_type,
        name: name.value,
        parameters,
        body,
        position: name.position,
    }))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;

    Ok(Stmt::Block(parse_block_body(parser, position)?))
}

/// Parses statements up to the closing `}`; the opening `{` is already consumed.
///
/// Errors inside the block are recovered from statement by statement.
fn parse_block_body(parser: &mut Parser, position: crate::Position) -> Result<BlockStmt, Error> {
    let mut body = vec![];

    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        if let Some(stmt) = parse_declaration(parser) {
            body.push(stmt);
        }
    }

    parser.expect(TokenKind::CloseCurly, "Expected '}' after block")?;

    Ok(BlockStmt { body, position })
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;

    parser.expect(TokenKind::OpenParen, "Expected '(' after 'if'")?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen, "Expected ')' after if condition")?;

    let then_branch = Box::new(parse_body_stmt(parser)?);
    let else_branch = if parser.matches(TokenKind::Else) {
        Some(Box::new(parse_body_stmt(parser)?))
    } else {
        None
    };

    Ok(Stmt::If(IfStmt {
        condition,
        then_branch,
        else_branch,
        position,
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;

    parser.expect(TokenKind::OpenParen, "Expected '(' after 'while'")?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen, "Expected ')' after while condition")?;

    let body = Box::new(parse_body_stmt(parser)?);

    Ok(Stmt::While(WhileStmt {
        condition,
        body,
        position,
    }))
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;

    parser.expect(TokenKind::OpenParen, "Expected '(' after 'for'")?;

    let initializer = if parser.matches(TokenKind::Semicolon) {
        None
    } else if parser.current_token_kind().is_type_keyword() {
        Some(Box::new(parse_var_decl_stmt(parser)?))
    } else {
        Some(Box::new(parse_expression_stmt(parser)?))
    };

    let condition = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };
    parser.expect(TokenKind::Semicolon, "Expected ';' after loop condition")?;

    let increment = if parser.current_token_kind() != TokenKind::CloseParen {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };
    parser.expect(TokenKind::CloseParen, "Expected ')' after for clauses")?;

    let body = Box::new(parse_body_stmt(parser)?);

    Ok(Stmt::For(ForStmt {
        initializer,
        condition,
        increment,
        body,
        position,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon, "Expected ';' after return value")?;

    Ok(Stmt::Return(ReturnStmt { value, position }))
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;

    parser.expect(TokenKind::OpenParen, "Expected '(' after 'print'")?;
    let expression = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen, "Expected ')' after print expression")?;
    parser.expect(TokenKind::Semicolon, "Expected ';' after print statement")?;

    Ok(Stmt::Print(PrintStmt {
        expression,
        position,
    }))
}
