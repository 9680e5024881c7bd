use crate::{
    ast::{
        ast::Expr,
        expressions::{
            AssignmentExpr, BinaryExpr, BinaryOperator, CallExpr, LiteralExpr, UnaryExpr,
            UnaryOperator, VariableExpr,
        },
        types::Literal,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token = parser.current_token();
    let nud = match parser.get_nud_lookup().get(&token.kind) {
        Some(nud) => *nud,
        None => {
            return Err(Error::new(
                ErrorImpl::ExpectedExpression {
                    found: token.describe(),
                },
                token.position,
            ))
        }
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => break,
        };

        let operator_bp = parser.current_binding_power();
        left = led(parser, left, operator_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    let value = match token.kind {
        TokenKind::IntegerLiteral => match token.value.parse() {
            Ok(value) => Literal::Integer(value),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.position,
                ))
            }
        },
        TokenKind::FloatLiteral => match token.value.parse() {
            Ok(value) => Literal::Float(value),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.position,
                ))
            }
        },
        TokenKind::StringLiteral => Literal::String(token.value),
        TokenKind::True => Literal::Boolean(true),
        TokenKind::False => Literal::Boolean(false),
        TokenKind::Identifier => {
            return Ok(Expr::Variable(VariableExpr {
                name: token.value,
                position: token.position,
            }))
        }
        _ => {
            return Err(Error::new(
                ErrorImpl::ExpectedExpression {
                    found: token.describe(),
                },
                token.position,
            ))
        }
    };

    Ok(Expr::Literal(LiteralExpr {
        value,
        position: token.position,
    }))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operator = match BinaryOperator::from_token(operator_token.kind) {
        Some(operator) => operator,
        None => {
            return Err(Error::new(
                ErrorImpl::ExpectedExpression {
                    found: operator_token.describe(),
                },
                operator_token.position,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        left: Box::new(left),
        operator,
        right: Box::new(right),
        position: operator_token.position,
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operator = match UnaryOperator::from_token(operator_token.kind) {
        Some(operator) => operator,
        None => {
            return Err(Error::new(
                ErrorImpl::ExpectedExpression {
                    found: operator_token.describe(),
                },
                operator_token.position,
            ))
        }
    };

    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Unary(UnaryExpr {
        operator,
        operand: Box::new(operand),
        position: operator_token.position,
    }))
}

/// `target = value`, right-associative.
///
/// A target other than a bare variable is reported without aborting the
/// statement, and the already-parsed left side becomes the result.
pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let value = parse_expr(parser, BindingPower::Default)?;

    match left {
        Expr::Variable(variable) => Ok(Expr::Assignment(AssignmentExpr {
            name: variable.name,
            value: Box::new(value),
            position: variable.position,
        })),
        left => {
            parser.report(Error::new(
                ErrorImpl::InvalidAssignmentTarget,
                operator_token.position,
            ));
            Ok(left)
        }
    }
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen, "Expected ')' after expression")?;

    Ok(expr)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let mut arguments = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            arguments.push(parse_expr(parser, BindingPower::Default)?);

            if !parser.matches(TokenKind::Comma) {
                break;
            }
        }
    }

    let paren = parser.expect(TokenKind::CloseParen, "Expected ')' after arguments")?;

    Ok(Expr::Call(CallExpr {
        callee: Box::new(left),
        arguments,
        position: paren.position,
    }))
}
