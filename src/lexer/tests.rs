//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (integers and floats)
//! - String literals
//! - Operators and punctuation
//! - Comments and newlines
//! - Error cases

use super::{lexer::tokenize, tokens::TokenKind};
use crate::{
    errors::{diagnostics::Diagnostics, errors::ErrorKind},
    Position,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize(source, &mut diagnostics);
    assert!(!diagnostics.has_errors(), "{}", diagnostics);

    tokens.into_iter().map(|token| token.kind).collect()
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("int float bool string if else while for function return true false print"),
        vec![
            TokenKind::Int,
            TokenKind::Float,
            TokenKind::Bool,
            TokenKind::String,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::For,
            TokenKind::Function,
            TokenKind::Return,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Print,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize("foo baz_123 _under integer", &mut diagnostics);

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "baz_123");
    assert_eq!(tokens[2].value, "_under");
    // Keyword prefixes stay identifiers.
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "integer");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize("42 3.14 0 7.", &mut diagnostics);

    assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::IntegerLiteral);
    // A trailing dot is not part of a float.
    assert_eq!(tokens[3].kind, TokenKind::IntegerLiteral);
    assert_eq!(tokens[3].value, "7");
    assert!(diagnostics.has_errors());
}

#[test]
fn test_tokenize_strings() {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize("\"hello world\" \"\"", &mut diagnostics);

    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[0].value, "hello world");
    assert_eq!(tokens[1].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[1].value, "");
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("= == ! != < <= > >= && || + - * / %"),
        vec![
            TokenKind::Assignment,
            TokenKind::Equals,
            TokenKind::Not,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::LessEquals,
            TokenKind::Greater,
            TokenKind::GreaterEquals,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } [ ] ; ,"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_comments_and_newlines() {
    assert_eq!(
        kinds("int x; // trailing comment\nx = 1;"),
        vec![
            TokenKind::Int,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::Newline,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::IntegerLiteral,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_positions_are_one_based() {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize("int x;\n  x = 10;", &mut diagnostics);

    assert_eq!(tokens[0].position, Position::new(1, 1));
    assert_eq!(tokens[1].position, Position::new(1, 5));
    assert_eq!(tokens[2].position, Position::new(1, 6));
    assert_eq!(tokens[3].kind, TokenKind::Newline);
    assert_eq!(tokens[4].position, Position::new(2, 3));
    assert_eq!(tokens[6].value, "10");
    assert_eq!(tokens[6].position, Position::new(2, 7));
}

#[test]
fn test_eof_only_for_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
}

#[test]
fn test_reports_every_unexpected_character() {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize("int a = 1 # 2;\nint b = @;", &mut diagnostics);

    assert_eq!(diagnostics.error_count(), 2);
    assert_eq!(diagnostics.count_of(ErrorKind::LexicalError), 2);
    assert_eq!(diagnostics.errors()[0].get_position(), &Position::new(1, 11));
    assert_eq!(diagnostics.errors()[0].message(), "Unexpected character: '#'");
    assert_eq!(diagnostics.errors()[1].get_position(), &Position::new(2, 9));

    // Scanning carried on past both errors.
    assert!(tokens.iter().any(|token| token.value == "b"));
    assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::EOF));
}

#[test]
fn test_lone_ampersand_is_an_error() {
    let mut diagnostics = Diagnostics::new();
    tokenize("a & b | c", &mut diagnostics);

    assert_eq!(diagnostics.error_count(), 2);
    assert_eq!(diagnostics.errors()[0].message(), "Unexpected character: '&'");
    assert_eq!(diagnostics.errors()[1].message(), "Unexpected character: '|'");
}

#[test]
fn test_unterminated_string() {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize("string s = \"never closed;\nint y;", &mut diagnostics);

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.errors()[0].get_error_name(), "UnterminatedString");
    assert_eq!(diagnostics.errors()[0].get_position(), &Position::new(1, 12));
    assert!(tokens
        .iter()
        .all(|token| token.kind != TokenKind::StringLiteral));
    assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::EOF));
}
