//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and specialized functions for statement parsing.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! A failing handler returns an `Error`; the failure is reported to the
//! diagnostic sink at declaration level and the parser resynchronizes, so a
//! single pass reports every syntax error it can recover from.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::ast::{Program, Stmt},
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    lexer::tokens::{Token, TokenKind},
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// Tokens a statement can start with; recovery stops in front of them.
const SYNC_KINDS: [TokenKind; 9] = [
    TokenKind::If,
    TokenKind::For,
    TokenKind::While,
    TokenKind::Return,
    TokenKind::Function,
    TokenKind::Int,
    TokenKind::Float,
    TokenKind::Bool,
    TokenKind::String,
];

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream and maintains lookup tables for
/// parsing statements and expressions. The cursor only ever moves forward.
pub struct Parser<'a> {
    /// The list of tokens to parse, newlines removed, always ending in EOF
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Sink for recoverable syntax errors
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Parser<'a> {
    /// Creates a new Parser instance.
    ///
    /// Newline tokens carry no meaning to the grammar and are dropped here.
    /// An EOF token is appended if the stream does not already end with one.
    pub fn new(tokens: Vec<Token>, diagnostics: &'a mut Diagnostics) -> Self {
        let mut tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|token| token.kind != TokenKind::Newline)
            .collect();

        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let position = tokens
                .last()
                .map(|token| token.position)
                .unwrap_or_else(|| crate::Position::new(1, 1));
            tokens.push(crate::MK_TOKEN!(TokenKind::EOF, String::new(), position));
        }

        Parser {
            tokens,
            pos: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            diagnostics,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.peek(0)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the token `offset` places ahead, or EOF past the end.
    pub fn peek(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    /// Returns the most recently consumed token.
    pub fn previous(&self) -> Option<&Token> {
        self.pos.checked_sub(1).map(|index| &self.tokens[index])
    }

    /// Advances to the next token and returns the previous token.
    ///
    /// The cursor never moves past EOF.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos;
        if !self.at_eof() {
            self.pos += 1;
        }
        &self.tokens[index]
    }

    /// Consumes the current token when it has the given kind.
    pub fn matches(&mut self, kind: TokenKind) -> bool {
        if self.current_token_kind() == kind && kind != TokenKind::EOF {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a token of the specified kind.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `message` - What was expected, reported when the expectation fails
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error
    /// located at the offending token.
    pub fn expect(&mut self, expected_kind: TokenKind, message: &str) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: String::from(message),
                    found: token.describe(),
                },
                token.position,
            ));
        }

        Ok(self.advance().clone())
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        !self.at_eof()
    }

    pub fn at_eof(&self) -> bool {
        self.tokens[self.pos].kind == TokenKind::EOF
    }

    /// Reports an error that does not abort the current statement.
    pub fn report(&mut self, error: Error) {
        self.diagnostics.report(error);
    }

    /// Skips tokens until a likely statement boundary.
    ///
    /// At least one token is consumed. Stops right after a `;` or right before
    /// a token that starts a declaration or a control-flow statement.
    pub fn synchronize(&mut self) {
        self.advance();

        while !self.at_eof() {
            if self.previous().map(|token| token.kind) == Some(TokenKind::Semicolon) {
                return;
            }

            if SYNC_KINDS.contains(&self.current_token_kind()) {
                return;
            }

            self.advance();
        }
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Binding power of the current token, `Default` when it is not an operator.
    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.current_token_kind())
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Prefix handlers do not touch the binding power table, so a token such
    /// as `-` can be both a prefix and an infix operator.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

/// Parses one statement, recovering from a syntax error.
///
/// On failure the error is reported, the parser resynchronizes and `None` is
/// returned so the caller can carry on with the next statement.
pub fn parse_declaration(parser: &mut Parser) -> Option<Stmt> {
    match parse_stmt(parser) {
        Ok(stmt) => Some(stmt),
        Err(error) => {
            parser.report(error);
            parser.synchronize();
            None
        }
    }
}

/// Parses a stream of tokens into a Program.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses statements until EOF. Syntax
/// errors go to `diagnostics`; the returned Program holds every statement
/// that parsed cleanly.
pub fn parse(tokens: Vec<Token>, diagnostics: &mut Diagnostics) -> Program {
    let mut parser = Parser::new(tokens, diagnostics);
    create_token_lookups(&mut parser);

    let mut statements = vec![];

    while parser.has_tokens() {
        if let Some(stmt) = parse_declaration(&mut parser) {
            statements.push(stmt);
        }
    }

    debug!(statements = statements.len(), "parsed program");

    Program::new(statements)
}
