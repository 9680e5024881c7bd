use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::{
    errors::{diagnostics::Diagnostics, errors::ErrorImpl},
    Position, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &str);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            // Patterns are literals of this module; a bad one is a programming error.
            regex: Regex::new(pattern).expect("invalid lexer pattern"),
            handler,
        }
    }
}

lazy_static! {
    /// Ordered pattern table, first match at the cursor wins. Every pattern is
    /// anchored, and longer operators come before their one-character prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::new(r"^[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        RegexPattern::new(r"^[0-9]+\.[0-9]+", MK_DEFAULT_HANDLER!(TokenKind::FloatLiteral)),
        RegexPattern::new(r"^[0-9]+", MK_DEFAULT_HANDLER!(TokenKind::IntegerLiteral)),
        RegexPattern::new(r"^\n", MK_DEFAULT_HANDLER!(TokenKind::Newline)),
        RegexPattern::new(r"^[ \t\r]+", skip_handler),
        RegexPattern::new(r#"^"[^"]*""#, string_handler),
        RegexPattern::new(r#"^""#, unterminated_string_handler),
        RegexPattern::new(r"^//[^\n]*", skip_handler),
        RegexPattern::new(r"^\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket)),
        RegexPattern::new(r"^\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket)),
        RegexPattern::new(r"^\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly)),
        RegexPattern::new(r"^\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly)),
        RegexPattern::new(r"^\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen)),
        RegexPattern::new(r"^\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen)),
        RegexPattern::new(r"^==", MK_DEFAULT_HANDLER!(TokenKind::Equals)),
        RegexPattern::new(r"^!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals)),
        RegexPattern::new(r"^!", MK_DEFAULT_HANDLER!(TokenKind::Not)),
        RegexPattern::new(r"^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment)),
        RegexPattern::new(r"^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals)),
        RegexPattern::new(r"^<", MK_DEFAULT_HANDLER!(TokenKind::Less)),
        RegexPattern::new(r"^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals)),
        RegexPattern::new(r"^>", MK_DEFAULT_HANDLER!(TokenKind::Greater)),
        RegexPattern::new(r"^\|\|", MK_DEFAULT_HANDLER!(TokenKind::Or)),
        RegexPattern::new(r"^&&", MK_DEFAULT_HANDLER!(TokenKind::And)),
        RegexPattern::new(r"^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon)),
        RegexPattern::new(r"^,", MK_DEFAULT_HANDLER!(TokenKind::Comma)),
        RegexPattern::new(r"^\+", MK_DEFAULT_HANDLER!(TokenKind::Plus)),
        RegexPattern::new(r"^-", MK_DEFAULT_HANDLER!(TokenKind::Dash)),
        RegexPattern::new(r"^/", MK_DEFAULT_HANDLER!(TokenKind::Slash)),
        RegexPattern::new(r"^\*", MK_DEFAULT_HANDLER!(TokenKind::Star)),
        RegexPattern::new(r"^%", MK_DEFAULT_HANDLER!(TokenKind::Percent)),
    ];
}

pub struct Lexer<'a> {
    tokens: Vec<Token>,
    source: &'a str,
    pos: usize,
    line: i32,
    column: i32,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, diagnostics: &'a mut Diagnostics) -> Lexer<'a> {
        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            line: 1,
            column: 1,
            diagnostics,
        }
    }

    /// Moves the cursor past `text`, which must be the text at the cursor.
    pub fn advance_over(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        self.pos += text.len();
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn error(&mut self, error: ErrorImpl) {
        let position = self.position();
        self.error_at(error, position);
    }

    fn error_at(&mut self, error: ErrorImpl, position: Position) {
        self.diagnostics.report_at(error, position);
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) {
    lexer.advance_over(matched);
}

fn string_handler(lexer: &mut Lexer, matched: &str) {
    let string_literal = &matched[1..matched.len() - 1];

    lexer.push(MK_TOKEN!(
        TokenKind::StringLiteral,
        String::from(string_literal),
        lexer.position()
    ));
    lexer.advance_over(matched);
}

fn unterminated_string_handler(lexer: &mut Lexer, _matched: &str) {
    // No closing quote anywhere ahead: the rest of the input is the string.
    let start = lexer.position();
    let rest = lexer.remainder();
    lexer.advance_over(rest);
    lexer.error_at(ErrorImpl::UnterminatedString, start);
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) {
    let kind = RESERVED_LOOKUP
        .get(matched)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    lexer.push(MK_TOKEN!(kind, String::from(matched), lexer.position()));
    lexer.advance_over(matched);
}

/// Converts `source` into tokens, always terminated by an `EOF` token.
///
/// Characters that match no pattern are reported to `diagnostics` and
/// skipped, so one pass reports every lexical error in the file.
pub fn tokenize(source: &str, diagnostics: &mut Diagnostics) -> Vec<Token> {
    let mut lex = Lexer::new(source, diagnostics);

    while !lex.at_eof() {
        let remainder = lex.remainder();
        let matched = PATTERNS.iter().find_map(|pattern| {
            pattern
                .regex
                .find(remainder)
                .map(|found| (pattern.handler, found.as_str()))
        });

        match matched {
            Some((handler, text)) => handler(&mut lex, text),
            None => {
                let character = remainder.chars().next().unwrap_or('\0');
                lex.error(ErrorImpl::UnexpectedCharacter { character });

                let mut buffer = [0; 4];
                lex.advance_over(character.encode_utf8(&mut buffer));
            }
        }
    }

    let end = lex.position();
    lex.push(MK_TOKEN!(TokenKind::EOF, String::new(), end));
    debug!(tokens = lex.tokens.len(), "tokenized source");

    lex.tokens
}
