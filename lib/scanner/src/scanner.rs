use std::fmt::Display;

use cursor::Cursor;
use errors::{Diagnostic, Diagnostics};
use itertools::Itertools;
use log::debug;

pub mod token;
pub use cursor::{Col, Line};
pub use token::{Literal, Token, TokenKind};
use TokenKind::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScanErrorType {
    #[error("Unexpected character: {0}")]
    UnexpectedCharacter(char),
    #[error("Unterminated string.")]
    UnterminatedString,
    #[error("Invalid number literal: {0}")]
    InvalidNumber(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {line}] Error: {error}")]
pub struct ScanError {
    pub error: ScanErrorType,
    pub line: Line,
    pub col: Col,
}

impl From<ScanError> for Diagnostic {
    fn from(e: ScanError) -> Self {
        Diagnostic::new(e.line, e.col, e.error)
    }
}

#[derive(thiserror::Error, Debug, Default, PartialEq)]
pub struct ScanErrors(pub Vec<ScanError>);

impl Display for ScanErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}

impl From<ScanErrors> for Diagnostics {
    fn from(errors: ScanErrors) -> Self {
        Diagnostics(errors.0.into_iter().map_into().collect())
    }
}

/// Turns source text into the token sequence consumed by the parser.
///
/// Scanning does not stop at the first bad character: every error is
/// collected and reported together.
pub struct Scanner<'a> {
    start: Cursor<'a>,
    cursor: Cursor<'a>,
    tokens: Vec<Token<'a>>,
    errors: ScanErrors,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        let cursor: Cursor = source.into();
        Self {
            start: cursor.clone(),
            cursor,
            tokens: Vec::new(),
            errors: ScanErrors::default(),
        }
    }

    pub fn scan_tokens(mut self) -> Result<Vec<Token<'a>>, ScanErrors> {
        loop {
            self.start = self.cursor.clone();
            let Some(c) = self.cursor.next() else { break };

            match c {
                '(' => self.add_token(LeftParen),
                ')' => self.add_token(RightParen),
                '{' => self.add_token(LeftBrace),
                '}' => self.add_token(RightBrace),
                ',' => self.add_token(Comma),
                '.' => self.add_token(Dot),
                '-' => self.add_token(Minus),
                '+' => self.add_token(Plus),
                ';' => self.add_token(Semicolon),
                '*' => self.add_token(Star),

                '!' => self.add_one_or_two('=', BangEqual, Bang),
                '=' => self.add_one_or_two('=', EqualEqual, Equal),
                '<' => self.add_one_or_two('=', LessEqual, Less),
                '>' => self.add_one_or_two('=', GreaterEqual, Greater),

                '/' => {
                    if self.consume_if_matches('/') {
                        // Comment
                        while self.cursor.peek().is_some_and(|c| c != '\n') {
                            self.cursor.next();
                        }
                    } else {
                        self.add_token(Slash)
                    }
                }

                '"' => self.string(),
                d if d.is_ascii_digit() => self.number(),
                c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),

                ' ' | '\r' | '\t' | '\n' => (),

                c => self.error(ScanErrorType::UnexpectedCharacter(c)),
            }
        }

        self.start = self.cursor.clone();
        self.add_token(Eof);

        if self.errors.0.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    fn lexeme(&self) -> &'a str {
        self.start.slice_until(&self.cursor)
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add_literal(kind, None)
    }

    fn add_literal(&mut self, kind: TokenKind, literal: Option<Literal<'a>>) {
        let token =
            Token::new(kind, self.lexeme(), literal, self.start.line(), self.start.col());
        debug!("Scanned {kind} {:?} at {}:{}", token.lexeme, token.line, token.col);
        self.tokens.push(token);
    }

    fn add_one_or_two(&mut self, second: char, double: TokenKind, single: TokenKind) {
        let kind = if self.consume_if_matches(second) { double } else { single };
        self.add_token(kind)
    }

    fn error(&mut self, error: ScanErrorType) {
        debug!("Scan error at {}:{}: {error}", self.start.line(), self.start.col());
        self.errors.0.push(ScanError { error, line: self.start.line(), col: self.start.col() });
    }

    fn consume_if_matches(&mut self, expected: char) -> bool {
        if self.cursor.peek() == Some(expected) {
            self.cursor.next();
            true
        } else {
            false
        }
    }

    fn consume_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.cursor.peek().is_some_and(&predicate) {
            self.cursor.next();
        }
    }

    fn string(&mut self) {
        self.consume_while(|c| c != '"');

        if self.cursor.is_at_end() {
            return self.error(ScanErrorType::UnterminatedString);
        }
        self.cursor.next(); // closing '"'

        let lexeme = self.lexeme();
        self.add_literal(Str, Some(Literal::Str(&lexeme[1..lexeme.len() - 1])));
    }

    fn number(&mut self) {
        self.consume_while(|c| c.is_ascii_digit());

        if self.cursor.peek() == Some('.')
            && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.next(); // '.'
            self.consume_while(|c| c.is_ascii_digit());
        }

        match self.lexeme().parse() {
            Ok(n) => self.add_literal(Number, Some(Literal::Number(n))),
            Err(_) => self.error(ScanErrorType::InvalidNumber(self.lexeme().to_string())),
        }
    }

    fn identifier(&mut self) {
        self.consume_while(|c| c.is_ascii_alphanumeric() || c == '_');

        match TokenKind::keyword(self.lexeme()) {
            Some(True) => self.add_literal(True, Some(Literal::Boolean(true))),
            Some(False) => self.add_literal(False, Some(Literal::Boolean(false))),
            Some(keyword) => self.add_token(keyword),
            None => self.add_token(Identifier),
        }
    }
}
