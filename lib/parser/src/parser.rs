mod expr;
pub mod printer;

use errors::Diagnostic;
use log::{debug, trace};
use scanner::{Literal, Token, TokenKind};

pub use expr::Expr;
pub use printer::render;

use TokenKind::*;

pub type Result<'a, T> = std::result::Result<T, ParseError<'a>>;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("Expect expression.")]
    ExpectedExpression,
    #[error("Expect ')' after expression.")]
    ExpectedRightParen,
    #[error("Expect end of expression.")]
    ExpectedEndOfInput,
    #[error("Expression nested too deeply.")]
    TooDeeplyNested,
}

/// Groupings and unary operators open a new level of recursion each; past
/// this depth the parser fails instead of exhausting the stack.
pub const MAX_NESTING: usize = 128;

/// Why a parse stopped, and where. `position` is the index of `token` in
/// the sequence handed to the parser.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {}] Error {}: {kind}", .token.line, location(.token))]
pub struct ParseError<'a> {
    pub kind: ParseErrorKind,
    pub token: Token<'a>,
    pub position: usize,
}

fn location(token: &Token) -> String {
    if token.is_eof() {
        "at end".to_string()
    } else {
        format!("at '{}'", token.lexeme)
    }
}

impl From<ParseError<'_>> for Diagnostic {
    fn from(error: ParseError<'_>) -> Self {
        Diagnostic::new(
            error.token.line,
            error.token.col,
            format!("{} ({})", error.kind, location(&error.token)),
        )
    }
}

/// Recursive descent parser for the expression grammar, one method per
/// precedence level:
///
/// ```text
/// expression     → equality
/// equality       → comparison ( ( "!=" | "==" ) comparison )*
/// comparison     → additive ( ( ">" | ">=" | "<" | "<=" ) additive )*
/// additive       → multiplicative ( ( "+" | "-" ) multiplicative )*
/// multiplicative → unary ( ( "/" | "*" ) unary )*
/// unary          → ( "!" | "-" ) unary | primary
/// primary        → NUMBER | STRING | "true" | "false" | "nil" | "(" expression ")"
/// ```
///
/// The parser borrows the token sequence and only ever moves its cursor
/// forward. The sequence is expected to end with an `Eof` token; a sequence
/// without one is treated as if its last token were the end.
#[derive(Debug)]
pub struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    current: usize,
    depth: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    pub fn new(tokens: &'t [Token<'a>]) -> Self {
        assert!(!tokens.is_empty(), "token sequence must at least contain Eof");
        Self { tokens, current: 0, depth: 0 }
    }

    /// Parses a single expression that has to span the whole sequence.
    pub fn parse(mut self) -> Result<'a, Expr<'a>> {
        let expr = self.parse_expression()?;

        if !self.is_at_end() {
            return Err(self.error(ParseErrorKind::ExpectedEndOfInput));
        }

        Ok(expr)
    }

    /// Parses one expression starting at the cursor, leaving the cursor on
    /// the first token that is not part of it.
    pub fn parse_expression(&mut self) -> Result<'a, Expr<'a>> {
        self.expression()
    }

    fn expression(&mut self) -> Result<'a, Expr<'a>> {
        self.equality()
    }

    fn equality(&mut self) -> Result<'a, Expr<'a>> {
        trace!("equality @{}", self.current);
        let mut expr = self.comparison()?;

        while self.matches(&[BangEqual, EqualEqual]) {
            let operator = self.previous().clone();
            let right = self.comparison()?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> Result<'a, Expr<'a>> {
        trace!("comparison @{}", self.current);
        let mut expr = self.additive()?;

        while self.matches(&[Greater, GreaterEqual, Less, LessEqual]) {
            let operator = self.previous().clone();
            let right = self.additive()?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn additive(&mut self) -> Result<'a, Expr<'a>> {
        trace!("additive @{}", self.current);
        let mut expr = self.multiplicative()?;

        while self.matches(&[Plus, Minus]) {
            let operator = self.previous().clone();
            let right = self.multiplicative()?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn multiplicative(&mut self) -> Result<'a, Expr<'a>> {
        trace!("multiplicative @{}", self.current);
        let mut expr = self.unary()?;

        while self.matches(&[Slash, Star]) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn unary(&mut self) -> Result<'a, Expr<'a>> {
        trace!("unary @{}", self.current);
        if self.matches(&[Bang, Minus]) {
            let operator = self.previous().clone();
            let operand = self.nested(Self::unary)?;
            return Ok(Expr::unary(operator, operand));
        }

        self.primary()
    }

    fn primary(&mut self) -> Result<'a, Expr<'a>> {
        trace!("primary @{}: {:?}", self.current, self.peek().lexeme);
        if self.matches(&[False]) {
            return Ok(Expr::Literal(Some(Literal::Boolean(false))));
        }
        if self.matches(&[True]) {
            return Ok(Expr::Literal(Some(Literal::Boolean(true))));
        }
        if self.matches(&[Nil]) {
            return Ok(Expr::Literal(None));
        }
        // A number or string the lexer left without a value is not an expression
        if (self.check(Number) || self.check(Str)) && self.peek().literal.is_some() {
            return Ok(Expr::Literal(self.advance().literal));
        }
        if self.matches(&[LeftParen]) {
            let expr = self.nested(Self::expression)?;
            self.consume(RightParen, ParseErrorKind::ExpectedRightParen)?;
            return Ok(Expr::grouping(expr));
        }

        Err(self.error(ParseErrorKind::ExpectedExpression))
    }

    fn nested(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<'a, Expr<'a>>,
    ) -> Result<'a, Expr<'a>> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(ParseErrorKind::TooDeeplyNested));
        }

        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    fn consume(&mut self, kind: TokenKind, error: ParseErrorKind) -> Result<'a, &'t Token<'a>> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(error))
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError<'a> {
        let error =
            ParseError { kind, token: self.peek().clone(), position: self.peek_position() };
        debug!("Parse error at token {}: {error}", error.position);
        error
    }
}

// Cursor helpers
impl<'t, 'a> Parser<'t, 'a> {
    /// Consumes the current token if its kind is any of `kinds`.
    pub fn matches(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|&kind| self.check(kind)) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    /// Returns the current token and moves past it, unless it is the end.
    pub fn advance(&mut self) -> &'t Token<'a> {
        let token = self.peek();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    pub fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len() || self.peek().is_eof()
    }

    pub fn peek(&self) -> &'t Token<'a> {
        let tokens = self.tokens;
        &tokens[self.peek_position()]
    }

    /// The most recently consumed token. Panics if nothing was consumed yet.
    pub fn previous(&self) -> &'t Token<'a> {
        let tokens = self.tokens;
        &tokens[self.current - 1]
    }

    /// Index of the next token to be consumed.
    pub fn position(&self) -> usize {
        self.current
    }

    fn peek_position(&self) -> usize {
        self.current.min(self.tokens.len() - 1)
    }
}
