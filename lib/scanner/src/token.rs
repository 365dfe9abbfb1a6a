use std::fmt::Display;

use cursor::{Col, Line};
use strum_macros::{Display as KindDisplay, EnumIter};

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
    pub literal: Option<Literal<'a>>,
    pub line: Line,
    pub col: Col,
}

impl<'a> Token<'a> {
    pub fn new(
        kind: TokenKind,
        lexeme: &'a str,
        literal: Option<Literal<'a>>,
        line: Line,
        col: Col,
    ) -> Self {
        Self { kind, lexeme, literal, line, col }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

/// Value the scanner resolved for a literal token. `nil` has none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal<'a> {
    Number(f64),
    Str(&'a str),
    Boolean(bool),
}

impl Display for Literal<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Str(s) => write!(f, "{s}"),
            Literal::Boolean(b) => write!(f, "{b}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, KindDisplay, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // Single-character tokens.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character tokens.
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals.
    Identifier,
    #[strum(serialize = "STRING")]
    Str,
    Number,

    // Keywords.
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

impl TokenKind {
    pub fn keyword(identifier: &str) -> Option<TokenKind> {
        use TokenKind::*;
        Some(match identifier {
            "and" => And,
            "class" => Class,
            "else" => Else,
            "false" => False,
            "for" => For,
            "fun" => Fun,
            "if" => If,
            "nil" => Nil,
            "or" => Or,
            "print" => Print,
            "return" => Return,
            "super" => Super,
            "this" => This,
            "true" => True,
            "var" => Var,
            "while" => While,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn kind_names() {
        assert_eq!(TokenKind::BangEqual.to_string(), "BANG_EQUAL");
        assert_eq!(TokenKind::LeftParen.to_string(), "LEFT_PAREN");
        assert_eq!(TokenKind::Str.to_string(), "STRING");
        assert_eq!(TokenKind::Eof.to_string(), "EOF");
    }

    #[test]
    fn keywords_round_trip_through_their_names() {
        let keywords = TokenKind::iter()
            .filter(|kind| TokenKind::keyword(&kind.to_string().to_lowercase()) == Some(*kind))
            .count();
        assert_eq!(keywords, 16);
        assert_eq!(TokenKind::keyword("nil"), Some(TokenKind::Nil));
        assert_eq!(TokenKind::keyword("nothing"), None);
    }

    #[test]
    fn literal_display() {
        assert_eq!(Literal::Number(1.0).to_string(), "1");
        assert_eq!(Literal::Number(2.5).to_string(), "2.5");
        assert_eq!(Literal::Str("hi there").to_string(), "hi there");
        assert_eq!(Literal::Boolean(false).to_string(), "false");
    }
}
