use std::fmt::{self, Display, Formatter};

use scanner::{Literal, Token};

use crate::printer;

/// Expression tree built by the [`Parser`](crate::Parser). Every node owns
/// its children; nothing is shared and nothing is mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    Binary { left: Box<Expr<'a>>, operator: Token<'a>, right: Box<Expr<'a>> },
    Unary { operator: Token<'a>, operand: Box<Expr<'a>> },
    Grouping(Box<Expr<'a>>),
    /// `None` is the `nil` literal.
    Literal(Option<Literal<'a>>),
}

impl<'a> Expr<'a> {
    pub fn binary(left: Expr<'a>, operator: Token<'a>, right: Expr<'a>) -> Self {
        Expr::Binary { left: Box::new(left), operator, right: Box::new(right) }
    }

    pub fn unary(operator: Token<'a>, operand: Expr<'a>) -> Self {
        Expr::Unary { operator, operand: Box::new(operand) }
    }

    pub fn grouping(inner: Expr<'a>) -> Self {
        Expr::Grouping(Box::new(inner))
    }
}

impl Display for Expr<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", printer::render(self))
    }
}
