use itertools::Itertools;

use crate::Expr;

/// Renders a tree as a fully parenthesized prefix form, e.g. `(* (group (+ 1 2)) 3)`.
///
/// Meant for debugging and tests; the output is not valid source.
pub fn render(expr: &Expr) -> String {
    match expr {
        Expr::Binary { left, operator, right } => {
            parenthesize(operator.lexeme, &[left.as_ref(), right.as_ref()])
        }
        Expr::Unary { operator, operand } => parenthesize(operator.lexeme, &[operand.as_ref()]),
        Expr::Grouping(inner) => parenthesize("group", &[inner.as_ref()]),
        Expr::Literal(Some(value)) => value.to_string(),
        Expr::Literal(None) => "nil".to_string(),
    }
}

fn parenthesize(name: &str, exprs: &[&Expr]) -> String {
    format!("({name} {})", exprs.iter().map(|expr| render(expr)).join(" "))
}
