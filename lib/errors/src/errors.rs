use std::{
    fmt::Display,
    ops::{Deref, DerefMut},
};

use cursor::{Col, Line};
use itertools::Itertools;

/// A single problem found while scanning or parsing, ready to be shown to a user.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[error("error (l. {line}, c. {col}): {message}")]
pub struct Diagnostic {
    pub line: Line,
    pub col: Col,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: Line, col: Col, message: impl ToString) -> Self {
        Self { line, col, message: message.to_string() }
    }
}

#[derive(thiserror::Error, Debug, Default, PartialEq)]
pub struct Diagnostics(pub Vec<Diagnostic>);

impl From<Diagnostic> for Diagnostics {
    fn from(d: Diagnostic) -> Self {
        Self(vec![d])
    }
}

impl Deref for Diagnostics {
    type Target = Vec<Diagnostic>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Diagnostics {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn one_line_per_diagnostic() {
        let mut diagnostics = Diagnostics::default();
        diagnostics.push(Diagnostic::new(Line(1), Col(3), "Unexpected character: @"));
        diagnostics.push(Diagnostic::new(Line(2), Col(1), "Expect expression."));

        assert_eq!(
            diagnostics.to_string(),
            "error (l. 1, c. 3): Unexpected character: @\nerror (l. 2, c. 1): Expect expression."
        );
    }

    #[test]
    fn single_diagnostic_converts() {
        let diagnostics: Diagnostics = Diagnostic::new(Line(4), Col(2), "oops").into();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "oops");
    }
}
