use std::{io::Write, path::Path};

use errors::{Diagnostic, Diagnostics};
use itertools::Itertools;
use log::info;
use parser::Parser;
use scanner::{Scanner, Token};

#[derive(thiserror::Error, Debug)]
pub enum RunError {
    #[error("{0}")]
    Diagnostics(#[from] Diagnostics),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Options {
    /// Print the scanned tokens before the tree.
    pub show_tokens: bool,
}

/// Scans and parses `source` as a single expression and writes the rendered tree to `output`.
pub fn run_source(
    source: &str,
    options: Options,
    output: &mut impl Write,
) -> Result<(), RunError> {
    let tokens = Scanner::new(source).scan_tokens().map_err(Diagnostics::from)?;
    info!("Scanned {} tokens", tokens.len());

    if options.show_tokens {
        writeln!(output, "{}", tokens.iter().map(describe).join("\n"))?;
    }

    let expr = Parser::new(&tokens).parse().map_err(|e| Diagnostics::from(Diagnostic::from(e)))?;
    writeln!(output, "{expr}")?;
    Ok(())
}

/// Reads `path` and runs its whole contents as one expression.
pub fn run_file(
    path: &Path,
    options: Options,
    output: &mut impl Write,
) -> Result<(), RunError> {
    let source = std::fs::read_to_string(path)?;
    run_source(&source, options, output)
}

fn describe(token: &Token) -> String {
    match token.literal {
        Some(literal) => format!("{} '{}' {literal}", token.kind, token.lexeme),
        None => format!("{} '{}'", token.kind, token.lexeme),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run(source: &str, options: Options) -> String {
        let mut output = Vec::new();
        run_source(source, options, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn prints_tree() {
        assert_eq!(run("(1 + 2) * 3", Options::default()), "(* (group (+ 1 2)) 3)\n");
    }

    #[test]
    fn prints_tokens_first() {
        assert_eq!(
            run("-\"a\" == nil", Options { show_tokens: true }),
            "MINUS '-'\nSTRING '\"a\"' a\nEQUAL_EQUAL '=='\nNIL 'nil'\nEOF ''\n(== (- a) nil)\n"
        );
    }

    #[test]
    fn reports_scan_and_parse_errors() {
        let mut output = Vec::new();
        let error = run_source("1 @ #", Options::default(), &mut output).unwrap_err();
        assert_eq!(
            error.to_string(),
            "error (l. 1, c. 3): Unexpected character: @\nerror (l. 1, c. 5): Unexpected character: #"
        );

        let error = run_source("(1", Options::default(), &mut output).unwrap_err();
        assert_eq!(error.to_string(), "error (l. 1, c. 3): Expect ')' after expression. (at end)");
        assert!(output.is_empty());
    }

    #[test]
    fn runs_files() {
        let cases = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/cases");
        let options = Options::default();

        let mut output = Vec::new();
        run_file(&cases.join("precedence/grouping.expr"), options, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "(* (group (+ 1 2)) 3)\n");

        let mut output = Vec::new();
        let error =
            run_file(&cases.join("errors/lone_operator.expr"), options, &mut output).unwrap_err();
        assert!(matches!(error, RunError::Diagnostics(_)));
        assert_eq!(error.to_string(), "error (l. 2, c. 1): Expect expression. (at '*')");
        assert!(output.is_empty());

        let error = run_file(&cases.join("missing.expr"), options, &mut output).unwrap_err();
        assert!(matches!(error, RunError::Io(_)));
    }
}
