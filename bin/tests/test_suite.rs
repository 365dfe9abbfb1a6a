use exprparse::{run_source, Options, RunError};
use itertools::Itertools;
use lazy_regex::regex;
use test_suite_proc_macro::generate_tests;

use pretty_assertions::assert_eq;

/// Runs a fixture and checks it against its `// expect:` and `// error` annotations.
///
/// Annotation lines are comments, so the scanner skips them and the rest of
/// the file is parsed as one expression.
pub fn expr_expect(code: &str) {
    let expect_regex = regex!(r"// expect: (.*)");
    let error_regex = regex!(r"// (error \(l\. .*)");

    let expected_output = code
        .lines()
        .filter_map(|line| expect_regex.captures(line).map(|cap| cap[1].to_string()))
        .collect_vec();
    let expected_errors = code
        .lines()
        .filter_map(|line| error_regex.captures(line).map(|cap| cap[1].to_string()))
        .collect_vec();

    assert!(
        expected_output.is_empty() != expected_errors.is_empty(),
        "A fixture expects either output or errors"
    );

    let mut output = Vec::new();
    match run_source(code, Options::default(), &mut output) {
        Ok(()) => {
            assert!(expected_errors.is_empty(), "Expected errors but none occurred");
            assert_eq!(
                String::from_utf8(output).unwrap().lines().collect_vec(),
                expected_output,
                "Actual output (left) does not match expected output (right)"
            );
        }
        Err(RunError::Diagnostics(diagnostics)) => {
            assert!(output.is_empty());
            assert_eq!(
                diagnostics.iter().map(|d| d.to_string()).collect_vec(),
                expected_errors,
                "Actual errors (left) do not match expected errors (right)"
            );
        }
        Err(e) => panic!("Unexpected error: {:?}", e),
    }
}

generate_tests!();
