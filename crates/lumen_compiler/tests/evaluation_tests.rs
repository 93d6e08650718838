//! End-to-end evaluation tests.
//!
//! Each test compiles source text and evaluates it against a fresh (or
//! carried-over) variable store. Diagnostic tests mark the expected spans
//! in the source with `[` and `]`.

mod common;

use common::AnnotatedText;
use lumen_compiler::{Compilation, EvaluationError, SyntaxTree, Value, Variables};
use pretty_assertions::assert_eq;
use std::sync::Arc;

/// Helper: evaluate a submission that must produce no diagnostics.
fn assert_value(text: &str, expected: impl Into<Value>) {
    let compilation = Compilation::new(SyntaxTree::parse(text));
    let mut variables = Variables::default();
    let result = compilation.evaluate(&mut variables).unwrap();
    assert!(result.diagnostics.is_empty(), "{}: {:?}", text, result.diagnostics);
    assert_eq!(result.value, Some(expected.into()), "{}", text);
}

/// Helper: evaluate annotated source and compare diagnostics in order.
fn assert_diagnostics(text: &str, expected_messages: &[&str]) {
    let annotated = AnnotatedText::parse(text);
    let compilation = Compilation::new(SyntaxTree::parse(annotated.text.clone()));
    let mut variables = Variables::default();
    let result = compilation.evaluate(&mut variables).unwrap();

    assert_eq!(
        annotated.spans.len(),
        expected_messages.len(),
        "must mark as many spans as there are expected diagnostics"
    );
    let actual: Vec<_> = result
        .diagnostics
        .iter()
        .map(|d| (d.message.as_str(), d.span))
        .collect();
    let expected: Vec<_> = expected_messages
        .iter()
        .copied()
        .zip(annotated.spans.iter().copied())
        .collect();
    assert_eq!(actual, expected);
    assert_eq!(result.value, None);
    assert!(variables.is_empty());
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_literals_and_unary_operators() {
    assert_value("1", 1);
    assert_value("+1", 1);
    assert_value("-1", -1);
    assert_value("~1", -2);
    assert_value("(10)", 10);
    assert_value("true", true);
    assert_value("false", false);
    assert_value("!true", false);
    assert_value("!false", true);
}

#[test]
fn test_arithmetic() {
    assert_value("1 + 2", 3);
    assert_value("3 - 2", 1);
    assert_value("3 * 2", 6);
    assert_value("4 / 2", 2);
    assert_value("1 + 2 * 3", 7);
    assert_value("(1 + 2) * 3", 9);
    assert_value("10 - 3 - 2", 5);
}

#[test]
fn test_comparisons() {
    assert_value("-1 == -1", true);
    assert_value("2 != 2", false);
    assert_value("3 < 4", true);
    assert_value("5 < 4", false);
    assert_value("4 <= 4", true);
    assert_value("4 > 3", true);
    assert_value("4 >= 5", false);
}

#[test]
fn test_bitwise_operators() {
    assert_value("1 | 2", 3);
    assert_value("1 | 0", 1);
    assert_value("1 & 3", 1);
    assert_value("1 & 0", 0);
    assert_value("1 ^ 0", 1);
    assert_value("0 ^ 1", 1);
    assert_value("1 ^ 3", 2);
    assert_value("false | false", false);
    assert_value("false | true", true);
    assert_value("true & true", true);
    assert_value("true & false", false);
    assert_value("true ^ false", true);
    assert_value("true ^ true", false);
}

#[test]
fn test_boolean_operators() {
    assert_value("true == false", false);
    assert_value("true == true", true);
    assert_value("true != true", false);
    assert_value("false != true", true);
    assert_value("true && false", false);
    assert_value("true || false", true);
    assert_value("false || false", false);
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_blocks_and_assignment() {
    assert_value("{var a=10 {a=10*a } }", 100);
    assert_value("{ var a = 0 (a = 10) * a }", 100);
}

#[test]
fn test_if_statements() {
    assert_value("{ var a = 0 if a == 0 a = 10 a }", 10);
    assert_value("{ var a = 0 if a == 4 a = 10 a }", 0);
    assert_value("{var a = 0 if a==20 a = 5 else a = 10 a}", 10);
    assert_value("{ var a = 0 if a == 0 a = 10 else a = 5 a }", 10);
}

#[test]
fn test_while_statements() {
    assert_value("{var a = 25 while a>20 a = a-1 a}", 20);
    assert_value("{ var i = 10 var result = 0 while i > 0 { result = result + i i = i - 1 } result }", 55);
}

#[test]
fn test_for_statements() {
    assert_value("{var result = 0 for i = 1 to 10 { result = result + i } result}", 55);
    assert_value("{ var a = 10 for i = 1 to 3 a = a - i a }", 4);
    assert_value("{ var n = 0 for i = 5 to 1 n = n + 1 n }", 0);
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_reports_redeclaration() {
    assert_diagnostics(
        "
        {
            var x = 10
            var y = 100
            {
                var x = 10
            }
            var [x] = 5
        }
        ",
        &["Variable 'x' is already declared"],
    );
}

#[test]
fn test_reports_undefined_name() {
    assert_diagnostics("[x] + 10", &["Variable x doesn't exist"]);
}

#[test]
fn test_reports_readonly_assignment() {
    assert_diagnostics(
        "
        {
            let x = 10
            x [=] 0
        }
        ",
        &["Variable 'x' is readonly and cannot be assigned to"],
    );
}

#[test]
fn test_reports_assignment_conversion() {
    assert_diagnostics(
        "
        {
            var x = 10
            x = [true]
        }
        ",
        &["Cannot convert type from 'Bool' to 'Int'"],
    );
}

#[test]
fn test_reports_if_and_while_conditions() {
    assert_diagnostics(
        "
        {
            var x = 0
            if [10]
                x = 10
            while [x]
                x = 1
        }
        ",
        &[
            "Cannot convert type from 'Int' to 'Bool'",
            "Cannot convert type from 'Int' to 'Bool'",
        ],
    );
}

#[test]
fn test_reports_for_bounds() {
    assert_diagnostics(
        "
        {
            var result = 0
            for i = [false] to [true]
                result = result + i
        }
        ",
        &[
            "Cannot convert type from 'Bool' to 'Int'",
            "Cannot convert type from 'Bool' to 'Int'",
        ],
    );
}

#[test]
fn test_reports_undefined_operators() {
    assert_diagnostics("[+]true", &["Unary operator + is not defined for type Bool"]);
    assert_diagnostics(
        "10 [*] true",
        &["Binary operator * is not defined for type Int and Bool."],
    );
}

#[test]
fn test_reports_missing_operand() {
    assert_diagnostics(
        "1 +[]",
        &["Unexpected token 'EndOfFileToken' expected NumericLiteral"],
    );
}

#[test]
fn test_reports_bad_character_and_still_binds() {
    assert_diagnostics("1 + [@]2", &["Bad character input '@'"]);
}

#[test]
fn test_syntax_diagnostics_precede_binding_diagnostics() {
    assert_diagnostics(
        "{ [$] [x] = 1 }",
        &["Bad character input '$'", "Variable x doesn't exist"],
    );
}

// ============================================================================
// Submissions
// ============================================================================

#[test]
fn test_variables_carry_across_submissions() {
    let mut variables = Variables::default();
    let first = Arc::new(Compilation::new(SyntaxTree::parse("var x = 10")));
    assert_eq!(first.evaluate(&mut variables).unwrap().value, Some(Value::Int(10)));

    let second = Arc::new(first.continue_with(SyntaxTree::parse("x = x * 2")));
    assert_eq!(second.evaluate(&mut variables).unwrap().value, Some(Value::Int(20)));

    let third = second.continue_with(SyntaxTree::parse("x + 1"));
    assert_eq!(third.evaluate(&mut variables).unwrap().value, Some(Value::Int(21)));
}

#[test]
fn test_later_submission_may_shadow_global() {
    let mut variables = Variables::default();
    let first = Arc::new(Compilation::new(SyntaxTree::parse("var x = 10")));
    first.evaluate(&mut variables).unwrap();
    let second = Arc::new(first.continue_with(SyntaxTree::parse("let x = true")));
    second.evaluate(&mut variables).unwrap();
    let third = second.continue_with(SyntaxTree::parse("!x"));
    assert_eq!(third.evaluate(&mut variables).unwrap().value, Some(Value::Bool(false)));
}

#[test]
fn test_failed_submission_leaves_store_untouched() {
    let mut variables = Variables::default();
    let first = Arc::new(Compilation::new(SyntaxTree::parse("var x = 10")));
    first.evaluate(&mut variables).unwrap();
    let snapshot = variables.clone();

    let second = first.continue_with(SyntaxTree::parse("{ x = 5 y }"));
    let result = second.evaluate(&mut variables).unwrap();
    assert_eq!(result.value, None);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(variables, snapshot);
}

// ============================================================================
// Runtime faults
// ============================================================================

#[test]
fn test_division_by_zero_is_an_error() {
    let compilation = Compilation::new(SyntaxTree::parse("{ var a = 0 10 / a }"));
    let mut variables = Variables::default();
    assert_eq!(compilation.evaluate(&mut variables), Err(EvaluationError::DivisionByZero));
}
