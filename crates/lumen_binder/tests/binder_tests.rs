//! Binder integration tests.
//!
//! Tests the parse -> bind pipeline: scoping, operator resolution, type
//! checks and the recovery nodes produced for each kind of error.

use lumen_binder::bound::*;
use lumen_binder::{Binder, BoundGlobalScope, TypeSymbol};
use lumen_parser::SyntaxTree;
use pretty_assertions::assert_eq;
use std::sync::Arc;

/// Helper: parse and bind a submission, asserting it parsed cleanly.
fn bind(source: &str) -> BoundGlobalScope {
    bind_after(None, source)
}

fn bind_after(previous: Option<Arc<BoundGlobalScope>>, source: &str) -> BoundGlobalScope {
    let tree = SyntaxTree::parse(source);
    assert!(tree.diagnostics().is_empty(), "syntax errors: {:?}", tree.diagnostics());
    Binder::bind_global_scope(previous, tree.root())
}

/// Helper: the diagnostics of a submission as (covered text, message) pairs.
fn diagnostics(source: &str) -> Vec<(String, String)> {
    let scope = bind(source);
    scope
        .diagnostics
        .iter()
        .map(|d| (d.span.slice(source).to_string(), d.message.clone()))
        .collect()
}

fn d(text: &str, message: &str) -> (String, String) {
    (text.to_string(), message.to_string())
}

/// Helper: the expression of a single-expression submission.
fn expression(source: &str) -> BoundExpression {
    match bind(source).statement {
        BoundStatement::Expression(stmt) => stmt.expression,
        other => panic!("expected expression statement, got {:?}", other.kind()),
    }
}

// ============================================================================
// Valid programs
// ============================================================================

#[test]
fn test_valid_programs_have_no_diagnostics() {
    for source in [
        "1 + 2 * 3",
        "{ var a = 10 a = a * 2 }",
        "{ let b = true if b 1 else 2 }",
        "{ var i = 0 while i < 10 i = i + 1 }",
        "{ var sum = 0 for i = 1 to 10 sum = sum + i }",
        "((1 & 3) | (4 ^ 5)) == ~2",
        "true & false | true ^ false",
        "!(1 < 2) || 3 >= 4 && 5 != 6",
    ] {
        assert!(bind(source).diagnostics.is_empty(), "{}", source);
    }
}

#[test]
fn test_binary_expression_resolves_operator() {
    let BoundExpression::Binary(expr) = expression("1 < 2") else {
        panic!("expected binary expression");
    };
    assert_eq!(expr.op.kind, BoundBinaryOperatorKind::Less);
    assert_eq!(expr.op.result_type, TypeSymbol::Bool);
}

#[test]
fn test_parentheses_are_transparent() {
    assert_eq!(expression("((7))"), BoundExpression::literal(7));
}

#[test]
fn test_global_variables_are_collected_in_order() {
    let scope = bind("{ var a = 1 let b = true }");
    // block-scoped variables are not globals
    assert!(scope.variables.is_empty());

    let scope = bind("var a = 1");
    let globals: Vec<_> = scope
        .variables
        .iter()
        .map(|v| (v.name().to_string(), v.ty(), v.is_read_only()))
        .collect();
    assert_eq!(globals, vec![("a".to_string(), TypeSymbol::Int, false)]);
}

// ============================================================================
// Scoping
// ============================================================================

#[test]
fn test_same_scope_redeclaration() {
    assert_eq!(
        diagnostics("{ var x = 10 var y = 100 { var x = 10 } var x = 5 }"),
        vec![d("x", "Variable 'x' is already declared")]
    );
}

#[test]
fn test_redeclaration_keeps_existing_symbol() {
    // the second declaration would make `x` a Bool
    assert_eq!(
        diagnostics("{ var x = 1 var x = true x = 2 }"),
        vec![d("x", "Variable 'x' is already declared")]
    );
}

#[test]
fn test_nested_scope_shadowing_resolves_to_inner_binding() {
    let scope = bind("{ var a = 1 { var a = true a = false } a = 2 }");
    assert!(scope.diagnostics.is_empty());
}

#[test]
fn test_block_variables_go_out_of_scope() {
    assert_eq!(
        diagnostics("{ { var inner = 1 } inner }"),
        vec![d("inner", "Variable inner doesn't exist")]
    );
}

#[test]
fn test_for_variable_is_scoped_to_the_loop() {
    assert_eq!(
        diagnostics("{ for i = 1 to 3 i = i + 1 i }"),
        vec![d("i", "Variable i doesn't exist")]
    );
}

#[test]
fn test_previous_submission_variables_are_visible() {
    let first = Arc::new(bind("var x = 10"));
    let second = bind_after(Some(first.clone()), "x * 2");
    assert!(second.diagnostics.is_empty());

    let x = &first.variables[0];
    let BoundStatement::Expression(stmt) = second.statement else {
        panic!("expected expression statement");
    };
    let BoundExpression::Binary(expr) = stmt.expression else {
        panic!("expected binary expression");
    };
    assert_eq!(*expr.left, BoundExpression::variable(x.clone()));
}

#[test]
fn test_later_submission_may_redeclare_a_global() {
    let first = Arc::new(bind("var x = 10"));
    let second = bind_after(Some(first), "var x = true");
    assert!(second.diagnostics.is_empty());
    assert_eq!(second.variables[0].ty(), TypeSymbol::Bool);
}

// ============================================================================
// Diagnostics and recovery
// ============================================================================

#[test]
fn test_undefined_name_binds_to_zero() {
    let scope = bind("x + 10");
    assert_eq!(
        scope.diagnostics.iter().map(|d| d.message.as_str()).collect::<Vec<_>>(),
        vec!["Variable x doesn't exist"]
    );
    let BoundStatement::Expression(stmt) = scope.statement else {
        panic!("expected expression statement");
    };
    let BoundExpression::Binary(expr) = stmt.expression else {
        panic!("expected binary expression");
    };
    assert_eq!(*expr.left, BoundExpression::literal(0));
}

#[test]
fn test_assignment_to_undefined_name_returns_right_side() {
    let scope = bind("y = 3");
    assert_eq!(scope.diagnostics[0].message, "Variable y doesn't exist");
    assert_eq!(scope.statement, BoundStatement::expression(BoundExpression::literal(3)));
}

#[test]
fn test_assignment_to_readonly_variable() {
    let source = "{ let x = 10\n x = 0 }";
    assert_eq!(
        diagnostics(source),
        vec![d("=", "Variable 'x' is readonly and cannot be assigned to")]
    );

    // the assignment node is still produced
    let BoundStatement::Block(block) = bind(source).statement else {
        panic!("expected block");
    };
    assert_eq!(block.statements[1].kind(), BoundNodeKind::ExpressionStatement);
    let BoundStatement::Expression(ref stmt) = block.statements[1] else {
        unreachable!();
    };
    assert_eq!(stmt.expression.kind(), BoundNodeKind::AssignmentExpression);
}

#[test]
fn test_assignment_type_mismatch() {
    assert_eq!(
        diagnostics("{ var x = 10 x = true }"),
        vec![d("true", "Cannot convert type from 'Bool' to 'Int'")]
    );
}

#[test]
fn test_readonly_and_type_mismatch_are_both_reported() {
    assert_eq!(
        diagnostics("{ let x = 10 x = false }"),
        vec![
            d("=", "Variable 'x' is readonly and cannot be assigned to"),
            d("false", "Cannot convert type from 'Bool' to 'Int'"),
        ]
    );
}

#[test]
fn test_if_condition_must_be_bool() {
    assert_eq!(
        diagnostics("{ var x = 0 if 10 x = 10 }"),
        vec![d("10", "Cannot convert type from 'Int' to 'Bool'")]
    );
}

#[test]
fn test_while_condition_must_be_bool() {
    assert_eq!(
        diagnostics("{ var x = 0 while x + 1 x = 10 }"),
        vec![d("x + 1", "Cannot convert type from 'Int' to 'Bool'")]
    );
}

#[test]
fn test_for_bounds_must_be_int() {
    assert_eq!(
        diagnostics("{ var x = 0 for i = false to true x = 10 }"),
        vec![
            d("false", "Cannot convert type from 'Bool' to 'Int'"),
            d("true", "Cannot convert type from 'Bool' to 'Int'"),
        ]
    );
}

#[test]
fn test_undefined_unary_operator() {
    assert_eq!(
        diagnostics("+true"),
        vec![d("+", "Unary operator + is not defined for type Bool")]
    );
    assert_eq!(expression("!5"), BoundExpression::literal(5));
}

#[test]
fn test_undefined_binary_operator() {
    assert_eq!(
        diagnostics("10 * true"),
        vec![d("*", "Binary operator * is not defined for type Int and Bool.")]
    );
    // recovery yields the left operand
    assert_eq!(expression("10 && true"), BoundExpression::literal(10));
}

#[test]
fn test_diagnostics_in_discovery_order() {
    let messages: Vec<_> = diagnostics("{ a + b c = true }")
        .into_iter()
        .map(|(text, _)| text)
        .collect();
    assert_eq!(messages, vec!["a", "b", "c"]);
}

#[test]
fn test_every_independent_error_is_reported() {
    let found = diagnostics("{ let r = 1 r = 2 -true unknown var r = 3 }");
    assert_eq!(found.len(), 4);
}

// ============================================================================
// Declarations after syntax errors
// ============================================================================

/// Helper: syntax then binding messages of a submission that may not parse.
fn all_messages(source: &str) -> Vec<String> {
    let tree = SyntaxTree::parse(source);
    let scope = Binder::bind_global_scope(None, tree.root());
    tree.diagnostics()
        .iter()
        .chain(scope.diagnostics.iter())
        .map(|d| d.message.clone())
        .collect()
}

#[test]
fn test_missing_identifiers_are_not_declared() {
    assert_eq!(
        all_messages("{ var = 1 var = 2 }"),
        vec![
            "Unexpected token 'EqualsToken' expected Identifier".to_string(),
            "Unexpected token 'EqualsToken' expected Identifier".to_string(),
        ]
    );
}

#[test]
fn test_missing_loop_variable_is_not_declared() {
    let messages = all_messages("{ var x = 0 for = 1 to 2 x = x + 1 }");
    assert_eq!(messages, vec!["Unexpected token 'EqualsToken' expected Identifier".to_string()]);
}
