//! Lowerer integration tests.
//!
//! Lowers bound trees built from source and checks the shape of the flat
//! program that reaches the evaluator.

use lumen_binder::bound::*;
use lumen_binder::Binder;
use lumen_parser::SyntaxTree;
use lumen_transformers::{BoundTreeRewriter, Lowerer};
use pretty_assertions::assert_eq;

fn bind(source: &str) -> BoundStatement {
    let tree = SyntaxTree::parse(source);
    assert!(tree.diagnostics().is_empty(), "syntax errors: {:?}", tree.diagnostics());
    let scope = Binder::bind_global_scope(None, tree.root());
    assert!(scope.diagnostics.is_empty(), "binding errors: {:?}", scope.diagnostics);
    scope.statement
}

fn kinds(block: &BoundBlockStatement) -> Vec<BoundNodeKind> {
    block.statements.iter().map(|s| s.kind()).collect()
}

fn label_names(block: &BoundBlockStatement) -> Vec<String> {
    block
        .statements
        .iter()
        .filter_map(|s| match s {
            BoundStatement::Label(stmt) => Some(stmt.label.name().to_string()),
            _ => None,
        })
        .collect()
}

use BoundNodeKind::*;

// ============================================================================
// Flat input
// ============================================================================

#[test]
fn test_flat_input_is_unchanged_except_flattening() {
    let bound = bind("{ var a = 1 { a = a + 2 { a } } }");
    let BoundStatement::Block(ref outer) = bound else {
        panic!("expected block");
    };
    let lowered = Lowerer::lower(bound.clone());
    assert_eq!(kinds(&lowered), vec![VariableDeclaration, ExpressionStatement, ExpressionStatement]);
    assert_eq!(lowered.statements[0], outer.statements[0]);
}

#[test]
fn test_single_expression_becomes_one_statement_block() {
    let bound = bind("1 + 2");
    let lowered = Lowerer::lower(bound.clone());
    assert_eq!(lowered.statements, vec![bound]);
}

// ============================================================================
// Structured control flow
// ============================================================================

#[test]
fn test_for_loop_shape() {
    let lowered = Lowerer::lower(bind("{ var sum = 0 for i = 1 to 10 sum = sum + i }"));
    assert_eq!(
        kinds(&lowered),
        vec![
            VariableDeclaration,      // sum
            VariableDeclaration,      // i = 1
            GotoStatement,            // goto check
            LabelStatement,           // continue:
            ExpressionStatement,      // sum = sum + i
            ExpressionStatement,      // i = i + 1
            LabelStatement,           // check:
            ConditionalGotoStatement, // gotoTrue i <= 10 continue
            LabelStatement,           // end:
        ]
    );

    let BoundStatement::ConditionalGoto(ref jump) = lowered.statements[7] else {
        panic!("expected conditional goto");
    };
    assert!(!jump.jump_if_false);
    let BoundExpression::Binary(ref condition) = jump.condition else {
        panic!("expected binary condition");
    };
    assert_eq!(condition.op.kind, BoundBinaryOperatorKind::LessOrEquals);
}

#[test]
fn test_for_increment_assigns_the_loop_variable() {
    let lowered = Lowerer::lower(bind("for i = 1 to 3 { }"));
    let BoundStatement::VariableDeclaration(ref decl) = lowered.statements[0] else {
        panic!("expected loop variable declaration");
    };
    let increment = lowered
        .statements
        .iter()
        .find_map(|s| match s {
            BoundStatement::Expression(stmt) => match &stmt.expression {
                BoundExpression::Assignment(assign) => Some(assign),
                _ => None,
            },
            _ => None,
        })
        .expect("increment statement");
    assert_eq!(increment.variable, decl.variable);
    let BoundExpression::Binary(ref add) = *increment.expression else {
        panic!("expected addition");
    };
    assert_eq!(add.op.kind, BoundBinaryOperatorKind::Addition);
    assert_eq!(*add.right, BoundExpression::literal(1));
}

#[test]
fn test_labels_are_unique_within_a_program() {
    let lowered = Lowerer::lower(bind(
        "{ var a = 0 while a < 3 { if a == 1 a = 5 else a = a + 1 } for i = 0 to 2 a = i }",
    ));
    let mut names = label_names(&lowered);
    let count = names.len();
    assert_eq!(count, 8);
    names.sort();
    names.dedup();
    assert_eq!(names.len(), count);
}

#[test]
fn test_every_lowering_pass_restarts_label_numbering() {
    let source = "{ var a = 0 while a < 3 a = a + 1 }";
    let first = Lowerer::lower(bind(source));
    let second = Lowerer::lower(bind(source));
    assert_eq!(label_names(&first), label_names(&second));
    assert_eq!(label_names(&first), vec!["Label3", "Label2", "Label1"]);
}

#[test]
fn test_every_jump_targets_a_label_in_the_program() {
    let lowered = Lowerer::lower(bind(
        "{ var x = 0 for i = 1 to 4 { if i == 2 x = x + i while x > 10 x = x - 1 } }",
    ));
    let labels = label_names(&lowered);
    for statement in &lowered.statements {
        let target = match statement {
            BoundStatement::Goto(stmt) => &stmt.label,
            BoundStatement::ConditionalGoto(stmt) => &stmt.label,
            _ => continue,
        };
        assert!(labels.iter().any(|l| l == target.name()), "dangling {}", target);
    }
}

// ============================================================================
// Custom rewriters
// ============================================================================

/// Replaces `true` literals with `false`.
struct FalsifyLiterals;

impl BoundTreeRewriter for FalsifyLiterals {
    fn rewrite_literal_expression(&mut self, node: BoundLiteralExpression) -> BoundExpression {
        if node.value == lumen_core::Value::Bool(true) {
            BoundExpression::literal(false)
        } else {
            BoundExpression::Literal(node)
        }
    }
}

#[test]
fn test_rewriter_reaches_conditions_of_structured_statements() {
    let rewritten = FalsifyLiterals.rewrite_statement(bind("{ var a = 0 if true a = 1 }"));
    let BoundStatement::Block(block) = rewritten else {
        panic!("expected block");
    };
    let BoundStatement::If(ref stmt) = block.statements[1] else {
        panic!("expected if statement");
    };
    assert_eq!(stmt.condition, BoundExpression::literal(false));
}
