//! Control-flow lowering.
//!
//! Structured statements are replaced by labels and jumps, then every nested
//! block is inlined so the evaluator only ever sees one flat statement list.

use crate::rewriter::BoundTreeRewriter;
use lumen_binder::bound::*;
use lumen_binder::LabelSymbol;

/// Rewrites `if`, `while` and `for` into gotos and labels.
///
/// Label names come from a counter owned by the instance, so every call to
/// [`Lowerer::lower`] numbers its labels from `Label1`.
#[derive(Debug, Default)]
pub struct Lowerer {
    label_count: u32,
}

impl Lowerer {
    fn new() -> Self {
        Self::default()
    }

    /// Lower a bound statement into a single flat block.
    pub fn lower(statement: BoundStatement) -> BoundBlockStatement {
        let mut lowerer = Lowerer::new();
        let result = lowerer.rewrite_statement(statement);
        let flat = flatten(result);
        tracing::debug!(
            labels = lowerer.label_count,
            statements = flat.statements.len(),
            "lowered program"
        );
        flat
    }

    fn generate_label(&mut self) -> LabelSymbol {
        self.label_count += 1;
        LabelSymbol::new(format!("Label{}", self.label_count))
    }
}

impl BoundTreeRewriter for Lowerer {
    fn rewrite_if_statement(&mut self, node: BoundIfStatement) -> BoundStatement {
        let result = match node.else_statement {
            // gotoFalse <condition> end
            // <then>
            // end:
            None => {
                let end_label = self.generate_label();
                BoundStatement::block(vec![
                    BoundStatement::conditional_goto(end_label.clone(), node.condition, true),
                    *node.then_statement,
                    BoundStatement::label(end_label),
                ])
            }
            // gotoFalse <condition> else
            // <then>
            // goto end
            // else:
            // <else>
            // end:
            Some(else_statement) => {
                let end_label = self.generate_label();
                let else_label = self.generate_label();
                BoundStatement::block(vec![
                    BoundStatement::conditional_goto(else_label.clone(), node.condition, true),
                    *node.then_statement,
                    BoundStatement::goto(end_label.clone()),
                    BoundStatement::label(else_label),
                    *else_statement,
                    BoundStatement::label(end_label),
                ])
            }
        };
        self.rewrite_statement(result)
    }

    fn rewrite_while_statement(&mut self, node: BoundWhileStatement) -> BoundStatement {
        // goto check
        // continue:
        // <body>
        // check:
        // gotoTrue <condition> continue
        // end:
        let end_label = self.generate_label();
        let check_label = self.generate_label();
        let continue_label = self.generate_label();

        let result = BoundStatement::block(vec![
            BoundStatement::goto(check_label.clone()),
            BoundStatement::label(continue_label.clone()),
            *node.body,
            BoundStatement::label(check_label),
            BoundStatement::conditional_goto(continue_label, node.condition, false),
            BoundStatement::label(end_label),
        ]);
        self.rewrite_statement(result)
    }

    fn rewrite_for_statement(&mut self, node: BoundForStatement) -> BoundStatement {
        // {
        //     var <var> = <lower>
        //     while <var> <= <upper>
        //     {
        //         <body>
        //         <var> = <var> + 1
        //     }
        // }
        let variable = node.variable;
        let condition = BoundExpression::binary(
            BoundExpression::variable(variable.clone()),
            BoundBinaryOperator::INT_LESS_OR_EQUALS,
            node.upper_bound,
        );
        let increment = BoundStatement::expression(BoundExpression::assignment(
            variable.clone(),
            BoundExpression::binary(
                BoundExpression::variable(variable.clone()),
                BoundBinaryOperator::INT_ADDITION,
                BoundExpression::literal(1),
            ),
        ));
        let body = BoundStatement::block(vec![*node.body, increment]);

        let result = BoundStatement::block(vec![
            BoundStatement::variable_declaration(variable, node.lower_bound),
            BoundStatement::while_loop(condition, body),
        ]);
        self.rewrite_statement(result)
    }
}

/// Inline nested blocks depth-first, left to right.
fn flatten(statement: BoundStatement) -> BoundBlockStatement {
    let mut statements = Vec::new();
    let mut stack = vec![statement];

    while let Some(current) = stack.pop() {
        match current {
            BoundStatement::Block(block) => stack.extend(block.statements.into_iter().rev()),
            other => statements.push(other),
        }
    }

    BoundBlockStatement { statements }
}
