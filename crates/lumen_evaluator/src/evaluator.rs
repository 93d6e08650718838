//! The statement interpreter.

use crate::error::EvaluationError;
use lumen_binder::bound::*;
use lumen_binder::{LabelSymbol, VariableSymbol};
use lumen_core::Value;
use rustc_hash::FxHashMap;

/// The variable store, keyed by declaration.
pub type Variables = FxHashMap<VariableSymbol, Value>;

/// Executes one lowered program.
///
/// The program must be flat: only declarations, expression statements,
/// labels and jumps. Anything else is reported as
/// [`EvaluationError::UnexpectedStatement`].
pub struct Evaluator<'a> {
    root: &'a BoundBlockStatement,
    variables: &'a mut Variables,
    last_value: Option<Value>,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a BoundBlockStatement, variables: &'a mut Variables) -> Self {
        Self {
            root,
            variables,
            last_value: None,
        }
    }

    /// Run the program and return the value of the last declaration or
    /// expression statement executed.
    pub fn evaluate(mut self) -> Result<Option<Value>, EvaluationError> {
        let root = self.root;
        let statements = &root.statements;
        let labels = label_indices(statements);
        tracing::trace!(statements = statements.len(), labels = labels.len(), "evaluating");

        let mut index = 0;
        while index < statements.len() {
            index = match &statements[index] {
                BoundStatement::VariableDeclaration(node) => {
                    let value = self.evaluate_expression(&node.initializer)?;
                    self.variables.insert(node.variable.clone(), value);
                    self.last_value = Some(value);
                    index + 1
                }
                BoundStatement::Expression(node) => {
                    self.last_value = Some(self.evaluate_expression(&node.expression)?);
                    index + 1
                }
                BoundStatement::ConditionalGoto(node) => {
                    let condition = self.evaluate_expression(&node.condition)?;
                    let condition = condition.as_bool().ok_or(EvaluationError::InvalidOperand {
                        operator: "conditional goto".to_string(),
                        operand: condition,
                    })?;
                    if condition != node.jump_if_false {
                        jump_target(&labels, &node.label)?
                    } else {
                        index + 1
                    }
                }
                BoundStatement::Goto(node) => jump_target(&labels, &node.label)?,
                BoundStatement::Label(_) => index + 1,
                other => return Err(EvaluationError::UnexpectedStatement(other.kind())),
            };
        }

        Ok(self.last_value)
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn evaluate_expression(&mut self, node: &BoundExpression) -> Result<Value, EvaluationError> {
        match node {
            BoundExpression::Literal(node) => Ok(node.value),
            BoundExpression::Variable(node) => self
                .variables
                .get(&node.variable)
                .copied()
                .ok_or_else(|| EvaluationError::UndefinedVariable(node.variable.name().to_string())),
            BoundExpression::Assignment(node) => {
                let value = self.evaluate_expression(&node.expression)?;
                self.variables.insert(node.variable.clone(), value);
                Ok(value)
            }
            BoundExpression::Unary(node) => {
                let operand = self.evaluate_expression(&node.operand)?;
                evaluate_unary(node.op.kind, operand)
            }
            BoundExpression::Binary(node) => {
                // both sides always run, even for && and ||
                let left = self.evaluate_expression(&node.left)?;
                let right = self.evaluate_expression(&node.right)?;
                evaluate_binary(node.op.kind, left, right)
            }
        }
    }
}

/// Map each label to the index of the statement that follows it.
fn label_indices(statements: &[BoundStatement]) -> FxHashMap<&LabelSymbol, usize> {
    statements
        .iter()
        .enumerate()
        .filter_map(|(i, statement)| match statement {
            BoundStatement::Label(node) => Some((&node.label, i + 1)),
            _ => None,
        })
        .collect()
}

fn jump_target(labels: &FxHashMap<&LabelSymbol, usize>, label: &LabelSymbol) -> Result<usize, EvaluationError> {
    labels
        .get(label)
        .copied()
        .ok_or_else(|| EvaluationError::UndefinedLabel(label.name().to_string()))
}

fn evaluate_unary(kind: BoundUnaryOperatorKind, operand: Value) -> Result<Value, EvaluationError> {
    use BoundUnaryOperatorKind as U;

    match (kind, operand) {
        (U::Identity, Value::Int(n)) => Ok(Value::Int(n)),
        (U::Negation, Value::Int(n)) => Ok(Value::Int(n.wrapping_neg())),
        (U::OnesComplement, Value::Int(n)) => Ok(Value::Int(!n)),
        (U::LogicalNegation, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (kind, operand) => Err(EvaluationError::InvalidOperand {
            operator: format!("{:?}", kind),
            operand,
        }),
    }
}

fn evaluate_binary(kind: BoundBinaryOperatorKind, left: Value, right: Value) -> Result<Value, EvaluationError> {
    use BoundBinaryOperatorKind as B;

    let value = match (kind, left, right) {
        (B::Addition, Value::Int(l), Value::Int(r)) => Value::Int(l.wrapping_add(r)),
        (B::Subtraction, Value::Int(l), Value::Int(r)) => Value::Int(l.wrapping_sub(r)),
        (B::Multiplication, Value::Int(l), Value::Int(r)) => Value::Int(l.wrapping_mul(r)),
        (B::Division, Value::Int(_), Value::Int(0)) => return Err(EvaluationError::DivisionByZero),
        (B::Division, Value::Int(l), Value::Int(r)) => Value::Int(l.wrapping_div(r)),

        (B::BitwiseAnd, Value::Int(l), Value::Int(r)) => Value::Int(l & r),
        (B::BitwiseOr, Value::Int(l), Value::Int(r)) => Value::Int(l | r),
        (B::BitwiseXor, Value::Int(l), Value::Int(r)) => Value::Int(l ^ r),
        (B::BitwiseAnd | B::LogicalAnd, Value::Bool(l), Value::Bool(r)) => Value::Bool(l & r),
        (B::BitwiseOr | B::LogicalOr, Value::Bool(l), Value::Bool(r)) => Value::Bool(l | r),
        (B::BitwiseXor, Value::Bool(l), Value::Bool(r)) => Value::Bool(l ^ r),

        (B::Equals, l, r) if same_type(l, r) => Value::Bool(l == r),
        (B::NotEquals, l, r) if same_type(l, r) => Value::Bool(l != r),

        (B::Less, Value::Int(l), Value::Int(r)) => Value::Bool(l < r),
        (B::LessOrEquals, Value::Int(l), Value::Int(r)) => Value::Bool(l <= r),
        (B::Greater, Value::Int(l), Value::Int(r)) => Value::Bool(l > r),
        (B::GreaterOrEquals, Value::Int(l), Value::Int(r)) => Value::Bool(l >= r),

        (kind, left, right) => {
            let operand = if same_type(left, right) { left } else { right };
            return Err(EvaluationError::InvalidOperand {
                operator: format!("{:?}", kind),
                operand,
            });
        }
    };
    Ok(value)
}

fn same_type(left: Value, right: Value) -> bool {
    std::mem::discriminant(&left) == std::mem::discriminant(&right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_binder::TypeSymbol;

    fn run(statements: Vec<BoundStatement>) -> Result<Option<Value>, EvaluationError> {
        let program = BoundBlockStatement { statements };
        let mut variables = Variables::default();
        Evaluator::new(&program, &mut variables).evaluate()
    }

    #[test]
    fn test_empty_program_has_no_value() {
        assert_eq!(run(Vec::new()), Ok(None));
    }

    #[test]
    fn test_labels_do_not_produce_values() {
        assert_eq!(
            run(vec![
                BoundStatement::expression(BoundExpression::literal(4)),
                BoundStatement::label(LabelSymbol::new("Label1")),
            ]),
            Ok(Some(Value::Int(4)))
        );
    }

    #[test]
    fn test_conditional_goto_respects_jump_if_false() {
        let skip = LabelSymbol::new("skip");
        let program = |jump_if_false| {
            vec![
                BoundStatement::expression(BoundExpression::literal(1)),
                BoundStatement::conditional_goto(skip.clone(), BoundExpression::literal(false), jump_if_false),
                BoundStatement::expression(BoundExpression::literal(2)),
                BoundStatement::label(skip.clone()),
            ]
        };
        assert_eq!(run(program(true)), Ok(Some(Value::Int(1))));
        assert_eq!(run(program(false)), Ok(Some(Value::Int(2))));
    }

    #[test]
    fn test_unknown_label_is_an_error() {
        assert_eq!(
            run(vec![BoundStatement::goto(LabelSymbol::new("nowhere"))]),
            Err(EvaluationError::UndefinedLabel("nowhere".to_string()))
        );
    }

    #[test]
    fn test_structured_statement_is_rejected() {
        assert_eq!(
            run(vec![BoundStatement::while_loop(
                BoundExpression::literal(false),
                BoundStatement::block(Vec::new()),
            )]),
            Err(EvaluationError::UnexpectedStatement(BoundNodeKind::WhileStatement))
        );
    }

    #[test]
    fn test_unassigned_variable_is_an_error() {
        let x = VariableSymbol::new("x", TypeSymbol::Int, false);
        assert_eq!(
            run(vec![BoundStatement::expression(BoundExpression::variable(x))]),
            Err(EvaluationError::UndefinedVariable("x".to_string()))
        );
    }

    #[test]
    fn test_integer_arithmetic_wraps() {
        use BoundBinaryOperatorKind as B;
        assert_eq!(
            evaluate_binary(B::Addition, Value::Int(i64::MAX), Value::Int(1)),
            Ok(Value::Int(i64::MIN))
        );
        assert_eq!(
            evaluate_binary(B::Division, Value::Int(i64::MIN), Value::Int(-1)),
            Ok(Value::Int(i64::MIN))
        );
        assert_eq!(
            evaluate_unary(BoundUnaryOperatorKind::Negation, Value::Int(i64::MIN)),
            Ok(Value::Int(i64::MIN))
        );
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            evaluate_binary(BoundBinaryOperatorKind::Division, Value::Int(7), Value::Int(0)),
            Err(EvaluationError::DivisionByZero)
        );
    }

    #[test]
    fn test_mismatched_operands_are_rejected() {
        assert!(matches!(
            evaluate_binary(BoundBinaryOperatorKind::Addition, Value::Int(1), Value::Bool(true)),
            Err(EvaluationError::InvalidOperand { .. })
        ));
        assert!(matches!(
            evaluate_unary(BoundUnaryOperatorKind::LogicalNegation, Value::Int(1)),
            Err(EvaluationError::InvalidOperand { .. })
        ));
    }
}
