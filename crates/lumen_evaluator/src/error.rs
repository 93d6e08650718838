//! Runtime failures.

use lumen_binder::bound::BoundNodeKind;
use lumen_core::Value;
use thiserror::Error;

/// An error that aborts evaluation.
///
/// Only `DivisionByZero` can be caused by a well-formed program. The other
/// variants mean the bound program broke an invariant the binder or lowerer
/// is supposed to uphold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("attempt to divide by zero")]
    DivisionByZero,

    #[error("variable '{0}' has no value")]
    UndefinedVariable(String),

    #[error("jump to unknown label '{0}'")]
    UndefinedLabel(String),

    #[error("unexpected {0} in a lowered program")]
    UnexpectedStatement(BoundNodeKind),

    #[error("operator {operator} cannot be applied to {operand}")]
    InvalidOperand { operator: String, operand: Value },
}
