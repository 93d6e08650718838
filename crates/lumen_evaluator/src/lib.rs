//! lumen_evaluator: Execution of lowered programs.
//!
//! Runs the flat statement list produced by the lowerer against a variable
//! store owned by the caller, so that values survive from one submission to
//! the next.

mod error;
mod evaluator;

pub use error::EvaluationError;
pub use evaluator::{Evaluator, Variables};
