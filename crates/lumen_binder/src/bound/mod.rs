//! The bound tree: the typed, name-resolved form of a submission.

mod node;
pub mod operators;

pub use node::*;
pub use operators::{BoundBinaryOperator, BoundBinaryOperatorKind, BoundUnaryOperator, BoundUnaryOperatorKind};
