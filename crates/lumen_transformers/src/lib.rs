//! lumen_transformers: Bound tree transformations.
//!
//! Rewrites bound trees produced by the binder:
//! - `BoundTreeRewriter`: a by-value tree rewriter whose default methods
//!   rebuild every node from its rewritten children
//! - `Lowerer`: replaces `if`/`while`/`for` with labels and gotos and
//!   flattens the result into a single block

mod lowerer;
mod rewriter;

pub use lowerer::Lowerer;
pub use rewriter::BoundTreeRewriter;
