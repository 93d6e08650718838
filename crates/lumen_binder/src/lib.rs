//! lumen_binder: Name resolution and type checking.
//!
//! The binder walks the syntax tree, resolves names against a chain of
//! scopes, picks operators by operand type, and produces the bound tree
//! consumed by the lowerer and evaluator. Binding never stops at the first
//! error: every failure is reported and replaced by a best-effort node.

mod binder;
pub mod bound;
mod scope;
mod symbol;

pub use binder::Binder;
pub use scope::{AlreadyDeclared, BoundGlobalScope, BoundScope};
pub use symbol::{LabelSymbol, TypeSymbol, VariableSymbol};
