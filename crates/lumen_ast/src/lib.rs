//! lumen_ast: Syntax tree definitions for the lumen language.
//!
//! The tree is fully owned so that a parsed submission can outlive the
//! scanner and be kept alive by later compilations.

pub mod node;
pub mod syntax_kind;

// Re-export key types
pub use node::*;
pub use syntax_kind::SyntaxKind;
