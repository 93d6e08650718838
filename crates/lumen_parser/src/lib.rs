//! lumen_parser: Recursive descent parser for lumen.
//!
//! Parses the token stream from the scanner into an owned syntax tree.
//! Parsing never fails: missing tokens are reported and fabricated so the
//! rest of the input is still parsed.

mod parser;
mod precedence;
mod syntax_tree;

pub use parser::Parser;
pub use precedence::{get_binary_operator_precedence, get_unary_operator_precedence, OperatorPrecedence};
pub use syntax_tree::SyntaxTree;
