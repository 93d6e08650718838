//! lumen_scanner: Lexer/tokenizer for lumen source code.
//!
//! Converts source text into [`SyntaxToken`](lumen_ast::SyntaxToken)s.
//! Whitespace is skipped; bad characters and out-of-range numbers are
//! reported as diagnostics and scanning continues.

mod char_codes;
mod scanner;

pub use scanner::{Scanner, ScannerState};
