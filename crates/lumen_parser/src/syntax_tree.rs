//! A parsed submission.

use crate::parser::Parser;
use lumen_ast::syntax_kind::SyntaxKind;
use lumen_ast::{CompilationUnitSyntax, SyntaxToken};
use lumen_core::text::LineMap;
use lumen_diagnostics::Diagnostic;
use lumen_scanner::Scanner;

/// The source text of one submission together with its syntax tree and the
/// syntax diagnostics found while building it.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    text: String,
    line_map: LineMap,
    root: CompilationUnitSyntax,
    diagnostics: Vec<Diagnostic>,
}

impl SyntaxTree {
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        let (root, diagnostics) = Parser::new(&text).parse_compilation_unit();
        let line_map = LineMap::new(&text);
        Self {
            text,
            line_map,
            root,
            diagnostics: diagnostics.into_diagnostics(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_map(&self) -> &LineMap {
        &self.line_map
    }

    pub fn root(&self) -> &CompilationUnitSyntax {
        &self.root
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Scan `text` into tokens, without the end-of-file token.
    ///
    /// Bad characters come back as [`SyntaxKind::Unknown`] tokens.
    pub fn parse_tokens(text: &str) -> Vec<SyntaxToken> {
        let mut scanner = Scanner::new(text);
        let mut tokens = Vec::new();
        while scanner.scan() != SyntaxKind::EndOfFileToken {
            tokens.push(scanner.to_token());
        }
        tokens
    }
}
