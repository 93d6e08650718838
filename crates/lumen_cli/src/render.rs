//! Diagnostic rendering for the terminal.

use lumen_compiler::SyntaxTree;
use lumen_diagnostics::Diagnostic;
use miette::{GraphicalReportHandler, GraphicalTheme, LabeledSpan, NamedSource, SourceCode};
use std::fmt;
use thiserror::Error;

/// A diagnostic paired with the source it points into, for `miette`.
#[derive(Debug, Error)]
#[error("{message}")]
struct SourceDiagnostic {
    message: String,
    code: u32,
    text: NamedSource<String>,
    offset: usize,
    length: usize,
}

impl miette::Diagnostic for SourceDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("LM{}", self.code)))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.text)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = LabeledSpan::new_with_span(None, (self.offset, self.length));
        Some(Box::new(std::iter::once(span)))
    }
}

/// Renders the diagnostics of one submission.
pub struct DiagnosticRenderer<'a> {
    /// Shown before positions; empty for REPL input.
    name: &'a str,
    tree: &'a SyntaxTree,
    color: bool,
}

impl<'a> DiagnosticRenderer<'a> {
    pub fn new(name: &'a str, tree: &'a SyntaxTree, color: bool) -> Self {
        Self { name, tree, color }
    }

    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        if self.color {
            self.render_graphical(diagnostic)
        } else {
            self.render_plain(diagnostic)
        }
    }

    /// `name(line, column): message`, one-based.
    fn render_plain(&self, diagnostic: &Diagnostic) -> String {
        let position = self
            .tree
            .line_map()
            .line_and_column_of(self.tree.text(), diagnostic.span.start);
        format!(
            "{}({}, {}): {}",
            self.name,
            position.line + 1,
            position.character + 1,
            diagnostic.message
        )
    }

    fn render_graphical(&self, diagnostic: &Diagnostic) -> String {
        let report = SourceDiagnostic {
            message: diagnostic.message.clone(),
            code: diagnostic.code,
            text: NamedSource::new(self.name, self.tree.text().to_string()),
            offset: diagnostic.span.start as usize,
            length: diagnostic.span.length as usize,
        };

        let mut output = String::new();
        let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode());
        match handler.render_report(&mut output, &report) {
            Ok(()) => output,
            Err(_) => self.render_plain(diagnostic),
        }
    }
}
