//! lumen_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Every user-facing problem found by the scanner, parser or binder is a
//! [`Diagnostic`]: a resolved message plus the span it points at. Diagnostics
//! are collected in discovery order and never abort a compilation.

use lumen_core::text::TextSpan;
use std::fmt;

/// A diagnostic message template.
///
/// The template may contain `{0}`, `{1}`, ... placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub span: TextSpan,
    pub message: String,
    pub code: u32,
}

impl Diagnostic {
    pub fn new(span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            span,
            message: format_message(message.message, args),
            code: message.code,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: LM{}: {}", self.span, self.code, self.message)
    }
}

/// Format a message template by replacing `{0}`, `{1}`, etc. with arguments.
///
/// Substitution is a single pass, so argument text is never re-expanded.
/// Placeholders without a matching argument are kept verbatim.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            let arg = args.get(index)?;
            Some((arg, close))
        });
        match substituted {
            Some((arg, close)) => {
                result.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}

/// An ordered, append-only collection of diagnostics.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn report(&mut self, span: TextSpan, message: &DiagnosticMessage, args: &[&str]) {
        self.add(Diagnostic::new(span, message, args));
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Drop every diagnostic reported after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.diagnostics.truncate(len);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    // ========================================================================
    // Reporting helpers
    // ========================================================================

    pub fn report_invalid_number(&mut self, span: TextSpan, text: &str, type_name: &str) {
        self.report(span, &messages::INVALID_NUMBER, &[text, type_name]);
    }

    pub fn report_bad_character(&mut self, span: TextSpan, character: char) {
        let mut buf = [0u8; 4];
        self.report(span, &messages::BAD_CHARACTER, &[character.encode_utf8(&mut buf)]);
    }

    pub fn report_unexpected_token(&mut self, span: TextSpan, actual: &str, expected: &str) {
        self.report(span, &messages::UNEXPECTED_TOKEN, &[actual, expected]);
    }

    pub fn report_undefined_unary_operator(&mut self, span: TextSpan, operator: &str, operand_type: &str) {
        self.report(span, &messages::UNDEFINED_UNARY_OPERATOR, &[operator, operand_type]);
    }

    pub fn report_undefined_binary_operator(
        &mut self,
        span: TextSpan,
        operator: &str,
        left_type: &str,
        right_type: &str,
    ) {
        self.report(
            span,
            &messages::UNDEFINED_BINARY_OPERATOR,
            &[operator, left_type, right_type],
        );
    }

    pub fn report_undefined_name(&mut self, span: TextSpan, name: &str) {
        self.report(span, &messages::UNDEFINED_NAME, &[name]);
    }

    pub fn report_cannot_convert(&mut self, span: TextSpan, from_type: &str, to_type: &str) {
        self.report(span, &messages::CANNOT_CONVERT, &[from_type, to_type]);
    }

    pub fn report_variable_already_declared(&mut self, span: TextSpan, name: &str) {
        self.report(span, &messages::VARIABLE_ALREADY_DECLARED, &[name]);
    }

    pub fn report_cannot_assign(&mut self, span: TextSpan, name: &str) {
        self.report(span, &messages::CANNOT_ASSIGN, &[name]);
    }
}

impl IntoIterator for DiagnosticCollection {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, $msg:expr) => {
            DiagnosticMessage { code: $code, message: $msg }
        };
    }

    // ========================================================================
    // Scanner errors (1000-1099)
    // ========================================================================
    pub const INVALID_NUMBER: DiagnosticMessage = diag!(1001, "The number {0} isn't a valid {1}");
    pub const BAD_CHARACTER: DiagnosticMessage = diag!(1002, "Bad character input '{0}'");

    // ========================================================================
    // Parser errors (1100-1199)
    // ========================================================================
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(1101, "Unexpected token '{0}' expected {1}");

    // ========================================================================
    // Binder errors (2000-2099)
    // ========================================================================
    pub const UNDEFINED_UNARY_OPERATOR: DiagnosticMessage = diag!(2001, "Unary operator {0} is not defined for type {1}");
    pub const UNDEFINED_BINARY_OPERATOR: DiagnosticMessage = diag!(2002, "Binary operator {0} is not defined for type {1} and {2}.");
    pub const UNDEFINED_NAME: DiagnosticMessage = diag!(2003, "Variable {0} doesn't exist");
    pub const CANNOT_CONVERT: DiagnosticMessage = diag!(2004, "Cannot convert type from '{0}' to '{1}'");
    pub const VARIABLE_ALREADY_DECLARED: DiagnosticMessage = diag!(2005, "Variable '{0}' is already declared");
    pub const CANNOT_ASSIGN: DiagnosticMessage = diag!(2006, "Variable '{0}' is readonly and cannot be assigned to");
}
