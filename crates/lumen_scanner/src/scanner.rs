//! The lumen scanner/lexer.
//!
//! Positions are byte offsets into the source text.

use crate::char_codes::*;
use lumen_ast::syntax_kind::SyntaxKind;
use lumen_ast::SyntaxToken;
use lumen_core::text::TextSpan;
use lumen_core::Value;
use lumen_diagnostics::DiagnosticCollection;

/// Saved scanner state for lookahead.
#[derive(Debug, Clone)]
pub struct ScannerState {
    pos: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: Option<Value>,
    diagnostic_count: usize,
}

/// The scanner converts lumen source text into tokens.
pub struct Scanner<'a> {
    /// The source text being scanned.
    text: &'a str,
    /// Current position in the text.
    pos: usize,
    /// Start of the current token (after leading trivia).
    token_start: usize,
    token: SyntaxKind,
    /// The value of the current token, for numbers and boolean keywords.
    token_value: Option<Value>,
    diagnostics: DiagnosticCollection,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: None,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Look ahead: save state, call f, restore state and return the result.
    ///
    /// Diagnostics reported while looking ahead are discarded.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.save_state();
        let result = f(self);
        self.restore_state(state);
        result
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub fn token_value(&self) -> Option<Value> {
        self.token_value
    }

    /// The source text of the current token.
    #[inline]
    pub fn token_text(&self) -> &'a str {
        let text: &'a str = self.text;
        &text[self.token_start..self.pos]
    }

    /// Get the start position of the current token (after trivia).
    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Get the current position (end of current token).
    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn token_span(&self) -> TextSpan {
        TextSpan::from_bounds(self.token_start as u32, self.pos as u32)
    }

    /// Build a [`SyntaxToken`] for the current token.
    pub fn to_token(&self) -> SyntaxToken {
        SyntaxToken::new(
            self.token,
            self.token_start as u32,
            self.token_text(),
            self.token_value,
        )
    }

    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// Take the accumulated diagnostics, leaving an empty collection.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    /// Save the full scanner state for lookahead.
    pub fn save_state(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value,
            diagnostic_count: self.diagnostics.len(),
        }
    }

    /// Restore the full scanner state from a saved state.
    pub fn restore_state(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.token_start = state.token_start;
        self.token = state.token;
        self.token_value = state.token_value;
        self.diagnostics.truncate(state.diagnostic_count);
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    /// The character `offset` bytes past the current position.
    #[inline]
    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(self.pos + offset).copied()
    }

    fn skip_trivia(&mut self) {
        while let Some(ch) = self.current_char() {
            if !is_white_space(ch) {
                return;
            }
            self.pos += ch.len_utf8();
        }
    }

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.token_value = None;

        self.skip_trivia();
        self.token_start = self.pos;

        let Some(ch) = self.current_char() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            '(' => { self.pos += 1; SyntaxKind::OpenParenToken }
            ')' => { self.pos += 1; SyntaxKind::CloseParenToken }
            '{' => { self.pos += 1; SyntaxKind::OpenBraceToken }
            '}' => { self.pos += 1; SyntaxKind::CloseBraceToken }
            '+' => { self.pos += 1; SyntaxKind::PlusToken }
            '-' => { self.pos += 1; SyntaxKind::MinusToken }
            '*' => { self.pos += 1; SyntaxKind::AsteriskToken }
            '/' => { self.pos += 1; SyntaxKind::SlashToken }
            '~' => { self.pos += 1; SyntaxKind::TildeToken }
            '^' => { self.pos += 1; SyntaxKind::CaretToken }

            '!' => self.scan_followed_by(b'=', SyntaxKind::ExclamationToken, SyntaxKind::ExclamationEqualsToken),
            '=' => self.scan_followed_by(b'=', SyntaxKind::EqualsToken, SyntaxKind::EqualsEqualsToken),
            '<' => self.scan_followed_by(b'=', SyntaxKind::LessThanToken, SyntaxKind::LessThanEqualsToken),
            '>' => self.scan_followed_by(b'=', SyntaxKind::GreaterThanToken, SyntaxKind::GreaterThanEqualsToken),
            '&' => self.scan_followed_by(b'&', SyntaxKind::AmpersandToken, SyntaxKind::AmpersandAmpersandToken),
            '|' => self.scan_followed_by(b'|', SyntaxKind::BarToken, SyntaxKind::BarBarToken),

            '0'..='9' => self.scan_number(),

            _ if is_identifier_start(ch) => self.scan_identifier(),

            _ => {
                self.pos += ch.len_utf8();
                let span = self.token_span();
                self.diagnostics.report_bad_character(span, ch);
                SyntaxKind::Unknown
            }
        };

        self.token
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    /// Scan a one-character operator that becomes `double` when followed by `next`.
    fn scan_followed_by(&mut self, next: u8, single: SyntaxKind, double: SyntaxKind) -> SyntaxKind {
        if self.byte_at(1) == Some(next) {
            self.pos += 2;
            double
        } else {
            self.pos += 1;
            single
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        while self.current_char().map_or(false, is_digit) {
            self.pos += 1;
        }

        let text = self.token_text();
        match text.parse::<i64>() {
            Ok(value) => self.token_value = Some(Value::Int(value)),
            Err(_) => {
                let span = self.token_span();
                self.diagnostics.report_invalid_number(span, text, "Int");
            }
        }
        SyntaxKind::NumericLiteral
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        while let Some(ch) = self.current_char() {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }

        match SyntaxKind::from_keyword(self.token_text()) {
            Some(SyntaxKind::TrueKeyword) => {
                self.token_value = Some(Value::Bool(true));
                SyntaxKind::TrueKeyword
            }
            Some(SyntaxKind::FalseKeyword) => {
                self.token_value = Some(Value::Bool(false));
                SyntaxKind::FalseKeyword
            }
            Some(keyword) => keyword,
            None => SyntaxKind::Identifier,
        }
    }
}
