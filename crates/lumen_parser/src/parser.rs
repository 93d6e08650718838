//! The lumen parser.

use crate::precedence::*;
use lumen_ast::syntax_kind::SyntaxKind;
use lumen_ast::*;
use lumen_diagnostics::DiagnosticCollection;
use lumen_scanner::Scanner;

/// Recursive descent parser over a single submission.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    diagnostics: DiagnosticCollection,
}

impl<'a> Parser<'a> {
    pub fn new(source_text: &'a str) -> Self {
        let mut parser = Self {
            scanner: Scanner::new(source_text),
            diagnostics: DiagnosticCollection::new(),
        };
        parser.next_token();
        parser
    }

    /// Parse a whole submission.
    ///
    /// Returns the root node and the syntax diagnostics: scanner diagnostics
    /// first, then parser diagnostics, each in discovery order.
    pub fn parse_compilation_unit(mut self) -> (CompilationUnitSyntax, DiagnosticCollection) {
        let statement = self.parse_statement();
        let end_of_file_token = self.expect_token(SyntaxKind::EndOfFileToken);
        let unit = CompilationUnitSyntax {
            statement,
            end_of_file_token,
        };

        let mut diagnostics = self.scanner.take_diagnostics();
        diagnostics.extend(self.diagnostics);
        tracing::trace!(diagnostics = diagnostics.len(), "parsed compilation unit");
        (unit, diagnostics)
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    #[inline]
    fn current_token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    #[inline]
    fn token_pos(&self) -> u32 {
        self.scanner.token_start() as u32
    }

    /// Advance to the next token, skipping bad characters.
    fn next_token(&mut self) -> SyntaxKind {
        scan_significant(&mut self.scanner)
    }

    /// Kind of the token after the current one.
    fn peek_token(&mut self) -> SyntaxKind {
        self.scanner.look_ahead(scan_significant)
    }

    /// Consume the current token and return it.
    fn take_token(&mut self) -> SyntaxToken {
        let token = self.scanner.to_token();
        self.next_token();
        token
    }

    /// Consume a token of `kind`, or report it missing and fabricate one.
    fn expect_token(&mut self, kind: SyntaxKind) -> SyntaxToken {
        if self.current_token() == kind {
            return self.take_token();
        }
        let actual = self.current_token().to_string();
        self.diagnostics
            .report_unexpected_token(self.scanner.token_span(), &actual, &kind.to_string());
        SyntaxToken::missing(kind, self.token_pos())
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_statement(&mut self) -> StatementSyntax {
        match self.current_token() {
            SyntaxKind::OpenBraceToken => StatementSyntax::Block(self.parse_block_statement()),
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword => {
                StatementSyntax::VariableDeclaration(self.parse_variable_declaration())
            }
            SyntaxKind::IfKeyword => StatementSyntax::If(self.parse_if_statement()),
            SyntaxKind::WhileKeyword => StatementSyntax::While(self.parse_while_statement()),
            SyntaxKind::ForKeyword => StatementSyntax::For(self.parse_for_statement()),
            _ => StatementSyntax::Expression(ExpressionStatementSyntax {
                expression: self.parse_expression(),
            }),
        }
    }

    fn parse_block_statement(&mut self) -> BlockStatementSyntax {
        let open_brace_token = self.expect_token(SyntaxKind::OpenBraceToken);
        let mut statements = Vec::new();

        while !matches!(
            self.current_token(),
            SyntaxKind::EndOfFileToken | SyntaxKind::CloseBraceToken
        ) {
            let start = self.scanner.token_start();
            statements.push(self.parse_statement());

            // A statement that consumed nothing would loop forever.
            if self.scanner.token_start() == start {
                self.next_token();
            }
        }

        let close_brace_token = self.expect_token(SyntaxKind::CloseBraceToken);
        BlockStatementSyntax {
            open_brace_token,
            statements,
            close_brace_token,
        }
    }

    fn parse_variable_declaration(&mut self) -> VariableDeclarationSyntax {
        let expected = if self.current_token() == SyntaxKind::LetKeyword {
            SyntaxKind::LetKeyword
        } else {
            SyntaxKind::VarKeyword
        };
        let keyword_token = self.expect_token(expected);
        let identifier_token = self.expect_token(SyntaxKind::Identifier);
        let equals_token = self.expect_token(SyntaxKind::EqualsToken);
        let initializer = self.parse_expression();
        VariableDeclarationSyntax {
            keyword_token,
            identifier_token,
            equals_token,
            initializer,
        }
    }

    fn parse_if_statement(&mut self) -> IfStatementSyntax {
        let if_keyword = self.expect_token(SyntaxKind::IfKeyword);
        let condition = self.parse_expression();
        let then_statement = Box::new(self.parse_statement());
        let else_clause = self.parse_else_clause();
        IfStatementSyntax {
            if_keyword,
            condition,
            then_statement,
            else_clause,
        }
    }

    fn parse_else_clause(&mut self) -> Option<ElseClauseSyntax> {
        if self.current_token() != SyntaxKind::ElseKeyword {
            return None;
        }
        let else_keyword = self.take_token();
        let else_statement = Box::new(self.parse_statement());
        Some(ElseClauseSyntax {
            else_keyword,
            else_statement,
        })
    }

    fn parse_while_statement(&mut self) -> WhileStatementSyntax {
        let while_keyword = self.expect_token(SyntaxKind::WhileKeyword);
        let condition = self.parse_expression();
        let body = Box::new(self.parse_statement());
        WhileStatementSyntax {
            while_keyword,
            condition,
            body,
        }
    }

    fn parse_for_statement(&mut self) -> ForStatementSyntax {
        let for_keyword = self.expect_token(SyntaxKind::ForKeyword);
        let identifier_token = self.expect_token(SyntaxKind::Identifier);
        let equals_token = self.expect_token(SyntaxKind::EqualsToken);
        let lower_bound = self.parse_expression();
        let to_keyword = self.expect_token(SyntaxKind::ToKeyword);
        let upper_bound = self.parse_expression();
        let body = Box::new(self.parse_statement());
        ForStatementSyntax {
            for_keyword,
            identifier_token,
            equals_token,
            lower_bound,
            to_keyword,
            upper_bound,
            body,
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn parse_expression(&mut self) -> ExpressionSyntax {
        self.parse_assignment_expression()
    }

    fn parse_assignment_expression(&mut self) -> ExpressionSyntax {
        if self.current_token() == SyntaxKind::Identifier
            && self.peek_token() == SyntaxKind::EqualsToken
        {
            let identifier_token = self.take_token();
            let equals_token = self.take_token();
            let expression = Box::new(self.parse_assignment_expression());
            return ExpressionSyntax::Assignment(AssignmentExpressionSyntax {
                identifier_token,
                equals_token,
                expression,
            });
        }
        self.parse_binary_expression(OperatorPrecedence::Lowest)
    }

    fn parse_binary_expression(&mut self, parent_precedence: OperatorPrecedence) -> ExpressionSyntax {
        let unary_precedence = get_unary_operator_precedence(self.current_token());
        let mut left = if unary_precedence != OperatorPrecedence::Invalid
            && unary_precedence >= parent_precedence
        {
            let operator_token = self.take_token();
            let operand = Box::new(self.parse_binary_expression(unary_precedence));
            ExpressionSyntax::Unary(UnaryExpressionSyntax {
                operator_token,
                operand,
            })
        } else {
            self.parse_primary_expression()
        };

        loop {
            let precedence = get_binary_operator_precedence(self.current_token());
            if precedence == OperatorPrecedence::Invalid || precedence <= parent_precedence {
                break;
            }

            let operator_token = self.take_token();
            let right = self.parse_binary_expression(precedence);
            left = ExpressionSyntax::Binary(BinaryExpressionSyntax {
                left: Box::new(left),
                operator_token,
                right: Box::new(right),
            });
        }

        left
    }

    fn parse_primary_expression(&mut self) -> ExpressionSyntax {
        match self.current_token() {
            SyntaxKind::OpenParenToken => {
                let open_paren_token = self.take_token();
                let expression = Box::new(self.parse_expression());
                let close_paren_token = self.expect_token(SyntaxKind::CloseParenToken);
                ExpressionSyntax::Parenthesized(ParenthesizedExpressionSyntax {
                    open_paren_token,
                    expression,
                    close_paren_token,
                })
            }
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                ExpressionSyntax::Literal(LiteralExpressionSyntax {
                    literal_token: self.take_token(),
                })
            }
            SyntaxKind::Identifier => ExpressionSyntax::Name(NameExpressionSyntax {
                identifier_token: self.take_token(),
            }),
            _ => ExpressionSyntax::Literal(LiteralExpressionSyntax {
                literal_token: self.expect_token(SyntaxKind::NumericLiteral),
            }),
        }
    }
}

/// Scan until a token other than a bad character is found.
fn scan_significant(scanner: &mut Scanner<'_>) -> SyntaxKind {
    loop {
        let kind = scanner.scan();
        if kind != SyntaxKind::Unknown {
            return kind;
        }
    }
}
