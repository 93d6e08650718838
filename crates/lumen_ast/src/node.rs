//! Syntax node definitions.
//!
//! Each node type owns its children. [`SyntaxNodeRef`] gives a uniform,
//! borrowed view over tokens and nodes with an exhaustive `children()` walk,
//! which is how spans are computed and trees are printed.

use crate::syntax_kind::SyntaxKind;
use lumen_core::text::TextSpan;
use lumen_core::Value;

// ============================================================================
// Tokens
// ============================================================================

/// A token produced by the scanner.
///
/// A token fabricated by the parser during error recovery has empty text,
/// no value, and a zero-length span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxToken {
    pub kind: SyntaxKind,
    pub position: u32,
    pub text: String,
    pub value: Option<Value>,
}

impl SyntaxToken {
    pub fn new(kind: SyntaxKind, position: u32, text: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            kind,
            position,
            text: text.into(),
            value,
        }
    }

    /// A zero-length token standing in for one the parser expected but did not find.
    pub fn missing(kind: SyntaxKind, position: u32) -> Self {
        Self::new(kind, position, String::new(), None)
    }

    pub fn span(&self) -> TextSpan {
        TextSpan::new(self.position, self.text.len() as u32)
    }

    pub fn is_missing(&self) -> bool {
        self.text.is_empty() && self.kind != SyntaxKind::EndOfFileToken
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralExpressionSyntax {
    pub literal_token: SyntaxToken,
}

impl LiteralExpressionSyntax {
    /// The literal's value; `None` for a missing or out-of-range number.
    pub fn value(&self) -> Option<Value> {
        self.literal_token.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameExpressionSyntax {
    pub identifier_token: SyntaxToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentExpressionSyntax {
    pub identifier_token: SyntaxToken,
    pub equals_token: SyntaxToken,
    pub expression: Box<ExpressionSyntax>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryExpressionSyntax {
    pub operator_token: SyntaxToken,
    pub operand: Box<ExpressionSyntax>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExpressionSyntax {
    pub left: Box<ExpressionSyntax>,
    pub operator_token: SyntaxToken,
    pub right: Box<ExpressionSyntax>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParenthesizedExpressionSyntax {
    pub open_paren_token: SyntaxToken,
    pub expression: Box<ExpressionSyntax>,
    pub close_paren_token: SyntaxToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionSyntax {
    Literal(LiteralExpressionSyntax),
    Name(NameExpressionSyntax),
    Assignment(AssignmentExpressionSyntax),
    Unary(UnaryExpressionSyntax),
    Binary(BinaryExpressionSyntax),
    Parenthesized(ParenthesizedExpressionSyntax),
}

impl ExpressionSyntax {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            ExpressionSyntax::Literal(_) => SyntaxKind::LiteralExpression,
            ExpressionSyntax::Name(_) => SyntaxKind::NameExpression,
            ExpressionSyntax::Assignment(_) => SyntaxKind::AssignmentExpression,
            ExpressionSyntax::Unary(_) => SyntaxKind::UnaryExpression,
            ExpressionSyntax::Binary(_) => SyntaxKind::BinaryExpression,
            ExpressionSyntax::Parenthesized(_) => SyntaxKind::ParenthesizedExpression,
        }
    }

    pub fn span(&self) -> TextSpan {
        SyntaxNodeRef::Expression(self).span()
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockStatementSyntax {
    pub open_brace_token: SyntaxToken,
    pub statements: Vec<StatementSyntax>,
    pub close_brace_token: SyntaxToken,
}

/// `var name = initializer` or `let name = initializer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclarationSyntax {
    pub keyword_token: SyntaxToken,
    pub identifier_token: SyntaxToken,
    pub equals_token: SyntaxToken,
    pub initializer: ExpressionSyntax,
}

impl VariableDeclarationSyntax {
    pub fn is_read_only(&self) -> bool {
        self.keyword_token.kind == SyntaxKind::LetKeyword
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfStatementSyntax {
    pub if_keyword: SyntaxToken,
    pub condition: ExpressionSyntax,
    pub then_statement: Box<StatementSyntax>,
    pub else_clause: Option<ElseClauseSyntax>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElseClauseSyntax {
    pub else_keyword: SyntaxToken,
    pub else_statement: Box<StatementSyntax>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhileStatementSyntax {
    pub while_keyword: SyntaxToken,
    pub condition: ExpressionSyntax,
    pub body: Box<StatementSyntax>,
}

/// `for name = lower to upper body`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForStatementSyntax {
    pub for_keyword: SyntaxToken,
    pub identifier_token: SyntaxToken,
    pub equals_token: SyntaxToken,
    pub lower_bound: ExpressionSyntax,
    pub to_keyword: SyntaxToken,
    pub upper_bound: ExpressionSyntax,
    pub body: Box<StatementSyntax>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionStatementSyntax {
    pub expression: ExpressionSyntax,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementSyntax {
    Block(BlockStatementSyntax),
    VariableDeclaration(VariableDeclarationSyntax),
    If(IfStatementSyntax),
    While(WhileStatementSyntax),
    For(ForStatementSyntax),
    Expression(ExpressionStatementSyntax),
}

impl StatementSyntax {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            StatementSyntax::Block(_) => SyntaxKind::BlockStatement,
            StatementSyntax::VariableDeclaration(_) => SyntaxKind::VariableDeclaration,
            StatementSyntax::If(_) => SyntaxKind::IfStatement,
            StatementSyntax::While(_) => SyntaxKind::WhileStatement,
            StatementSyntax::For(_) => SyntaxKind::ForStatement,
            StatementSyntax::Expression(_) => SyntaxKind::ExpressionStatement,
        }
    }

    pub fn span(&self) -> TextSpan {
        SyntaxNodeRef::Statement(self).span()
    }
}

// ============================================================================
// Root
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnitSyntax {
    pub statement: StatementSyntax,
    pub end_of_file_token: SyntaxToken,
}

// ============================================================================
// Uniform traversal
// ============================================================================

/// A borrowed reference to any token or node in the tree.
#[derive(Debug, Clone, Copy)]
pub enum SyntaxNodeRef<'a> {
    Token(&'a SyntaxToken),
    CompilationUnit(&'a CompilationUnitSyntax),
    ElseClause(&'a ElseClauseSyntax),
    Statement(&'a StatementSyntax),
    Expression(&'a ExpressionSyntax),
}

impl<'a> SyntaxNodeRef<'a> {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxNodeRef::Token(token) => token.kind,
            SyntaxNodeRef::CompilationUnit(_) => SyntaxKind::CompilationUnit,
            SyntaxNodeRef::ElseClause(_) => SyntaxKind::ElseClause,
            SyntaxNodeRef::Statement(statement) => statement.kind(),
            SyntaxNodeRef::Expression(expression) => expression.kind(),
        }
    }

    pub fn as_token(&self) -> Option<&'a SyntaxToken> {
        match self {
            SyntaxNodeRef::Token(token) => Some(token),
            _ => None,
        }
    }

    /// The direct children of this node in source order. Tokens have none.
    pub fn children(&self) -> Vec<SyntaxNodeRef<'a>> {
        use SyntaxNodeRef::{ElseClause, Expression, Statement, Token};

        match *self {
            SyntaxNodeRef::Token(_) => Vec::new(),
            SyntaxNodeRef::CompilationUnit(unit) => {
                vec![Statement(&unit.statement), Token(&unit.end_of_file_token)]
            }
            SyntaxNodeRef::ElseClause(clause) => {
                vec![Token(&clause.else_keyword), Statement(&clause.else_statement)]
            }
            SyntaxNodeRef::Statement(statement) => match statement {
                StatementSyntax::Block(block) => {
                    let mut children = Vec::with_capacity(block.statements.len() + 2);
                    children.push(Token(&block.open_brace_token));
                    children.extend(block.statements.iter().map(Statement));
                    children.push(Token(&block.close_brace_token));
                    children
                }
                StatementSyntax::VariableDeclaration(decl) => vec![
                    Token(&decl.keyword_token),
                    Token(&decl.identifier_token),
                    Token(&decl.equals_token),
                    Expression(&decl.initializer),
                ],
                StatementSyntax::If(stmt) => {
                    let mut children = vec![
                        Token(&stmt.if_keyword),
                        Expression(&stmt.condition),
                        Statement(&stmt.then_statement),
                    ];
                    if let Some(ref clause) = stmt.else_clause {
                        children.push(ElseClause(clause));
                    }
                    children
                }
                StatementSyntax::While(stmt) => vec![
                    Token(&stmt.while_keyword),
                    Expression(&stmt.condition),
                    Statement(&stmt.body),
                ],
                StatementSyntax::For(stmt) => vec![
                    Token(&stmt.for_keyword),
                    Token(&stmt.identifier_token),
                    Token(&stmt.equals_token),
                    Expression(&stmt.lower_bound),
                    Token(&stmt.to_keyword),
                    Expression(&stmt.upper_bound),
                    Statement(&stmt.body),
                ],
                StatementSyntax::Expression(stmt) => vec![Expression(&stmt.expression)],
            },
            SyntaxNodeRef::Expression(expression) => match expression {
                ExpressionSyntax::Literal(expr) => vec![Token(&expr.literal_token)],
                ExpressionSyntax::Name(expr) => vec![Token(&expr.identifier_token)],
                ExpressionSyntax::Assignment(expr) => vec![
                    Token(&expr.identifier_token),
                    Token(&expr.equals_token),
                    Expression(&expr.expression),
                ],
                ExpressionSyntax::Unary(expr) => {
                    vec![Token(&expr.operator_token), Expression(&expr.operand)]
                }
                ExpressionSyntax::Binary(expr) => vec![
                    Expression(&expr.left),
                    Token(&expr.operator_token),
                    Expression(&expr.right),
                ],
                ExpressionSyntax::Parenthesized(expr) => vec![
                    Token(&expr.open_paren_token),
                    Expression(&expr.expression),
                    Token(&expr.close_paren_token),
                ],
            },
        }
    }

    /// The span from the start of the first child to the end of the last.
    pub fn span(&self) -> TextSpan {
        if let SyntaxNodeRef::Token(token) = self {
            return token.span();
        }
        let children = self.children();
        match (children.first(), children.last()) {
            (Some(first), Some(last)) => first.span().union(&last.span()),
            _ => TextSpan::default(),
        }
    }
}

impl<'a> From<&'a SyntaxToken> for SyntaxNodeRef<'a> {
    fn from(token: &'a SyntaxToken) -> Self {
        SyntaxNodeRef::Token(token)
    }
}

impl<'a> From<&'a CompilationUnitSyntax> for SyntaxNodeRef<'a> {
    fn from(unit: &'a CompilationUnitSyntax) -> Self {
        SyntaxNodeRef::CompilationUnit(unit)
    }
}

impl<'a> From<&'a StatementSyntax> for SyntaxNodeRef<'a> {
    fn from(statement: &'a StatementSyntax) -> Self {
        SyntaxNodeRef::Statement(statement)
    }
}

impl<'a> From<&'a ExpressionSyntax> for SyntaxNodeRef<'a> {
    fn from(expression: &'a ExpressionSyntax) -> Self {
        SyntaxNodeRef::Expression(expression)
    }
}
