//! SyntaxKind enum - all token and node kinds in the lumen syntax tree.

/// The kind of a syntax token or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Tokens
    // ========================================================================
    Unknown = 0,
    EndOfFileToken = 1,
    WhitespaceTrivia = 2,

    // Literals
    NumericLiteral = 3,
    Identifier = 4,

    // Punctuation
    OpenParenToken = 5,
    CloseParenToken = 6,
    OpenBraceToken = 7,
    CloseBraceToken = 8,
    PlusToken = 9,
    MinusToken = 10,
    AsteriskToken = 11,
    SlashToken = 12,
    ExclamationToken = 13,
    TildeToken = 14,
    CaretToken = 15,
    AmpersandToken = 16,
    AmpersandAmpersandToken = 17,
    BarToken = 18,
    BarBarToken = 19,
    EqualsToken = 20,
    EqualsEqualsToken = 21,
    ExclamationEqualsToken = 22,
    LessThanToken = 23,
    LessThanEqualsToken = 24,
    GreaterThanToken = 25,
    GreaterThanEqualsToken = 26,

    // ========================================================================
    // Keywords
    // ========================================================================
    ElseKeyword = 27,
    FalseKeyword = 28,
    ForKeyword = 29,
    IfKeyword = 30,
    LetKeyword = 31,
    ToKeyword = 32,
    TrueKeyword = 33,
    VarKeyword = 34,
    WhileKeyword = 35,

    // ========================================================================
    // Nodes
    // ========================================================================
    CompilationUnit = 36,
    ElseClause = 37,

    // Statements
    BlockStatement = 38,
    VariableDeclaration = 39,
    IfStatement = 40,
    WhileStatement = 41,
    ForStatement = 42,
    ExpressionStatement = 43,

    // Expressions
    LiteralExpression = 44,
    NameExpression = 45,
    UnaryExpression = 46,
    BinaryExpression = 47,
    ParenthesizedExpression = 48,
    AssignmentExpression = 49,
}

impl SyntaxKind {
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenParenToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::GreaterThanEqualsToken;
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::ElseKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::WhileKeyword;
    pub const FIRST_TOKEN: SyntaxKind = SyntaxKind::Unknown;
    pub const LAST_TOKEN: SyntaxKind = SyntaxKind::WhileKeyword;
    pub const FIRST_STATEMENT: SyntaxKind = SyntaxKind::BlockStatement;
    pub const LAST_STATEMENT: SyntaxKind = SyntaxKind::ExpressionStatement;
    pub const FIRST_EXPRESSION: SyntaxKind = SyntaxKind::LiteralExpression;
    pub const LAST_EXPRESSION: SyntaxKind = SyntaxKind::AssignmentExpression;
}

impl SyntaxKind {
    #[inline]
    fn in_range(self, first: SyntaxKind, last: SyntaxKind) -> bool {
        let v = self as u16;
        v >= first as u16 && v <= last as u16
    }

    #[inline]
    pub fn is_token(self) -> bool {
        self.in_range(Self::FIRST_TOKEN, Self::LAST_TOKEN)
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        self.in_range(Self::FIRST_KEYWORD, Self::LAST_KEYWORD)
    }

    #[inline]
    pub fn is_punctuation(self) -> bool {
        self.in_range(Self::FIRST_PUNCTUATION, Self::LAST_PUNCTUATION)
    }

    #[inline]
    pub fn is_statement(self) -> bool {
        self.in_range(Self::FIRST_STATEMENT, Self::LAST_STATEMENT)
    }

    #[inline]
    pub fn is_expression(self) -> bool {
        self.in_range(Self::FIRST_EXPRESSION, Self::LAST_EXPRESSION)
    }

    /// Get the text of a keyword token.
    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::ElseKeyword => Some("else"),
            SyntaxKind::FalseKeyword => Some("false"),
            SyntaxKind::ForKeyword => Some("for"),
            SyntaxKind::IfKeyword => Some("if"),
            SyntaxKind::LetKeyword => Some("let"),
            SyntaxKind::ToKeyword => Some("to"),
            SyntaxKind::TrueKeyword => Some("true"),
            SyntaxKind::VarKeyword => Some("var"),
            SyntaxKind::WhileKeyword => Some("while"),
            _ => None,
        }
    }

    /// Look up a keyword by its text.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        match text {
            "else" => Some(SyntaxKind::ElseKeyword),
            "false" => Some(SyntaxKind::FalseKeyword),
            "for" => Some(SyntaxKind::ForKeyword),
            "if" => Some(SyntaxKind::IfKeyword),
            "let" => Some(SyntaxKind::LetKeyword),
            "to" => Some(SyntaxKind::ToKeyword),
            "true" => Some(SyntaxKind::TrueKeyword),
            "var" => Some(SyntaxKind::VarKeyword),
            "while" => Some(SyntaxKind::WhileKeyword),
            _ => None,
        }
    }

    /// Get the text of a punctuation token.
    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::OpenParenToken => Some("("),
            SyntaxKind::CloseParenToken => Some(")"),
            SyntaxKind::OpenBraceToken => Some("{"),
            SyntaxKind::CloseBraceToken => Some("}"),
            SyntaxKind::PlusToken => Some("+"),
            SyntaxKind::MinusToken => Some("-"),
            SyntaxKind::AsteriskToken => Some("*"),
            SyntaxKind::SlashToken => Some("/"),
            SyntaxKind::ExclamationToken => Some("!"),
            SyntaxKind::TildeToken => Some("~"),
            SyntaxKind::CaretToken => Some("^"),
            SyntaxKind::AmpersandToken => Some("&"),
            SyntaxKind::AmpersandAmpersandToken => Some("&&"),
            SyntaxKind::BarToken => Some("|"),
            SyntaxKind::BarBarToken => Some("||"),
            SyntaxKind::EqualsToken => Some("="),
            SyntaxKind::EqualsEqualsToken => Some("=="),
            SyntaxKind::ExclamationEqualsToken => Some("!="),
            SyntaxKind::LessThanToken => Some("<"),
            SyntaxKind::LessThanEqualsToken => Some("<="),
            SyntaxKind::GreaterThanToken => Some(">"),
            SyntaxKind::GreaterThanEqualsToken => Some(">="),
            _ => None,
        }
    }

    /// The fixed source text of this kind, if it has one.
    pub fn text(self) -> Option<&'static str> {
        self.punctuation_text().or_else(|| self.keyword_text())
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
