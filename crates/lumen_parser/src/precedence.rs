//! Operator precedence for binary and unary operators.

use lumen_ast::syntax_kind::SyntaxKind;

/// Operator precedence levels, from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Lowest = 0,
    /// `|`, `||` and `^`
    LogicalOr = 1,
    /// `&` and `&&`
    LogicalAnd = 2,
    Equality = 3,
    Additive = 4,
    Multiplicative = 5,
    Unary = 6,
    Invalid = 255,
}

/// Get the binary operator precedence for a given token kind.
pub fn get_binary_operator_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    match kind {
        SyntaxKind::BarToken | SyntaxKind::BarBarToken | SyntaxKind::CaretToken => {
            OperatorPrecedence::LogicalOr
        }
        SyntaxKind::AmpersandToken | SyntaxKind::AmpersandAmpersandToken => {
            OperatorPrecedence::LogicalAnd
        }
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::LessThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::GreaterThanEqualsToken => OperatorPrecedence::Equality,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => OperatorPrecedence::Additive,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken => OperatorPrecedence::Multiplicative,
        _ => OperatorPrecedence::Invalid,
    }
}

/// Get the unary operator precedence for a given token kind.
pub fn get_unary_operator_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    match kind {
        SyntaxKind::PlusToken
        | SyntaxKind::MinusToken
        | SyntaxKind::ExclamationToken
        | SyntaxKind::TildeToken => OperatorPrecedence::Unary,
        _ => OperatorPrecedence::Invalid,
    }
}
