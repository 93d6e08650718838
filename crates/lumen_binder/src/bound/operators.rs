//! Operator resolution tables.
//!
//! An operator is resolved from its syntax token and the static types of its
//! operands. Only exact type matches resolve; there are no implicit
//! conversions.

use crate::symbol::TypeSymbol;
use lumen_ast::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundUnaryOperatorKind {
    Identity,
    Negation,
    LogicalNegation,
    OnesComplement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundBinaryOperatorKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LogicalAnd,
    LogicalOr,
    Equals,
    NotEquals,
    Less,
    LessOrEquals,
    Greater,
    GreaterOrEquals,
}

/// A resolved unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundUnaryOperator {
    pub syntax_kind: SyntaxKind,
    pub kind: BoundUnaryOperatorKind,
    pub operand_type: TypeSymbol,
    pub result_type: TypeSymbol,
}

impl BoundUnaryOperator {
    const fn new(syntax_kind: SyntaxKind, kind: BoundUnaryOperatorKind, operand_type: TypeSymbol) -> Self {
        Self {
            syntax_kind,
            kind,
            operand_type,
            result_type: operand_type,
        }
    }

    /// Resolve the operator for `syntax_kind` applied to an operand of `operand_type`.
    pub fn bind(syntax_kind: SyntaxKind, operand_type: TypeSymbol) -> Option<Self> {
        UNARY_OPERATORS
            .iter()
            .find(|op| op.syntax_kind == syntax_kind && op.operand_type == operand_type)
            .copied()
    }
}

/// A resolved binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundBinaryOperator {
    pub syntax_kind: SyntaxKind,
    pub kind: BoundBinaryOperatorKind,
    pub left_type: TypeSymbol,
    pub right_type: TypeSymbol,
    pub result_type: TypeSymbol,
}

impl BoundBinaryOperator {
    const fn new(
        syntax_kind: SyntaxKind,
        kind: BoundBinaryOperatorKind,
        operand_type: TypeSymbol,
        result_type: TypeSymbol,
    ) -> Self {
        Self {
            syntax_kind,
            kind,
            left_type: operand_type,
            right_type: operand_type,
            result_type,
        }
    }

    /// Resolve the operator for `syntax_kind` applied to operands of the given types.
    pub fn bind(syntax_kind: SyntaxKind, left_type: TypeSymbol, right_type: TypeSymbol) -> Option<Self> {
        BINARY_OPERATORS
            .iter()
            .find(|op| {
                op.syntax_kind == syntax_kind && op.left_type == left_type && op.right_type == right_type
            })
            .copied()
    }

    // ========================================================================
    // Operators the lowerer synthesizes for `for` loops
    // ========================================================================

    pub const INT_ADDITION: BoundBinaryOperator = BoundBinaryOperator::new(
        SyntaxKind::PlusToken,
        BoundBinaryOperatorKind::Addition,
        TypeSymbol::Int,
        TypeSymbol::Int,
    );

    pub const INT_LESS_OR_EQUALS: BoundBinaryOperator = BoundBinaryOperator::new(
        SyntaxKind::LessThanEqualsToken,
        BoundBinaryOperatorKind::LessOrEquals,
        TypeSymbol::Int,
        TypeSymbol::Bool,
    );
}

use BoundBinaryOperatorKind as B;
use BoundUnaryOperatorKind as U;
use SyntaxKind as S;
use TypeSymbol::{Bool, Int};

static UNARY_OPERATORS: [BoundUnaryOperator; 4] = [
    BoundUnaryOperator::new(S::PlusToken, U::Identity, Int),
    BoundUnaryOperator::new(S::MinusToken, U::Negation, Int),
    BoundUnaryOperator::new(S::TildeToken, U::OnesComplement, Int),
    BoundUnaryOperator::new(S::ExclamationToken, U::LogicalNegation, Bool),
];

static BINARY_OPERATORS: [BoundBinaryOperator; 20] = [
    BoundBinaryOperator::INT_ADDITION,
    BoundBinaryOperator::new(S::MinusToken, B::Subtraction, Int, Int),
    BoundBinaryOperator::new(S::AsteriskToken, B::Multiplication, Int, Int),
    BoundBinaryOperator::new(S::SlashToken, B::Division, Int, Int),
    BoundBinaryOperator::new(S::AmpersandToken, B::BitwiseAnd, Int, Int),
    BoundBinaryOperator::new(S::BarToken, B::BitwiseOr, Int, Int),
    BoundBinaryOperator::new(S::CaretToken, B::BitwiseXor, Int, Int),
    BoundBinaryOperator::new(S::EqualsEqualsToken, B::Equals, Int, Bool),
    BoundBinaryOperator::new(S::ExclamationEqualsToken, B::NotEquals, Int, Bool),
    BoundBinaryOperator::new(S::LessThanToken, B::Less, Int, Bool),
    BoundBinaryOperator::INT_LESS_OR_EQUALS,
    BoundBinaryOperator::new(S::GreaterThanToken, B::Greater, Int, Bool),
    BoundBinaryOperator::new(S::GreaterThanEqualsToken, B::GreaterOrEquals, Int, Bool),
    BoundBinaryOperator::new(S::AmpersandToken, B::BitwiseAnd, Bool, Bool),
    BoundBinaryOperator::new(S::AmpersandAmpersandToken, B::LogicalAnd, Bool, Bool),
    BoundBinaryOperator::new(S::BarToken, B::BitwiseOr, Bool, Bool),
    BoundBinaryOperator::new(S::BarBarToken, B::LogicalOr, Bool, Bool),
    BoundBinaryOperator::new(S::CaretToken, B::BitwiseXor, Bool, Bool),
    BoundBinaryOperator::new(S::EqualsEqualsToken, B::Equals, Bool, Bool),
    BoundBinaryOperator::new(S::ExclamationEqualsToken, B::NotEquals, Bool, Bool),
];
