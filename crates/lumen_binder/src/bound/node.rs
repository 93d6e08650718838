//! Bound tree node definitions.

use super::operators::{BoundBinaryOperator, BoundUnaryOperator};
use crate::symbol::{LabelSymbol, TypeSymbol, VariableSymbol};
use lumen_core::Value;
use std::fmt;

/// The kind of a bound node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundNodeKind {
    // Statements
    BlockStatement,
    VariableDeclaration,
    ExpressionStatement,
    IfStatement,
    WhileStatement,
    ForStatement,
    GotoStatement,
    ConditionalGotoStatement,
    LabelStatement,

    // Expressions
    LiteralExpression,
    VariableExpression,
    AssignmentExpression,
    UnaryExpression,
    BinaryExpression,
}

impl fmt::Display for BoundNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct BoundLiteralExpression {
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundVariableExpression {
    pub variable: VariableSymbol,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundAssignmentExpression {
    pub variable: VariableSymbol,
    pub expression: Box<BoundExpression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundUnaryExpression {
    pub op: BoundUnaryOperator,
    pub operand: Box<BoundExpression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundBinaryExpression {
    pub left: Box<BoundExpression>,
    pub op: BoundBinaryOperator,
    pub right: Box<BoundExpression>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoundExpression {
    Literal(BoundLiteralExpression),
    Variable(BoundVariableExpression),
    Assignment(BoundAssignmentExpression),
    Unary(BoundUnaryExpression),
    Binary(BoundBinaryExpression),
}

impl BoundExpression {
    pub fn literal(value: impl Into<Value>) -> Self {
        BoundExpression::Literal(BoundLiteralExpression { value: value.into() })
    }

    pub fn variable(variable: VariableSymbol) -> Self {
        BoundExpression::Variable(BoundVariableExpression { variable })
    }

    pub fn assignment(variable: VariableSymbol, expression: BoundExpression) -> Self {
        BoundExpression::Assignment(BoundAssignmentExpression {
            variable,
            expression: Box::new(expression),
        })
    }

    pub fn unary(op: BoundUnaryOperator, operand: BoundExpression) -> Self {
        BoundExpression::Unary(BoundUnaryExpression {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn binary(left: BoundExpression, op: BoundBinaryOperator, right: BoundExpression) -> Self {
        BoundExpression::Binary(BoundBinaryExpression {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    /// The static type, fixed at bind time.
    pub fn ty(&self) -> TypeSymbol {
        match self {
            BoundExpression::Literal(expr) => TypeSymbol::of(&expr.value),
            BoundExpression::Variable(expr) => expr.variable.ty(),
            BoundExpression::Assignment(expr) => expr.expression.ty(),
            BoundExpression::Unary(expr) => expr.op.result_type,
            BoundExpression::Binary(expr) => expr.op.result_type,
        }
    }

    pub fn kind(&self) -> BoundNodeKind {
        match self {
            BoundExpression::Literal(_) => BoundNodeKind::LiteralExpression,
            BoundExpression::Variable(_) => BoundNodeKind::VariableExpression,
            BoundExpression::Assignment(_) => BoundNodeKind::AssignmentExpression,
            BoundExpression::Unary(_) => BoundNodeKind::UnaryExpression,
            BoundExpression::Binary(_) => BoundNodeKind::BinaryExpression,
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundBlockStatement {
    pub statements: Vec<BoundStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundVariableDeclaration {
    pub variable: VariableSymbol,
    pub initializer: BoundExpression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundExpressionStatement {
    pub expression: BoundExpression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundIfStatement {
    pub condition: BoundExpression,
    pub then_statement: Box<BoundStatement>,
    pub else_statement: Option<Box<BoundStatement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundWhileStatement {
    pub condition: BoundExpression,
    pub body: Box<BoundStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundForStatement {
    pub variable: VariableSymbol,
    pub lower_bound: BoundExpression,
    pub upper_bound: BoundExpression,
    pub body: Box<BoundStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundGotoStatement {
    pub label: LabelSymbol,
}

/// Jump to `label` when `condition` evaluates to `!jump_if_false`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundConditionalGotoStatement {
    pub label: LabelSymbol,
    pub condition: BoundExpression,
    pub jump_if_false: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundLabelStatement {
    pub label: LabelSymbol,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoundStatement {
    Block(BoundBlockStatement),
    VariableDeclaration(BoundVariableDeclaration),
    Expression(BoundExpressionStatement),
    If(BoundIfStatement),
    While(BoundWhileStatement),
    For(BoundForStatement),
    Goto(BoundGotoStatement),
    ConditionalGoto(BoundConditionalGotoStatement),
    Label(BoundLabelStatement),
}

impl BoundStatement {
    pub fn block(statements: Vec<BoundStatement>) -> Self {
        BoundStatement::Block(BoundBlockStatement { statements })
    }

    pub fn variable_declaration(variable: VariableSymbol, initializer: BoundExpression) -> Self {
        BoundStatement::VariableDeclaration(BoundVariableDeclaration {
            variable,
            initializer,
        })
    }

    pub fn expression(expression: BoundExpression) -> Self {
        BoundStatement::Expression(BoundExpressionStatement { expression })
    }

    pub fn while_loop(condition: BoundExpression, body: BoundStatement) -> Self {
        BoundStatement::While(BoundWhileStatement {
            condition,
            body: Box::new(body),
        })
    }

    pub fn goto(label: LabelSymbol) -> Self {
        BoundStatement::Goto(BoundGotoStatement { label })
    }

    pub fn conditional_goto(label: LabelSymbol, condition: BoundExpression, jump_if_false: bool) -> Self {
        BoundStatement::ConditionalGoto(BoundConditionalGotoStatement {
            label,
            condition,
            jump_if_false,
        })
    }

    pub fn label(label: LabelSymbol) -> Self {
        BoundStatement::Label(BoundLabelStatement { label })
    }

    pub fn kind(&self) -> BoundNodeKind {
        match self {
            BoundStatement::Block(_) => BoundNodeKind::BlockStatement,
            BoundStatement::VariableDeclaration(_) => BoundNodeKind::VariableDeclaration,
            BoundStatement::Expression(_) => BoundNodeKind::ExpressionStatement,
            BoundStatement::If(_) => BoundNodeKind::IfStatement,
            BoundStatement::While(_) => BoundNodeKind::WhileStatement,
            BoundStatement::For(_) => BoundNodeKind::ForStatement,
            BoundStatement::Goto(_) => BoundNodeKind::GotoStatement,
            BoundStatement::ConditionalGoto(_) => BoundNodeKind::ConditionalGotoStatement,
            BoundStatement::Label(_) => BoundNodeKind::LabelStatement,
        }
    }
}

// ============================================================================
// Uniform traversal
// ============================================================================

/// A borrowed reference to any bound node.
#[derive(Debug, Clone, Copy)]
pub enum BoundNodeRef<'a> {
    Statement(&'a BoundStatement),
    Expression(&'a BoundExpression),
}

impl<'a> BoundNodeRef<'a> {
    pub fn kind(&self) -> BoundNodeKind {
        match self {
            BoundNodeRef::Statement(statement) => statement.kind(),
            BoundNodeRef::Expression(expression) => expression.kind(),
        }
    }

    /// The direct children of this node, in evaluation order.
    pub fn children(&self) -> Vec<BoundNodeRef<'a>> {
        use BoundNodeRef::{Expression, Statement};

        match *self {
            BoundNodeRef::Statement(statement) => match statement {
                BoundStatement::Block(block) => block.statements.iter().map(Statement).collect(),
                BoundStatement::VariableDeclaration(decl) => vec![Expression(&decl.initializer)],
                BoundStatement::Expression(stmt) => vec![Expression(&stmt.expression)],
                BoundStatement::If(stmt) => {
                    let mut children = vec![Expression(&stmt.condition), Statement(&stmt.then_statement)];
                    if let Some(ref else_statement) = stmt.else_statement {
                        children.push(Statement(else_statement));
                    }
                    children
                }
                BoundStatement::While(stmt) => {
                    vec![Expression(&stmt.condition), Statement(&stmt.body)]
                }
                BoundStatement::For(stmt) => vec![
                    Expression(&stmt.lower_bound),
                    Expression(&stmt.upper_bound),
                    Statement(&stmt.body),
                ],
                BoundStatement::ConditionalGoto(stmt) => vec![Expression(&stmt.condition)],
                BoundStatement::Goto(_) | BoundStatement::Label(_) => Vec::new(),
            },
            BoundNodeRef::Expression(expression) => match expression {
                BoundExpression::Literal(_) | BoundExpression::Variable(_) => Vec::new(),
                BoundExpression::Assignment(expr) => vec![Expression(&expr.expression)],
                BoundExpression::Unary(expr) => vec![Expression(&expr.operand)],
                BoundExpression::Binary(expr) => vec![Expression(&expr.left), Expression(&expr.right)],
            },
        }
    }
}

impl<'a> From<&'a BoundStatement> for BoundNodeRef<'a> {
    fn from(statement: &'a BoundStatement) -> Self {
        BoundNodeRef::Statement(statement)
    }
}

impl<'a> From<&'a BoundExpression> for BoundNodeRef<'a> {
    fn from(expression: &'a BoundExpression) -> Self {
        BoundNodeRef::Expression(expression)
    }
}
