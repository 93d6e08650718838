//! lumen_printer: Tree dumps for inspection.
//!
//! Renders syntax trees and bound programs as indented trees, one node per
//! line, with box-drawing guides:
//!
//! ```text
//! CompilationUnit
//! ├── ExpressionStatement
//! │   └── BinaryExpression
//! │       ├── LiteralExpression
//! │       │   └── NumericLiteral 1
//! ...
//! ```

use lumen_ast::{SyntaxNodeRef, SyntaxToken};
use lumen_binder::bound::*;

/// A node that can be rendered as one line of a tree dump.
trait TreeNode: Sized {
    fn label(&self) -> String;
    fn children(&self) -> Vec<Self>;
}

/// Options for the printer.
#[derive(Debug, Clone)]
pub struct PrinterOptions {
    /// Newline string.
    pub new_line: String,
    /// Whether to emit a trailing newline.
    pub trailing_newline: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            new_line: "\n".to_string(),
            trailing_newline: true,
        }
    }
}

/// Writes tree dumps into an owned buffer.
pub struct TreePrinter {
    output: String,
    options: PrinterOptions,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self::with_options(PrinterOptions::default())
    }

    pub fn with_options(options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(1024),
            options,
        }
    }

    /// Dump a syntax node and everything below it.
    pub fn print_syntax<'a>(&mut self, node: impl Into<SyntaxNodeRef<'a>>) -> String {
        self.print(node.into())
    }

    /// Dump a bound statement and everything below it.
    pub fn print_bound(&mut self, statement: &BoundStatement) -> String {
        self.print(BoundNodeRef::Statement(statement))
    }

    /// Dump a lowered program: the block's statements at the top level.
    pub fn print_program(&mut self, program: &BoundBlockStatement) -> String {
        self.output.clear();
        for statement in &program.statements {
            self.write_node(BoundNodeRef::Statement(statement), "", None);
        }
        self.finish()
    }

    fn print<N: TreeNode>(&mut self, root: N) -> String {
        self.output.clear();
        self.write_node(root, "", None);
        self.finish()
    }

    /// `is_last` is `None` for a root, which is written without a guide.
    fn write_node<N: TreeNode>(&mut self, node: N, indent: &str, is_last: Option<bool>) {
        if !self.output.is_empty() {
            self.output.push_str(&self.options.new_line);
        }

        let child_indent = match is_last {
            None => String::new(),
            Some(is_last) => {
                let (marker, continuation) = if is_last {
                    ("└── ", "    ")
                } else {
                    ("├── ", "│   ")
                };
                self.output.push_str(indent);
                self.output.push_str(marker);
                format!("{}{}", indent, continuation)
            }
        };
        self.output.push_str(&node.label());

        let children = node.children();
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            self.write_node(child, &child_indent, Some(i + 1 == count));
        }
    }

    fn finish(&mut self) -> String {
        if self.options.trailing_newline && !self.output.is_empty() {
            self.output.push_str(&self.options.new_line);
        }
        std::mem::take(&mut self.output)
    }
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Syntax nodes
// ============================================================================

impl TreeNode for SyntaxNodeRef<'_> {
    fn label(&self) -> String {
        match self.as_token() {
            Some(token) => token_label(token),
            None => self.kind().to_string(),
        }
    }

    fn children(&self) -> Vec<Self> {
        SyntaxNodeRef::children(self)
    }
}

fn token_label(token: &SyntaxToken) -> String {
    match token.value {
        Some(value) => format!("{} {}", token.kind, value),
        None if token.is_missing() => format!("{} (missing)", token.kind),
        None => token.kind.to_string(),
    }
}

// ============================================================================
// Bound nodes
// ============================================================================

impl TreeNode for BoundNodeRef<'_> {
    fn label(&self) -> String {
        let properties = match *self {
            BoundNodeRef::Statement(statement) => match statement {
                BoundStatement::VariableDeclaration(node) => format!("{:?}", node.variable),
                BoundStatement::Goto(node) => format!("Label: {}", node.label),
                BoundStatement::ConditionalGoto(node) => {
                    format!("Label: {}, JumpIfFalse: {}", node.label, node.jump_if_false)
                }
                BoundStatement::Label(node) => format!("Label: {}", node.label),
                BoundStatement::Block(_)
                | BoundStatement::Expression(_)
                | BoundStatement::If(_)
                | BoundStatement::While(_) => String::new(),
                BoundStatement::For(node) => format!("{:?}", node.variable),
            },
            BoundNodeRef::Expression(expression) => match expression {
                BoundExpression::Literal(node) => format!("Value: {}, Type: {}", node.value, expression.ty()),
                BoundExpression::Variable(node) => format!("Variable: {}, Type: {}", node.variable, expression.ty()),
                BoundExpression::Assignment(node) => {
                    format!("Variable: {}, Type: {}", node.variable, expression.ty())
                }
                BoundExpression::Unary(node) => format!("Op: {:?}, Type: {}", node.op.kind, expression.ty()),
                BoundExpression::Binary(node) => format!("Op: {:?}, Type: {}", node.op.kind, expression.ty()),
            },
        };

        if properties.is_empty() {
            self.kind().to_string()
        } else {
            format!("{} {}", self.kind(), properties)
        }
    }

    fn children(&self) -> Vec<Self> {
        BoundNodeRef::children(self)
    }
}
