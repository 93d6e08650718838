//! The binder implementation.
//!
//! Walks the syntax tree and produces the bound tree. Handles:
//! - Scope management (one scope per block, plus one per `for` loop)
//! - Name resolution via the scope chain
//! - Operator resolution by operand type
//! - Type checks for assignments and conditions
//!
//! On every user error the binder reports a diagnostic and substitutes a
//! best-effort node, so one pass surfaces all independent errors.

use crate::bound::*;
use crate::scope::{BoundGlobalScope, BoundScope};
use crate::symbol::{TypeSymbol, VariableSymbol};
use lumen_ast::*;
use lumen_core::Value;
use lumen_diagnostics::DiagnosticCollection;
use std::sync::Arc;

/// Binds the syntax tree of one submission.
pub struct Binder {
    /// The current scope. Always `Some` outside of scope transitions.
    current_scope: Option<Box<BoundScope>>,
    diagnostics: DiagnosticCollection,
    /// Nesting depth below the submission's global scope.
    scope_depth: u32,
}

impl Binder {
    /// Create a binder whose global scope is a child of `parent`.
    pub fn new(parent: Option<Box<BoundScope>>) -> Self {
        Self {
            current_scope: Some(Box::new(BoundScope::new(parent))),
            diagnostics: DiagnosticCollection::new(),
            scope_depth: 0,
        }
    }

    /// Bind a whole submission.
    ///
    /// Variables declared by `previous` and its predecessors are visible as
    /// outer scopes, newest innermost.
    pub fn bind_global_scope(
        previous: Option<Arc<BoundGlobalScope>>,
        syntax: &CompilationUnitSyntax,
    ) -> BoundGlobalScope {
        let parent = create_parent_scopes(previous.as_deref());
        let mut binder = Binder::new(parent);
        let statement = binder.bind_statement(&syntax.statement);
        let variables = binder.declared_variables();
        let diagnostics = binder.take_diagnostics().into_diagnostics();

        tracing::debug!(
            variables = variables.len(),
            diagnostics = diagnostics.len(),
            "bound global scope"
        );

        BoundGlobalScope {
            previous,
            diagnostics,
            variables,
            statement,
        }
    }

    /// Take diagnostics from the binder.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    /// Variables declared directly in the current scope.
    pub fn declared_variables(&self) -> Vec<VariableSymbol> {
        self.current_scope
            .as_ref()
            .map(|scope| scope.declared_variables())
            .unwrap_or_default()
    }

    pub fn scope_depth(&self) -> u32 {
        self.scope_depth
    }

    // ========================================================================
    // Scopes
    // ========================================================================

    fn push_block_scope(&mut self) {
        let parent = self.current_scope.take();
        self.current_scope = Some(Box::new(BoundScope::new(parent)));
        self.scope_depth += 1;
    }

    fn pop_scope(&mut self) {
        if let Some(scope) = self.current_scope.take() {
            self.current_scope = scope.into_parent();
            self.scope_depth = self.scope_depth.saturating_sub(1);
        }
    }

    fn lookup(&self, name: &str) -> Option<VariableSymbol> {
        self.current_scope.as_ref()?.lookup(name).cloned()
    }

    /// Declare a variable in the current scope.
    ///
    /// On a collision the existing binding stays in scope and the returned
    /// symbol is detached from any scope.
    fn declare_variable(&mut self, identifier: &SyntaxToken, ty: TypeSymbol, is_read_only: bool) -> VariableSymbol {
        let name = identifier.text.as_str();
        // A fabricated identifier was already reported by the parser.
        if identifier.is_missing() {
            return VariableSymbol::new(name, ty, is_read_only);
        }
        let declared = match self.current_scope.as_mut() {
            Some(scope) => scope.declare(name, ty, is_read_only),
            None => Ok(VariableSymbol::new(name, ty, is_read_only)),
        };
        match declared {
            Ok(variable) => variable,
            Err(err) => {
                tracing::trace!(%err, "redeclaration");
                self.diagnostics
                    .report_variable_already_declared(identifier.span(), name);
                VariableSymbol::new(name, ty, is_read_only)
            }
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub fn bind_statement(&mut self, syntax: &StatementSyntax) -> BoundStatement {
        match syntax {
            StatementSyntax::Block(block) => self.bind_block_statement(block),
            StatementSyntax::VariableDeclaration(decl) => self.bind_variable_declaration(decl),
            StatementSyntax::If(stmt) => self.bind_if_statement(stmt),
            StatementSyntax::While(stmt) => self.bind_while_statement(stmt),
            StatementSyntax::For(stmt) => self.bind_for_statement(stmt),
            StatementSyntax::Expression(stmt) => {
                BoundStatement::expression(self.bind_expression(&stmt.expression))
            }
        }
    }

    fn bind_block_statement(&mut self, syntax: &BlockStatementSyntax) -> BoundStatement {
        self.push_block_scope();
        let statements = syntax
            .statements
            .iter()
            .map(|statement| self.bind_statement(statement))
            .collect();
        self.pop_scope();
        BoundStatement::block(statements)
    }

    fn bind_variable_declaration(&mut self, syntax: &VariableDeclarationSyntax) -> BoundStatement {
        let initializer = self.bind_expression(&syntax.initializer);
        let variable = self.declare_variable(
            &syntax.identifier_token,
            initializer.ty(),
            syntax.is_read_only(),
        );
        BoundStatement::variable_declaration(variable, initializer)
    }

    fn bind_if_statement(&mut self, syntax: &IfStatementSyntax) -> BoundStatement {
        let condition = self.bind_expression_of_type(&syntax.condition, TypeSymbol::Bool);
        let then_statement = self.bind_statement(&syntax.then_statement);
        let else_statement = syntax
            .else_clause
            .as_ref()
            .map(|clause| Box::new(self.bind_statement(&clause.else_statement)));
        BoundStatement::If(BoundIfStatement {
            condition,
            then_statement: Box::new(then_statement),
            else_statement,
        })
    }

    fn bind_while_statement(&mut self, syntax: &WhileStatementSyntax) -> BoundStatement {
        let condition = self.bind_expression_of_type(&syntax.condition, TypeSymbol::Bool);
        let body = self.bind_statement(&syntax.body);
        BoundStatement::while_loop(condition, body)
    }

    fn bind_for_statement(&mut self, syntax: &ForStatementSyntax) -> BoundStatement {
        let lower_bound = self.bind_expression_of_type(&syntax.lower_bound, TypeSymbol::Int);
        let upper_bound = self.bind_expression_of_type(&syntax.upper_bound, TypeSymbol::Int);

        self.push_block_scope();
        let variable = self.declare_variable(&syntax.identifier_token, TypeSymbol::Int, false);
        let body = self.bind_statement(&syntax.body);
        self.pop_scope();

        BoundStatement::For(BoundForStatement {
            variable,
            lower_bound,
            upper_bound,
            body: Box::new(body),
        })
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Bind an expression and report it when its type is not `target`.
    ///
    /// The bound expression is returned unchanged either way.
    fn bind_expression_of_type(&mut self, syntax: &ExpressionSyntax, target: TypeSymbol) -> BoundExpression {
        let result = self.bind_expression(syntax);
        if result.ty() != target {
            self.diagnostics
                .report_cannot_convert(syntax.span(), result.ty().name(), target.name());
        }
        result
    }

    pub fn bind_expression(&mut self, syntax: &ExpressionSyntax) -> BoundExpression {
        match syntax {
            ExpressionSyntax::Literal(expr) => {
                BoundExpression::literal(expr.value().unwrap_or(Value::Int(0)))
            }
            ExpressionSyntax::Name(expr) => self.bind_name_expression(expr),
            ExpressionSyntax::Assignment(expr) => self.bind_assignment_expression(expr),
            ExpressionSyntax::Unary(expr) => self.bind_unary_expression(expr),
            ExpressionSyntax::Binary(expr) => self.bind_binary_expression(expr),
            ExpressionSyntax::Parenthesized(expr) => self.bind_expression(&expr.expression),
        }
    }

    fn bind_name_expression(&mut self, syntax: &NameExpressionSyntax) -> BoundExpression {
        let token = &syntax.identifier_token;
        // A fabricated identifier was already reported by the parser.
        if token.is_missing() {
            return BoundExpression::literal(0);
        }
        match self.lookup(&token.text) {
            Some(variable) => BoundExpression::variable(variable),
            None => {
                self.diagnostics.report_undefined_name(token.span(), &token.text);
                BoundExpression::literal(0)
            }
        }
    }

    fn bind_assignment_expression(&mut self, syntax: &AssignmentExpressionSyntax) -> BoundExpression {
        let expression = self.bind_expression(&syntax.expression);
        let name = syntax.identifier_token.text.as_str();

        let Some(variable) = self.lookup(name) else {
            self.diagnostics
                .report_undefined_name(syntax.identifier_token.span(), name);
            return expression;
        };

        if variable.is_read_only() {
            self.diagnostics
                .report_cannot_assign(syntax.equals_token.span(), name);
        }

        if expression.ty() != variable.ty() {
            self.diagnostics.report_cannot_convert(
                syntax.expression.span(),
                expression.ty().name(),
                variable.ty().name(),
            );
            return expression;
        }

        BoundExpression::assignment(variable, expression)
    }

    fn bind_unary_expression(&mut self, syntax: &UnaryExpressionSyntax) -> BoundExpression {
        let operand = self.bind_expression(&syntax.operand);
        let operator_token = &syntax.operator_token;
        match BoundUnaryOperator::bind(operator_token.kind, operand.ty()) {
            Some(op) => BoundExpression::unary(op, operand),
            None => {
                self.diagnostics.report_undefined_unary_operator(
                    operator_token.span(),
                    &operator_token.text,
                    operand.ty().name(),
                );
                operand
            }
        }
    }

    fn bind_binary_expression(&mut self, syntax: &BinaryExpressionSyntax) -> BoundExpression {
        let left = self.bind_expression(&syntax.left);
        let right = self.bind_expression(&syntax.right);
        let operator_token = &syntax.operator_token;
        match BoundBinaryOperator::bind(operator_token.kind, left.ty(), right.ty()) {
            Some(op) => BoundExpression::binary(left, op, right),
            None => {
                self.diagnostics.report_undefined_binary_operator(
                    operator_token.span(),
                    &operator_token.text,
                    left.ty().name(),
                    right.ty().name(),
                );
                left
            }
        }
    }
}

/// Rebuild the chain of global scopes from earlier submissions.
///
/// The oldest submission ends up outermost.
fn create_parent_scopes(previous: Option<&BoundGlobalScope>) -> Option<Box<BoundScope>> {
    let mut stack = Vec::new();
    let mut current = previous;
    while let Some(global) = current {
        stack.push(global);
        current = global.previous.as_deref();
    }

    let mut parent: Option<Box<BoundScope>> = None;
    while let Some(global) = stack.pop() {
        let mut scope = BoundScope::new(parent);
        for variable in &global.variables {
            // Names are unique within one submission's global scope.
            let _ = scope.declare_symbol(variable.clone());
        }
        parent = Some(Box::new(scope));
    }
    parent
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_token(text: &str, position: u32) -> SyntaxToken {
        SyntaxToken::new(SyntaxKind::Identifier, position, text, None)
    }

    #[test]
    fn test_block_scopes_are_popped() {
        let mut binder = Binder::new(None);
        binder.push_block_scope();
        binder.push_block_scope();
        assert_eq!(binder.scope_depth(), 2);
        binder.pop_scope();
        binder.pop_scope();
        assert_eq!(binder.scope_depth(), 0);
        assert!(binder.current_scope.is_some());
    }

    #[test]
    fn test_declare_variable_reports_collision_once() {
        let mut binder = Binder::new(None);
        let first = binder.declare_variable(&name_token("a", 0), TypeSymbol::Int, false);
        let second = binder.declare_variable(&name_token("a", 10), TypeSymbol::Bool, false);
        assert_ne!(first, second);
        assert_eq!(binder.lookup("a"), Some(first));

        let diagnostics = binder.take_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.diagnostics()[0].span.start, 10);
    }

    #[test]
    fn test_parent_scopes_are_chained_oldest_first() {
        let x1 = VariableSymbol::new("x", TypeSymbol::Int, false);
        let first = Arc::new(BoundGlobalScope {
            previous: None,
            diagnostics: Vec::new(),
            variables: vec![x1],
            statement: BoundStatement::block(Vec::new()),
        });
        let x2 = VariableSymbol::new("x", TypeSymbol::Bool, false);
        let second = BoundGlobalScope {
            previous: Some(first),
            diagnostics: Vec::new(),
            variables: vec![x2.clone()],
            statement: BoundStatement::block(Vec::new()),
        };

        let scope = create_parent_scopes(Some(&second)).unwrap();
        assert_eq!(scope.lookup("x"), Some(&x2));
        assert!(scope.parent().is_some());
    }
}
