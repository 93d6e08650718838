//! Generic bound tree rewriting.

use lumen_binder::bound::*;

/// A transformation over the bound tree.
///
/// Nodes are taken by value and returned rebuilt. Every hook defaults to
/// rewriting the node's children and reassembling it, so an implementor only
/// overrides the node kinds it changes.
pub trait BoundTreeRewriter {
    fn rewrite_statement(&mut self, node: BoundStatement) -> BoundStatement {
        match node {
            BoundStatement::Block(node) => self.rewrite_block_statement(node),
            BoundStatement::VariableDeclaration(node) => self.rewrite_variable_declaration(node),
            BoundStatement::Expression(node) => self.rewrite_expression_statement(node),
            BoundStatement::If(node) => self.rewrite_if_statement(node),
            BoundStatement::While(node) => self.rewrite_while_statement(node),
            BoundStatement::For(node) => self.rewrite_for_statement(node),
            BoundStatement::Goto(node) => self.rewrite_goto_statement(node),
            BoundStatement::ConditionalGoto(node) => self.rewrite_conditional_goto_statement(node),
            BoundStatement::Label(node) => self.rewrite_label_statement(node),
        }
    }

    fn rewrite_block_statement(&mut self, node: BoundBlockStatement) -> BoundStatement {
        let statements = node
            .statements
            .into_iter()
            .map(|statement| self.rewrite_statement(statement))
            .collect();
        BoundStatement::block(statements)
    }

    fn rewrite_variable_declaration(&mut self, node: BoundVariableDeclaration) -> BoundStatement {
        let initializer = self.rewrite_expression(node.initializer);
        BoundStatement::variable_declaration(node.variable, initializer)
    }

    fn rewrite_expression_statement(&mut self, node: BoundExpressionStatement) -> BoundStatement {
        BoundStatement::expression(self.rewrite_expression(node.expression))
    }

    fn rewrite_if_statement(&mut self, node: BoundIfStatement) -> BoundStatement {
        let condition = self.rewrite_expression(node.condition);
        let then_statement = self.rewrite_statement(*node.then_statement);
        let else_statement = node
            .else_statement
            .map(|statement| Box::new(self.rewrite_statement(*statement)));
        BoundStatement::If(BoundIfStatement {
            condition,
            then_statement: Box::new(then_statement),
            else_statement,
        })
    }

    fn rewrite_while_statement(&mut self, node: BoundWhileStatement) -> BoundStatement {
        let condition = self.rewrite_expression(node.condition);
        let body = self.rewrite_statement(*node.body);
        BoundStatement::while_loop(condition, body)
    }

    fn rewrite_for_statement(&mut self, node: BoundForStatement) -> BoundStatement {
        let lower_bound = self.rewrite_expression(node.lower_bound);
        let upper_bound = self.rewrite_expression(node.upper_bound);
        let body = self.rewrite_statement(*node.body);
        BoundStatement::For(BoundForStatement {
            variable: node.variable,
            lower_bound,
            upper_bound,
            body: Box::new(body),
        })
    }

    fn rewrite_goto_statement(&mut self, node: BoundGotoStatement) -> BoundStatement {
        BoundStatement::Goto(node)
    }

    fn rewrite_conditional_goto_statement(&mut self, node: BoundConditionalGotoStatement) -> BoundStatement {
        let condition = self.rewrite_expression(node.condition);
        BoundStatement::conditional_goto(node.label, condition, node.jump_if_false)
    }

    fn rewrite_label_statement(&mut self, node: BoundLabelStatement) -> BoundStatement {
        BoundStatement::Label(node)
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn rewrite_expression(&mut self, node: BoundExpression) -> BoundExpression {
        match node {
            BoundExpression::Literal(node) => self.rewrite_literal_expression(node),
            BoundExpression::Variable(node) => self.rewrite_variable_expression(node),
            BoundExpression::Assignment(node) => self.rewrite_assignment_expression(node),
            BoundExpression::Unary(node) => self.rewrite_unary_expression(node),
            BoundExpression::Binary(node) => self.rewrite_binary_expression(node),
        }
    }

    fn rewrite_literal_expression(&mut self, node: BoundLiteralExpression) -> BoundExpression {
        BoundExpression::Literal(node)
    }

    fn rewrite_variable_expression(&mut self, node: BoundVariableExpression) -> BoundExpression {
        BoundExpression::Variable(node)
    }

    fn rewrite_assignment_expression(&mut self, node: BoundAssignmentExpression) -> BoundExpression {
        let expression = self.rewrite_expression(*node.expression);
        BoundExpression::assignment(node.variable, expression)
    }

    fn rewrite_unary_expression(&mut self, node: BoundUnaryExpression) -> BoundExpression {
        let operand = self.rewrite_expression(*node.operand);
        BoundExpression::unary(node.op, operand)
    }

    fn rewrite_binary_expression(&mut self, node: BoundBinaryExpression) -> BoundExpression {
        let left = self.rewrite_expression(*node.left);
        let right = self.rewrite_expression(*node.right);
        BoundExpression::binary(left, node.op, right)
    }
}
