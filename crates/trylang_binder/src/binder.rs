//! The binder implementation.
//!
//! Walks the syntax tree and produces the bound tree. Handles:
//! - Scope management (block scopes, `for` loop scopes)
//! - Variable resolution via the scope chain
//! - Operator resolution via the static operator tables
//! - Type checking of conditions, bounds, initializers and assignments
//!
//! Every semantic error is reported once. A sub-expression that already
//! failed is an `Error` node, and anything built on top of an `Error` node
//! stays silent so that one mistake yields one diagnostic.

use crate::bound_tree::*;
use crate::operators::{BoundBinaryOperator, BoundUnaryOperator};
use crate::scope::Scope;
use crate::symbol::VariableSymbol;
use trylang_core::text::TextSpan;
use trylang_core::value::TypeSymbol;
use trylang_diagnostics::{messages, DiagnosticCollection, DiagnosticMessage};
use trylang_syntax::node::*;
use trylang_syntax::{SyntaxKind, SyntaxTree};

/// The result of binding a whole syntax tree.
#[derive(Debug, Clone)]
pub struct BoundProgram {
    /// The top-level statements, in source order.
    pub statement: BoundBlockStatement,
    pub diagnostics: DiagnosticCollection,
}

/// Turns a syntax tree into a bound tree, one scope chain per binder.
pub struct Binder<'t> {
    tree: &'t SyntaxTree,
    /// The innermost scope; its parents are reachable through `parent`.
    scope: Box<Scope>,
    diagnostics: DiagnosticCollection,
}

impl<'t> Binder<'t> {
    pub fn new(tree: &'t SyntaxTree) -> Self {
        Self {
            tree,
            scope: Box::new(Scope::new(None)),
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Bind every top-level statement of `tree` in a fresh global scope.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = tree.statements().len()))]
    pub fn bind_program(tree: &'t SyntaxTree) -> BoundProgram {
        let mut binder = Binder::new(tree);
        let statement = binder.bind_compilation_unit();
        tracing::debug!(diagnostics = binder.diagnostics.len(), "binding complete");
        BoundProgram {
            statement,
            diagnostics: binder.take_diagnostics(),
        }
    }

    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    /// The innermost scope.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Bind the top-level statements into the current scope. No scope is
    /// pushed: top-level declarations live in the global scope.
    pub fn bind_compilation_unit(&mut self) -> BoundBlockStatement {
        let statements = self
            .tree
            .statements()
            .iter()
            .map(|&id| self.bind_statement(id))
            .collect();
        BoundBlockStatement::new(statements)
    }

    // ========================================================================
    // Scopes
    // ========================================================================

    fn push_scope(&mut self) {
        let parent = std::mem::take(&mut self.scope);
        self.scope = Box::new(Scope::new(Some(parent)));
    }

    fn pop_scope(&mut self) {
        if let Some(parent) = self.scope.parent.take() {
            self.scope = parent;
        }
    }

    fn report(&mut self, span: TextSpan, message: &DiagnosticMessage, args: &[&str]) {
        tracing::debug!(code = message.code, %span, "binding diagnostic");
        self.diagnostics.report(span, message, args);
    }

    fn name_text(&self, identifier: &Identifier) -> String {
        self.tree.resolve(identifier.name).to_string()
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub fn bind_statement(&mut self, id: NodeId) -> BoundStatement {
        let tree = self.tree;
        match tree.node(id) {
            SyntaxNode::BlockStatement(n) => self.bind_block_statement(n),
            SyntaxNode::ExpressionStatement(n) => {
                BoundStatement::expression(self.bind_expression(n.expression))
            }
            SyntaxNode::VariableDeclaration(n) => self.bind_variable_declaration(n),
            SyntaxNode::IfStatement(n) => self.bind_if_statement(n),
            SyntaxNode::WhileStatement(n) => self.bind_while_statement(n),
            SyntaxNode::ForStatement(n) => self.bind_for_statement(n),
            other => {
                self.report(
                    other.span(),
                    &messages::UNEXPECTED_SYNTAX,
                    &[other.kind().name(), "a statement"],
                );
                BoundStatement::expression(BoundExpression::error(TypeSymbol::Int))
            }
        }
    }

    fn bind_block_statement(&mut self, node: &BlockStatementSyntax) -> BoundStatement {
        self.push_scope();
        let statements = node
            .statements
            .iter()
            .map(|&id| self.bind_statement(id))
            .collect();
        self.pop_scope();
        BoundStatement::block(statements)
    }

    fn bind_variable_declaration(&mut self, node: &VariableDeclarationSyntax) -> BoundStatement {
        let declared_type = node.type_clause.and_then(|clause| self.bind_type_clause(&clause));
        let initializer = match declared_type {
            Some(ty) => self.bind_expression_of_type(node.initializer, ty),
            None => self.bind_expression(node.initializer),
        };

        let ty = declared_type.unwrap_or_else(|| initializer.ty());
        let name = self.name_text(&node.identifier);
        let variable = VariableSymbol::new(name, ty, node.is_read_only());
        if !self.scope.try_declare(node.identifier.name, variable.clone()) {
            self.report(
                node.identifier.span,
                &messages::VARIABLE_ALREADY_DECLARED,
                &[&variable.name],
            );
        }

        BoundStatement::variable_declaration(variable, initializer)
    }

    fn bind_type_clause(&mut self, clause: &Identifier) -> Option<TypeSymbol> {
        let name = self.tree.resolve(clause.name);
        let ty = TypeSymbol::lookup(name);
        if ty.is_none() {
            let name = name.to_string();
            self.report(clause.span, &messages::UNDEFINED_TYPE, &[&name]);
        }
        ty
    }

    fn bind_if_statement(&mut self, node: &IfStatementSyntax) -> BoundStatement {
        let condition = self.bind_expression_of_type(node.condition, TypeSymbol::Bool);
        let then_statement = self.bind_statement(node.then_statement);
        let else_statement = node
            .else_statement
            .map(|id| Box::new(self.bind_statement(id)));
        BoundStatement::If(BoundIfStatement {
            condition,
            then_statement: Box::new(then_statement),
            else_statement,
        })
    }

    fn bind_while_statement(&mut self, node: &WhileStatementSyntax) -> BoundStatement {
        let condition = self.bind_expression_of_type(node.condition, TypeSymbol::Bool);
        let body = self.bind_statement(node.body);
        BoundStatement::While(BoundWhileStatement {
            condition,
            body: Box::new(body),
        })
    }

    /// Bounds are bound in the enclosing scope; the loop variable lives in
    /// a scope of its own that ends with the loop.
    fn bind_for_statement(&mut self, node: &ForStatementSyntax) -> BoundStatement {
        let lower_bound = self.bind_expression_of_type(node.lower_bound, TypeSymbol::Int);
        let upper_bound = self.bind_expression_of_type(node.upper_bound, TypeSymbol::Int);

        self.push_scope();
        let variable = VariableSymbol::read_only(self.name_text(&node.identifier), TypeSymbol::Int);
        let declared = self.scope.try_declare(node.identifier.name, variable.clone());
        debug_assert!(declared, "loop scope starts empty");
        let body = self.bind_statement(node.body);
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

    /// Bind an expression that must have type `ty`. A mismatch is reported
    /// and replaced by an `Error` node of the expected type.
    pub fn bind_expression_of_type(&mut self, id: NodeId, ty: TypeSymbol) -> BoundExpression {
        let expression = self.bind_expression(id);
        if expression.is_error() || expression.ty() == ty {
            return expression;
        }
        let span = self.tree.node(id).span();
        self.report(
            span,
            &messages::CANNOT_CONVERT,
            &[expression.ty().name(), ty.name()],
        );
        BoundExpression::error(ty)
    }

    pub fn bind_expression(&mut self, id: NodeId) -> BoundExpression {
        let tree = self.tree;
        match tree.node(id) {
            SyntaxNode::LiteralExpression(n) => BoundExpression::literal(n.value),
            SyntaxNode::NameExpression(n) => self.bind_name_expression(n),
            SyntaxNode::UnaryExpression(n) => self.bind_unary_expression(n),
            SyntaxNode::BinaryExpression(n) => self.bind_binary_expression(n),
            SyntaxNode::ParenthesizedExpression(n) => self.bind_expression(n.expression),
            SyntaxNode::AssignmentExpression(n) => self.bind_assignment_expression(n),
            other => {
                self.report(
                    other.span(),
                    &messages::UNEXPECTED_SYNTAX,
                    &[other.kind().name(), "an expression"],
                );
                BoundExpression::error(TypeSymbol::Int)
            }
        }
    }

    fn bind_name_expression(&mut self, node: &NameExpressionSyntax) -> BoundExpression {
        match self.scope.lookup(node.identifier.name) {
            Some(variable) => BoundExpression::variable(variable.clone()),
            None => {
                let name = self.name_text(&node.identifier);
                self.report(node.identifier.span, &messages::UNDEFINED_VARIABLE, &[&name]);
                BoundExpression::error(TypeSymbol::Int)
            }
        }
    }

    fn bind_assignment_expression(&mut self, node: &AssignmentExpressionSyntax) -> BoundExpression {
        let Some(variable) = self.scope.lookup(node.identifier.name).cloned() else {
            let name = self.name_text(&node.identifier);
            self.report(node.identifier.span, &messages::UNDEFINED_VARIABLE, &[&name]);
            let expression = self.bind_expression(node.expression);
            return BoundExpression::error(expression.ty());
        };

        if variable.is_read_only {
            self.report(
                node.identifier.span,
                &messages::CANNOT_ASSIGN_READ_ONLY,
                &[&variable.name],
            );
        }

        let expression = self.bind_expression_of_type(node.expression, variable.ty);
        BoundExpression::assignment(variable, expression)
    }

    fn bind_unary_expression(&mut self, node: &UnaryExpressionSyntax) -> BoundExpression {
        let operand = self.bind_expression(node.operand);
        if operand.is_error() {
            return BoundExpression::error(operand.ty());
        }

        match BoundUnaryOperator::bind(node.operator.kind, operand.ty()) {
            Some(op) => BoundExpression::unary(op, operand),
            None => {
                self.report(
                    node.operator.span,
                    &messages::UNDEFINED_UNARY_OPERATOR,
                    &[operator_text(node.operator.kind), operand.ty().name()],
                );
                BoundExpression::error(operand.ty())
            }
        }
    }

    fn bind_binary_expression(&mut self, node: &BinaryExpressionSyntax) -> BoundExpression {
        // Both sides are bound even when the left one fails, so errors on
        // the right are still found in this pass.
        let left = self.bind_expression(node.left);
        let right = self.bind_expression(node.right);
        if left.is_error() || right.is_error() {
            return BoundExpression::error(left.ty());
        }

        match BoundBinaryOperator::bind(node.operator.kind, left.ty(), right.ty()) {
            Some(op) => BoundExpression::binary(left, op, right),
            None => {
                self.report(
                    node.operator.span,
                    &messages::UNDEFINED_BINARY_OPERATOR,
                    &[
                        operator_text(node.operator.kind),
                        left.ty().name(),
                        right.ty().name(),
                    ],
                );
                BoundExpression::error(left.ty())
            }
        }
    }
}

fn operator_text(kind: SyntaxKind) -> &'static str {
    kind.text().unwrap_or_else(|| kind.name())
}
