//! Programmatic syntax tree construction.
//!
//! The builder allocates nodes into an arena and hands out `NodeId`
//! handles. Leaf tokens receive synthetic, strictly increasing spans in
//! the order they are created; composite nodes span the union of their
//! parts, so every diagnostic points at a distinct location.
//!
//! ```
//! use trylang_syntax::{SyntaxKind, SyntaxTreeBuilder};
//!
//! let mut b = SyntaxTreeBuilder::new();
//! let one = b.int(1);
//! let decl = b.var_declaration("x", one);
//! let x = b.name("x");
//! let two = b.int(2);
//! let sum = b.binary(x, SyntaxKind::PlusToken, two);
//! let stmt = b.expression_statement(sum);
//! let tree = b.finish(vec![decl, stmt]);
//! assert_eq!(tree.statements().len(), 2);
//! ```

use crate::node::*;
use crate::syntax_kind::SyntaxKind;
use crate::tree::SyntaxTree;
use trylang_core::intern::StringInterner;
use trylang_core::text::{TextPos, TextSpan};
use trylang_core::value::Value;

pub struct SyntaxTreeBuilder {
    nodes: Vec<SyntaxNode>,
    interner: StringInterner,
    position: TextPos,
}

impl SyntaxTreeBuilder {
    pub fn new() -> Self {
        Self::with_interner(StringInterner::new())
    }

    /// Create a builder that interns identifiers into an existing interner.
    pub fn with_interner(interner: StringInterner) -> Self {
        Self {
            nodes: Vec::new(),
            interner,
            position: 0,
        }
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    fn push(&mut self, node: SyntaxNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn span_of(&self, id: NodeId) -> TextSpan {
        self.node(id).span()
    }

    /// Reserve a span for the next leaf token, leaving a one-byte gap.
    fn next_span(&mut self, width: usize) -> TextSpan {
        let span = TextSpan::new(self.position, width as TextPos);
        self.position = span.end() + 1;
        span
    }

    fn token(&mut self, kind: SyntaxKind) -> SyntaxToken {
        let width = kind.text().map_or(1, str::len);
        SyntaxToken {
            kind,
            span: self.next_span(width),
        }
    }

    fn identifier(&mut self, name: &str) -> Identifier {
        Identifier {
            name: self.interner.intern(name),
            span: self.next_span(name.len()),
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    pub fn literal(&mut self, value: impl Into<Value>) -> NodeId {
        let value = value.into();
        let span = self.next_span(value.to_string().len());
        self.push(SyntaxNode::LiteralExpression(LiteralExpressionSyntax { value, span }))
    }

    pub fn int(&mut self, value: i64) -> NodeId {
        self.literal(value)
    }

    pub fn boolean(&mut self, value: bool) -> NodeId {
        self.literal(value)
    }

    pub fn name(&mut self, name: &str) -> NodeId {
        let identifier = self.identifier(name);
        self.push(SyntaxNode::NameExpression(NameExpressionSyntax { identifier }))
    }

    pub fn unary(&mut self, operator: SyntaxKind, operand: NodeId) -> NodeId {
        let operator = self.token(operator);
        let span = operator.span.union(&self.span_of(operand));
        self.push(SyntaxNode::UnaryExpression(UnaryExpressionSyntax {
            operator,
            operand,
            span,
        }))
    }

    pub fn binary(&mut self, left: NodeId, operator: SyntaxKind, right: NodeId) -> NodeId {
        let operator = self.token(operator);
        let span = self
            .span_of(left)
            .union(&operator.span)
            .union(&self.span_of(right));
        self.push(SyntaxNode::BinaryExpression(BinaryExpressionSyntax {
            left,
            operator,
            right,
            span,
        }))
    }

    pub fn parenthesized(&mut self, expression: NodeId) -> NodeId {
        let span = self.span_of(expression);
        self.push(SyntaxNode::ParenthesizedExpression(ParenthesizedExpressionSyntax {
            expression,
            span,
        }))
    }

    pub fn assignment(&mut self, name: &str, expression: NodeId) -> NodeId {
        let identifier = self.identifier(name);
        let span = identifier.span.union(&self.span_of(expression));
        self.push(SyntaxNode::AssignmentExpression(AssignmentExpressionSyntax {
            identifier,
            expression,
            span,
        }))
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub fn block(&mut self, statements: Vec<NodeId>) -> NodeId {
        let span = self.union_of(&statements);
        self.push(SyntaxNode::BlockStatement(BlockStatementSyntax { statements, span }))
    }

    pub fn expression_statement(&mut self, expression: NodeId) -> NodeId {
        let span = self.span_of(expression);
        self.push(SyntaxNode::ExpressionStatement(ExpressionStatementSyntax {
            expression,
            span,
        }))
    }

    /// `var name = initializer`
    pub fn var_declaration(&mut self, name: &str, initializer: NodeId) -> NodeId {
        self.variable_declaration(SyntaxKind::VarKeyword, name, None, initializer)
    }

    /// `let name = initializer`
    pub fn let_declaration(&mut self, name: &str, initializer: NodeId) -> NodeId {
        self.variable_declaration(SyntaxKind::LetKeyword, name, None, initializer)
    }

    /// A declaration with an explicit keyword and optional type clause.
    pub fn variable_declaration(
        &mut self,
        keyword: SyntaxKind,
        name: &str,
        type_clause: Option<&str>,
        initializer: NodeId,
    ) -> NodeId {
        debug_assert!(matches!(keyword, SyntaxKind::VarKeyword | SyntaxKind::LetKeyword));
        let keyword = self.token(keyword);
        let identifier = self.identifier(name);
        let type_clause = type_clause.map(|ty| self.identifier(ty));
        let span = keyword
            .span
            .union(&identifier.span)
            .union(&self.span_of(initializer));
        self.push(SyntaxNode::VariableDeclaration(VariableDeclarationSyntax {
            keyword,
            identifier,
            type_clause,
            initializer,
            span,
        }))
    }

    pub fn if_statement(
        &mut self,
        condition: NodeId,
        then_statement: NodeId,
        else_statement: Option<NodeId>,
    ) -> NodeId {
        let mut span = self.span_of(condition).union(&self.span_of(then_statement));
        if let Some(else_statement) = else_statement {
            span = span.union(&self.span_of(else_statement));
        }
        self.push(SyntaxNode::IfStatement(IfStatementSyntax {
            condition,
            then_statement,
            else_statement,
            span,
        }))
    }

    pub fn while_statement(&mut self, condition: NodeId, body: NodeId) -> NodeId {
        let span = self.span_of(condition).union(&self.span_of(body));
        self.push(SyntaxNode::WhileStatement(WhileStatementSyntax { condition, body, span }))
    }

    /// `for name = lower_bound to upper_bound body`
    pub fn for_statement(
        &mut self,
        name: &str,
        lower_bound: NodeId,
        upper_bound: NodeId,
        body: NodeId,
    ) -> NodeId {
        let identifier = self.identifier(name);
        let span = identifier
            .span
            .union(&self.span_of(lower_bound))
            .union(&self.span_of(upper_bound))
            .union(&self.span_of(body));
        self.push(SyntaxNode::ForStatement(ForStatementSyntax {
            identifier,
            lower_bound,
            upper_bound,
            body,
            span,
        }))
    }

    fn union_of(&mut self, ids: &[NodeId]) -> TextSpan {
        let mut spans = ids.iter().map(|&id| self.span_of(id));
        match spans.next() {
            Some(first) => spans.fold(first, |acc, span| acc.union(&span)),
            None => self.next_span(0),
        }
    }

    /// Wrap `statements` in a compilation unit and freeze the arena.
    pub fn finish(mut self, statements: Vec<NodeId>) -> SyntaxTree {
        let span = self.union_of(&statements);
        let root = self.push(SyntaxNode::CompilationUnit(CompilationUnitSyntax {
            statements,
            span,
        }));
        SyntaxTree::new(self.nodes, root, self.interner)
    }
}

impl Default for SyntaxTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
