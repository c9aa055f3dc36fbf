//! Syntax node definitions.
//!
//! Each node kind is its own struct holding only its own fields; `SyntaxNode`
//! is the closed union over them. Child nodes are referenced through
//! `NodeId` handles into the owning `SyntaxTree`.

use crate::syntax_kind::SyntaxKind;
use std::fmt;
use trylang_core::intern::InternedString;
use trylang_core::text::TextSpan;
use trylang_core::value::Value;

/// Node ID for referencing syntax nodes by index.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

// ============================================================================
// Tokens
// ============================================================================

/// A token that carries no text of its own (operators and keywords).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxToken {
    pub kind: SyntaxKind,
    pub span: TextSpan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identifier {
    pub name: InternedString,
    pub span: TextSpan,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone)]
pub struct LiteralExpressionSyntax {
    pub value: Value,
    pub span: TextSpan,
}

#[derive(Debug, Clone)]
pub struct NameExpressionSyntax {
    pub identifier: Identifier,
}

#[derive(Debug, Clone)]
pub struct UnaryExpressionSyntax {
    pub operator: SyntaxToken,
    pub operand: NodeId,
    pub span: TextSpan,
}

#[derive(Debug, Clone)]
pub struct BinaryExpressionSyntax {
    pub left: NodeId,
    pub operator: SyntaxToken,
    pub right: NodeId,
    pub span: TextSpan,
}

#[derive(Debug, Clone)]
pub struct ParenthesizedExpressionSyntax {
    pub expression: NodeId,
    pub span: TextSpan,
}

#[derive(Debug, Clone)]
pub struct AssignmentExpressionSyntax {
    pub identifier: Identifier,
    pub expression: NodeId,
    pub span: TextSpan,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone)]
pub struct CompilationUnitSyntax {
    pub statements: Vec<NodeId>,
    pub span: TextSpan,
}

#[derive(Debug, Clone)]
pub struct BlockStatementSyntax {
    pub statements: Vec<NodeId>,
    pub span: TextSpan,
}

#[derive(Debug, Clone)]
pub struct ExpressionStatementSyntax {
    pub expression: NodeId,
    pub span: TextSpan,
}

/// `var x = e`, `let x = e`, optionally with a type clause: `var x: int = e`.
#[derive(Debug, Clone)]
pub struct VariableDeclarationSyntax {
    /// `VarKeyword` or `LetKeyword`.
    pub keyword: SyntaxToken,
    pub identifier: Identifier,
    pub type_clause: Option<Identifier>,
    pub initializer: NodeId,
    pub span: TextSpan,
}

impl VariableDeclarationSyntax {
    pub fn is_read_only(&self) -> bool {
        self.keyword.kind == SyntaxKind::LetKeyword
    }
}

#[derive(Debug, Clone)]
pub struct IfStatementSyntax {
    pub condition: NodeId,
    pub then_statement: NodeId,
    pub else_statement: Option<NodeId>,
    pub span: TextSpan,
}

#[derive(Debug, Clone)]
pub struct WhileStatementSyntax {
    pub condition: NodeId,
    pub body: NodeId,
    pub span: TextSpan,
}

/// `for i = lower to upper body`, bounds inclusive.
#[derive(Debug, Clone)]
pub struct ForStatementSyntax {
    pub identifier: Identifier,
    pub lower_bound: NodeId,
    pub upper_bound: NodeId,
    pub body: NodeId,
    pub span: TextSpan,
}

// ============================================================================
// Node union
// ============================================================================

#[derive(Debug, Clone)]
pub enum SyntaxNode {
    CompilationUnit(CompilationUnitSyntax),
    LiteralExpression(LiteralExpressionSyntax),
    NameExpression(NameExpressionSyntax),
    UnaryExpression(UnaryExpressionSyntax),
    BinaryExpression(BinaryExpressionSyntax),
    ParenthesizedExpression(ParenthesizedExpressionSyntax),
    AssignmentExpression(AssignmentExpressionSyntax),
    BlockStatement(BlockStatementSyntax),
    ExpressionStatement(ExpressionStatementSyntax),
    VariableDeclaration(VariableDeclarationSyntax),
    IfStatement(IfStatementSyntax),
    WhileStatement(WhileStatementSyntax),
    ForStatement(ForStatementSyntax),
}

impl SyntaxNode {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxNode::CompilationUnit(_) => SyntaxKind::CompilationUnit,
            SyntaxNode::LiteralExpression(_) => SyntaxKind::LiteralExpression,
            SyntaxNode::NameExpression(_) => SyntaxKind::NameExpression,
            SyntaxNode::UnaryExpression(_) => SyntaxKind::UnaryExpression,
            SyntaxNode::BinaryExpression(_) => SyntaxKind::BinaryExpression,
            SyntaxNode::ParenthesizedExpression(_) => SyntaxKind::ParenthesizedExpression,
            SyntaxNode::AssignmentExpression(_) => SyntaxKind::AssignmentExpression,
            SyntaxNode::BlockStatement(_) => SyntaxKind::BlockStatement,
            SyntaxNode::ExpressionStatement(_) => SyntaxKind::ExpressionStatement,
            SyntaxNode::VariableDeclaration(_) => SyntaxKind::VariableDeclaration,
            SyntaxNode::IfStatement(_) => SyntaxKind::IfStatement,
            SyntaxNode::WhileStatement(_) => SyntaxKind::WhileStatement,
            SyntaxNode::ForStatement(_) => SyntaxKind::ForStatement,
        }
    }

    pub fn span(&self) -> TextSpan {
        match self {
            SyntaxNode::CompilationUnit(n) => n.span,
            SyntaxNode::LiteralExpression(n) => n.span,
            SyntaxNode::NameExpression(n) => n.identifier.span,
            SyntaxNode::UnaryExpression(n) => n.span,
            SyntaxNode::BinaryExpression(n) => n.span,
            SyntaxNode::ParenthesizedExpression(n) => n.span,
            SyntaxNode::AssignmentExpression(n) => n.span,
            SyntaxNode::BlockStatement(n) => n.span,
            SyntaxNode::ExpressionStatement(n) => n.span,
            SyntaxNode::VariableDeclaration(n) => n.span,
            SyntaxNode::IfStatement(n) => n.span,
            SyntaxNode::WhileStatement(n) => n.span,
            SyntaxNode::ForStatement(n) => n.span,
        }
    }

    /// The ordered child nodes. Optional children (a missing `else`) are
    /// reported as `None` in their slot.
    pub fn children(&self) -> Vec<Option<NodeId>> {
        match self {
            SyntaxNode::CompilationUnit(n) => n.statements.iter().copied().map(Some).collect(),
            SyntaxNode::BlockStatement(n) => n.statements.iter().copied().map(Some).collect(),
            SyntaxNode::LiteralExpression(_) | SyntaxNode::NameExpression(_) => Vec::new(),
            SyntaxNode::UnaryExpression(n) => vec![Some(n.operand)],
            SyntaxNode::BinaryExpression(n) => vec![Some(n.left), Some(n.right)],
            SyntaxNode::ParenthesizedExpression(n) => vec![Some(n.expression)],
            SyntaxNode::AssignmentExpression(n) => vec![Some(n.expression)],
            SyntaxNode::ExpressionStatement(n) => vec![Some(n.expression)],
            SyntaxNode::VariableDeclaration(n) => vec![Some(n.initializer)],
            SyntaxNode::IfStatement(n) => {
                vec![Some(n.condition), Some(n.then_statement), n.else_statement]
            }
            SyntaxNode::WhileStatement(n) => vec![Some(n.condition), Some(n.body)],
            SyntaxNode::ForStatement(n) => {
                vec![Some(n.lower_bound), Some(n.upper_bound), Some(n.body)]
            }
        }
    }
}
