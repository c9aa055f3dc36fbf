//! The bound tree: the typed intermediate representation.
//!
//! Nodes are immutable once the binder builds them. Every expression's
//! result type is fixed at construction (by its literal value, operator
//! row, or symbol) and is never recomputed.

use crate::operators::{BoundBinaryOperator, BoundUnaryOperator};
use crate::symbol::VariableSymbol;
use std::fmt;
use trylang_core::value::{TypeSymbol, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BoundNodeKind {
    // Expressions
    LiteralExpression,
    UnaryExpression,
    BinaryExpression,
    VariableExpression,
    AssignmentExpression,
    ErrorExpression,

    // Statements
    BlockStatement,
    ExpressionStatement,
    VariableDeclaration,
    IfStatement,
    WhileStatement,
    ForStatement,
    GotoStatement,
    ConditionalGotoStatement,
    LabelStatement,
}

/// Kind names indexed by `BoundNodeKind` ordinal.
static BOUND_NODE_KIND_NAMES: [&str; 15] = [
    "LiteralExpression",
    "UnaryExpression",
    "BinaryExpression",
    "VariableExpression",
    "AssignmentExpression",
    "ErrorExpression",
    "BlockStatement",
    "ExpressionStatement",
    "VariableDeclaration",
    "IfStatement",
    "WhileStatement",
    "ForStatement",
    "GotoStatement",
    "ConditionalGotoStatement",
    "LabelStatement",
];

impl BoundNodeKind {
    pub fn name(self) -> &'static str {
        BOUND_NODE_KIND_NAMES[self as usize]
    }
}

impl fmt::Display for BoundNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
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
pub struct BoundUnaryExpression {
    pub op: &'static BoundUnaryOperator,
    pub operand: Box<BoundExpression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundBinaryExpression {
    pub left: Box<BoundExpression>,
    pub op: &'static BoundBinaryOperator,
    pub right: Box<BoundExpression>,
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

/// Stands in for an expression that failed to bind. Carries the type the
/// surrounding code expects so binding can continue without cascading.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundErrorExpression {
    pub ty: TypeSymbol,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoundExpression {
    Literal(BoundLiteralExpression),
    Unary(BoundUnaryExpression),
    Binary(BoundBinaryExpression),
    Variable(BoundVariableExpression),
    Assignment(BoundAssignmentExpression),
    Error(BoundErrorExpression),
}

impl BoundExpression {
    pub fn literal(value: impl Into<Value>) -> Self {
        BoundExpression::Literal(BoundLiteralExpression {
            value: value.into(),
        })
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

    pub fn unary(op: &'static BoundUnaryOperator, operand: BoundExpression) -> Self {
        BoundExpression::Unary(BoundUnaryExpression {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn binary(
        left: BoundExpression,
        op: &'static BoundBinaryOperator,
        right: BoundExpression,
    ) -> Self {
        BoundExpression::Binary(BoundBinaryExpression {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    pub fn error(ty: TypeSymbol) -> Self {
        BoundExpression::Error(BoundErrorExpression { ty })
    }

    /// The statically resolved result type.
    pub fn ty(&self) -> TypeSymbol {
        match self {
            BoundExpression::Literal(e) => e.value.type_symbol(),
            BoundExpression::Unary(e) => e.op.result_type,
            BoundExpression::Binary(e) => e.op.result_type,
            BoundExpression::Variable(e) => e.variable.ty,
            BoundExpression::Assignment(e) => e.variable.ty,
            BoundExpression::Error(e) => e.ty,
        }
    }

    pub fn kind(&self) -> BoundNodeKind {
        match self {
            BoundExpression::Literal(_) => BoundNodeKind::LiteralExpression,
            BoundExpression::Unary(_) => BoundNodeKind::UnaryExpression,
            BoundExpression::Binary(_) => BoundNodeKind::BinaryExpression,
            BoundExpression::Variable(_) => BoundNodeKind::VariableExpression,
            BoundExpression::Assignment(_) => BoundNodeKind::AssignmentExpression,
            BoundExpression::Error(_) => BoundNodeKind::ErrorExpression,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, BoundExpression::Error(_))
    }

    /// Whether this expression or any sub-expression is an `Error` node.
    pub fn contains_error(&self) -> bool {
        match self {
            BoundExpression::Literal(_) | BoundExpression::Variable(_) => false,
            BoundExpression::Unary(e) => e.operand.contains_error(),
            BoundExpression::Binary(e) => e.left.contains_error() || e.right.contains_error(),
            BoundExpression::Assignment(e) => e.expression.contains_error(),
            BoundExpression::Error(_) => true,
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

/// An opaque jump target. Identities are minted by the lowerer and are
/// only meaningful within the program they were minted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoundLabel(u32);

impl BoundLabel {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BoundLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundBlockStatement {
    pub statements: Vec<BoundStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundExpressionStatement {
    pub expression: BoundExpression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundVariableDeclaration {
    pub variable: VariableSymbol,
    pub initializer: BoundExpression,
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
    pub label: BoundLabel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundConditionalGotoStatement {
    pub label: BoundLabel,
    pub condition: BoundExpression,
    /// Jump when the condition evaluates to this value.
    pub jump_if_true: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundLabelStatement {
    pub label: BoundLabel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoundStatement {
    Block(BoundBlockStatement),
    Expression(BoundExpressionStatement),
    VariableDeclaration(BoundVariableDeclaration),
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

    pub fn expression(expression: BoundExpression) -> Self {
        BoundStatement::Expression(BoundExpressionStatement { expression })
    }

    pub fn variable_declaration(variable: VariableSymbol, initializer: BoundExpression) -> Self {
        BoundStatement::VariableDeclaration(BoundVariableDeclaration {
            variable,
            initializer,
        })
    }

    pub fn goto(label: BoundLabel) -> Self {
        BoundStatement::Goto(BoundGotoStatement { label })
    }

    pub fn conditional_goto(label: BoundLabel, condition: BoundExpression, jump_if_true: bool) -> Self {
        BoundStatement::ConditionalGoto(BoundConditionalGotoStatement {
            label,
            condition,
            jump_if_true,
        })
    }

    pub fn label(label: BoundLabel) -> Self {
        BoundStatement::Label(BoundLabelStatement { label })
    }

    pub fn kind(&self) -> BoundNodeKind {
        match self {
            BoundStatement::Block(_) => BoundNodeKind::BlockStatement,
            BoundStatement::Expression(_) => BoundNodeKind::ExpressionStatement,
            BoundStatement::VariableDeclaration(_) => BoundNodeKind::VariableDeclaration,
            BoundStatement::If(_) => BoundNodeKind::IfStatement,
            BoundStatement::While(_) => BoundNodeKind::WhileStatement,
            BoundStatement::For(_) => BoundNodeKind::ForStatement,
            BoundStatement::Goto(_) => BoundNodeKind::GotoStatement,
            BoundStatement::ConditionalGoto(_) => BoundNodeKind::ConditionalGotoStatement,
            BoundStatement::Label(_) => BoundNodeKind::LabelStatement,
        }
    }

    /// Whether this statement may appear in a lowered program.
    pub fn is_flat(&self) -> bool {
        matches!(
            self,
            BoundStatement::Label(_)
                | BoundStatement::Goto(_)
                | BoundStatement::ConditionalGoto(_)
                | BoundStatement::Expression(_)
                | BoundStatement::VariableDeclaration(_)
        )
    }

    /// Whether any expression beneath this statement is an `Error` node.
    pub fn contains_error(&self) -> bool {
        match self {
            BoundStatement::Block(b) => b.contains_error(),
            BoundStatement::Expression(s) => s.expression.contains_error(),
            BoundStatement::VariableDeclaration(s) => s.initializer.contains_error(),
            BoundStatement::If(s) => {
                s.condition.contains_error()
                    || s.then_statement.contains_error()
                    || s.else_statement.as_ref().is_some_and(|e| e.contains_error())
            }
            BoundStatement::While(s) => s.condition.contains_error() || s.body.contains_error(),
            BoundStatement::For(s) => {
                s.lower_bound.contains_error()
                    || s.upper_bound.contains_error()
                    || s.body.contains_error()
            }
            BoundStatement::Goto(_) | BoundStatement::Label(_) => false,
            BoundStatement::ConditionalGoto(s) => s.condition.contains_error(),
        }
    }
}

impl BoundBlockStatement {
    pub fn new(statements: Vec<BoundStatement>) -> Self {
        Self { statements }
    }

    pub fn contains_error(&self) -> bool {
        self.statements.iter().any(BoundStatement::contains_error)
    }

    /// Whether every statement is one a lowered program may contain.
    pub fn is_flat(&self) -> bool {
        self.statements.iter().all(BoundStatement::is_flat)
    }

    pub fn labels(&self) -> impl Iterator<Item = BoundLabel> + '_ {
        self.statements.iter().filter_map(|s| match s {
            BoundStatement::Label(l) => Some(l.label),
            _ => None,
        })
    }
}
