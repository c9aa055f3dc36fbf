//! Operator tables.
//!
//! Each table row maps a syntax operator and operand type(s) to the
//! semantic operation and result type. The tables are static and never
//! mutated; binding an operator is a linear search over a handful of rows.

use trylang_core::value::TypeSymbol;
use trylang_syntax::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundUnaryOperatorKind {
    Identity,
    Negation,
    LogicalNegation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundBinaryOperatorKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulo,
    LogicalAnd,
    LogicalOr,
    Equals,
    NotEquals,
    Less,
    LessOrEquals,
    Greater,
    GreaterOrEquals,
}

#[derive(Debug, PartialEq, Eq)]
pub struct BoundUnaryOperator {
    pub syntax_kind: SyntaxKind,
    pub kind: BoundUnaryOperatorKind,
    pub operand_type: TypeSymbol,
    pub result_type: TypeSymbol,
}

#[derive(Debug, PartialEq, Eq)]
pub struct BoundBinaryOperator {
    pub syntax_kind: SyntaxKind,
    pub kind: BoundBinaryOperatorKind,
    pub left_type: TypeSymbol,
    pub right_type: TypeSymbol,
    pub result_type: TypeSymbol,
}

const fn unary(
    syntax_kind: SyntaxKind,
    kind: BoundUnaryOperatorKind,
    ty: TypeSymbol,
) -> BoundUnaryOperator {
    BoundUnaryOperator {
        syntax_kind,
        kind,
        operand_type: ty,
        result_type: ty,
    }
}

const fn binary(
    syntax_kind: SyntaxKind,
    kind: BoundBinaryOperatorKind,
    operand_type: TypeSymbol,
    result_type: TypeSymbol,
) -> BoundBinaryOperator {
    BoundBinaryOperator {
        syntax_kind,
        kind,
        left_type: operand_type,
        right_type: operand_type,
        result_type,
    }
}

use BoundBinaryOperatorKind as B;
use BoundUnaryOperatorKind as U;
use SyntaxKind as S;
use TypeSymbol::{Bool, Int};

pub static UNARY_OPERATORS: [BoundUnaryOperator; 3] = [
    unary(S::PlusToken, U::Identity, Int),
    unary(S::MinusToken, U::Negation, Int),
    unary(S::BangToken, U::LogicalNegation, Bool),
];

/// Rows the lowerer emits directly.
const INT_ADDITION: BoundBinaryOperator = binary(S::PlusToken, B::Addition, Int, Int);
const INT_LESS_OR_EQUALS: BoundBinaryOperator =
    binary(S::LessEqualsToken, B::LessOrEquals, Int, Bool);

pub static BINARY_OPERATORS: [BoundBinaryOperator; 15] = [
    INT_ADDITION,
    binary(S::MinusToken, B::Subtraction, Int, Int),
    binary(S::StarToken, B::Multiplication, Int, Int),
    binary(S::SlashToken, B::Division, Int, Int),
    binary(S::PercentToken, B::Modulo, Int, Int),
    binary(S::EqualsEqualsToken, B::Equals, Int, Bool),
    binary(S::BangEqualsToken, B::NotEquals, Int, Bool),
    binary(S::LessToken, B::Less, Int, Bool),
    INT_LESS_OR_EQUALS,
    binary(S::GreaterToken, B::Greater, Int, Bool),
    binary(S::GreaterEqualsToken, B::GreaterOrEquals, Int, Bool),
    binary(S::AmpersandAmpersandToken, B::LogicalAnd, Bool, Bool),
    binary(S::PipePipeToken, B::LogicalOr, Bool, Bool),
    binary(S::EqualsEqualsToken, B::Equals, Bool, Bool),
    binary(S::BangEqualsToken, B::NotEquals, Bool, Bool),
];

impl BoundUnaryOperator {
    /// Resolve a unary operator for an operand type.
    pub fn bind(syntax_kind: SyntaxKind, operand_type: TypeSymbol) -> Option<&'static Self> {
        UNARY_OPERATORS
            .iter()
            .find(|op| op.syntax_kind == syntax_kind && op.operand_type == operand_type)
    }

    pub fn text(&self) -> &'static str {
        self.syntax_kind.text().unwrap_or("?")
    }
}

impl BoundBinaryOperator {
    /// Resolve a binary operator for a pair of operand types.
    pub fn bind(
        syntax_kind: SyntaxKind,
        left_type: TypeSymbol,
        right_type: TypeSymbol,
    ) -> Option<&'static Self> {
        BINARY_OPERATORS.iter().find(|op| {
            op.syntax_kind == syntax_kind && op.left_type == left_type && op.right_type == right_type
        })
    }

    pub fn text(&self) -> &'static str {
        self.syntax_kind.text().unwrap_or("?")
    }

    /// `int + int`, as emitted for a lowered loop increment.
    pub fn int_addition() -> &'static Self {
        &INT_ADDITION
    }

    /// `int <= int`, as emitted for a lowered loop bound check.
    pub fn int_less_or_equals() -> &'static Self {
        &INT_LESS_OR_EQUALS
    }
}
