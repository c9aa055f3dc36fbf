//! Runtime errors.

use thiserror::Error;
use trylang_binder::{BoundLabel, BoundNodeKind};
use trylang_core::value::TypeSymbol;

/// A fault caused by the program itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticFault {
    /// Division or modulo by zero. Raised in every arithmetic mode.
    #[error("division by zero")]
    DivisionByZero,

    /// Integer overflow under checked arithmetic.
    #[error("integer overflow in '{operator}'")]
    Overflow {
        /// Operator text, e.g. `+`
        operator: &'static str,
    },
}

/// A defect in the pipeline feeding the evaluator. A well-formed lowered
/// program never raises one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalError {
    #[error("variable '{0}' has no value")]
    UndefinedVariable(String),

    #[error("jump to undefined label '{0}'")]
    UnresolvedLabel(BoundLabel),

    #[error("label '{0}' is defined more than once")]
    DuplicateLabel(BoundLabel),

    #[error("'{0}' must be lowered before evaluation")]
    UnloweredStatement(BoundNodeKind),

    #[error("attempted to evaluate an error expression")]
    ErrorExpression,

    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: TypeSymbol, got: TypeSymbol },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticFault),

    #[error("internal error: {0}")]
    Internal(#[from] InternalError),
}

impl RuntimeError {
    pub fn is_internal(&self) -> bool {
        matches!(self, RuntimeError::Internal(_))
    }

    pub fn arithmetic_fault(&self) -> Option<ArithmeticFault> {
        match self {
            RuntimeError::Arithmetic(fault) => Some(*fault),
            RuntimeError::Internal(_) => None,
        }
    }
}
