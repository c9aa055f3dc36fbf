//! trylang_binder: Name resolution and type checking.
//!
//! The binder walks the syntax tree, resolves identifiers through a chain
//! of scopes, looks operators up in static tables, and produces the typed
//! bound tree consumed by the lowerer and evaluator. Semantic errors become
//! diagnostics plus `Error` expressions; binding never stops early.

mod binder;
pub mod bound_tree;
pub mod operators;
mod printer;
mod scope;
mod symbol;

pub use binder::{Binder, BoundProgram};
pub use bound_tree::*;
pub use operators::{
    BoundBinaryOperator, BoundBinaryOperatorKind, BoundUnaryOperator, BoundUnaryOperatorKind,
};
pub use scope::Scope;
pub use symbol::VariableSymbol;
