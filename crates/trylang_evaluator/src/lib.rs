//! trylang_evaluator: Execution of lowered programs.
//!
//! Runs a flat bound block (labels, gotos, expression statements and
//! declarations) against a caller-owned `VariableStore`. User-triggered
//! arithmetic faults and pipeline defects are reported as distinct
//! `RuntimeError` variants.

pub mod error;
mod evaluator;
mod store;

pub use error::{ArithmeticFault, InternalError, RuntimeError};
pub use evaluator::{evaluate, Evaluator};
pub use store::VariableStore;
