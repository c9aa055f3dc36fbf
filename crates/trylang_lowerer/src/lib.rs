//! trylang_lowerer: Control-flow lowering.
//!
//! Rewrites structured statements (`if`, `while`, `for`) into labels and
//! gotos, then flattens nested blocks so the evaluator sees one linear
//! statement list. The input bound tree is consumed; a new tree is built.

mod lowerer;

pub use lowerer::{lower, lower_program};
