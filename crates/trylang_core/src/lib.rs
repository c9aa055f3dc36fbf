//! trylang_core: Core utilities for the trylang toolchain.
//!
//! Provides string interning, text spans, and the scalar runtime values
//! shared by the binder, lowerer, and evaluator.

pub mod intern;
pub mod text;
pub mod value;

// Re-export commonly used types
pub use intern::{InternedString, StringInterner};
pub use text::{TextPos, TextSpan};
pub use value::{TypeSymbol, Value};
