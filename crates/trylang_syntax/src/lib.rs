//! trylang_syntax: Syntax tree definitions for trylang.
//!
//! Lexing and parsing live outside this repository. Whatever produces the
//! tree hands over an immutable arena of nodes addressed by `NodeId`; the
//! `SyntaxTreeBuilder` is the programmatic way to produce one.

pub mod builder;
pub mod node;
pub mod syntax_kind;
pub mod tree;

// Re-export key types
pub use builder::SyntaxTreeBuilder;
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use tree::SyntaxTree;
