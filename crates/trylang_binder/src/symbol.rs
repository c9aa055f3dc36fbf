//! Variable symbols.

use std::fmt;
use trylang_core::value::TypeSymbol;

/// A declared variable. Two symbols with the same name may coexist in
/// different scopes; within one scope the name is unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableSymbol {
    pub name: String,
    pub ty: TypeSymbol,
    /// Declared with `let`, or a `for` loop variable.
    pub is_read_only: bool,
}

impl VariableSymbol {
    pub fn new(name: impl Into<String>, ty: TypeSymbol, is_read_only: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            is_read_only,
        }
    }

    pub fn mutable(name: impl Into<String>, ty: TypeSymbol) -> Self {
        Self::new(name, ty, false)
    }

    pub fn read_only(name: impl Into<String>, ty: TypeSymbol) -> Self {
        Self::new(name, ty, true)
    }
}

impl fmt::Display for VariableSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}
