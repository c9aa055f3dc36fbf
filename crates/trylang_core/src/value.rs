//! Runtime values and the static types that describe them.

use std::fmt;

/// The static type of an expression or variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeSymbol {
    Int,
    Bool,
}

/// Type names indexed by `TypeSymbol` ordinal.
const TYPE_NAMES: [&str; 2] = ["int", "bool"];

impl TypeSymbol {
    pub const ALL: [TypeSymbol; 2] = [TypeSymbol::Int, TypeSymbol::Bool];

    /// The name used for this type in type clauses and diagnostics.
    pub fn name(self) -> &'static str {
        TYPE_NAMES[self as usize]
    }

    /// Resolve a type clause name such as `int` or `bool`.
    pub fn lookup(name: &str) -> Option<TypeSymbol> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }
}

impl fmt::Display for TypeSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scalar runtime value. The tag always agrees with the `TypeSymbol`
/// of the bound node that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    Int(i64),
    Bool(bool),
}

impl Value {
    pub fn type_symbol(&self) -> TypeSymbol {
        match self {
            Value::Int(_) => TypeSymbol::Int,
            Value::Bool(_) => TypeSymbol::Bool,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Value::Int(v) => Some(v),
            Value::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(v) => Some(v),
            Value::Int(_) => None,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
        }
    }
}
