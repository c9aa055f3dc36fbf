//! Scope management for the binder.

use crate::symbol::VariableSymbol;
use rustc_hash::FxHashMap;
use trylang_core::intern::InternedString;

/// A scope in the binding phase. Scopes form a chain from inner to outer.
#[derive(Debug, Default)]
pub struct Scope {
    /// The variables declared directly in this scope.
    variables: FxHashMap<InternedString, VariableSymbol>,
    /// The parent scope (None for the global scope).
    pub parent: Option<Box<Scope>>,
}

impl Scope {
    pub fn new(parent: Option<Box<Scope>>) -> Self {
        Self {
            variables: FxHashMap::default(),
            parent,
        }
    }

    /// Declare `symbol` in this scope. Returns false, leaving the existing
    /// declaration in place, if the name is already declared here.
    pub fn try_declare(&mut self, name: InternedString, symbol: VariableSymbol) -> bool {
        if self.variables.contains_key(&name) {
            return false;
        }
        self.variables.insert(name, symbol);
        true
    }

    /// Resolve a name, innermost scope first.
    pub fn lookup(&self, name: InternedString) -> Option<&VariableSymbol> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(symbol) = current.variables.get(&name) {
                return Some(symbol);
            }
            scope = current.parent.as_deref();
        }
        None
    }

    /// Variables declared directly in this scope, in no particular order.
    pub fn declared_variables(&self) -> impl Iterator<Item = &VariableSymbol> {
        self.variables.values()
    }

    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut scope = self.parent.as_deref();
        while let Some(current) = scope {
            depth += 1;
            scope = current.parent.as_deref();
        }
        depth
    }
}
