//! The variable store.

use indexmap::{Equivalent, IndexMap};
use trylang_core::value::{TypeSymbol, Value};

/// Storage key: a variable's name and static type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Slot {
    name: String,
    ty: TypeSymbol,
}

/// Borrowed form of [`Slot`]. Field order and types hash the same way.
#[derive(Hash)]
struct SlotRef<'a> {
    name: &'a str,
    ty: TypeSymbol,
}

impl Equivalent<Slot> for SlotRef<'_> {
    fn equivalent(&self, key: &Slot) -> bool {
        self.ty == key.ty && self.name == key.name
    }
}

/// Current values of a program's variables, keyed by name and type.
///
/// Scoping is resolved by the binder, so the store is a single flat map.
/// A declaration that shadows an outer variable of the same type writes the
/// outer slot; one of a different type gets a slot of its own. Iteration
/// follows first-write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableStore {
    values: IndexMap<Slot, Value>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str, ty: TypeSymbol) -> Option<Value> {
        self.values.get(&SlotRef { name, ty }).copied()
    }

    /// Write `value` into the slot for `name` at the value's type,
    /// returning the value it replaced.
    pub fn set(&mut self, name: &str, value: Value) -> Option<Value> {
        let ty = value.type_symbol();
        if let Some(slot) = self.values.get_mut(&SlotRef { name, ty }) {
            return Some(std::mem::replace(slot, value));
        }
        self.values.insert(
            Slot {
                name: name.to_string(),
                ty,
            },
            value,
        );
        None
    }

    /// Remove a slot, keeping the order of the remaining entries.
    pub fn remove(&mut self, name: &str, ty: TypeSymbol) -> Option<Value> {
        self.values.shift_remove(&SlotRef { name, ty })
    }

    pub fn contains(&self, name: &str, ty: TypeSymbol) -> bool {
        self.values.contains_key(&SlotRef { name, ty })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Slots in first-write order. The type of each slot is the value's tag.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.values.iter().map(|(slot, value)| (slot.name.as_str(), *value))
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl<'a> FromIterator<(&'a str, Value)> for VariableStore {
    fn from_iter<I: IntoIterator<Item = (&'a str, Value)>>(iter: I) -> Self {
        let mut store = VariableStore::new();
        for (name, value) in iter {
            store.set(name, value);
        }
        store
    }
}
