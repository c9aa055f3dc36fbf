//! String interning for identifiers.
//!
//! Every identifier in a syntax tree is interned so that scope lookups
//! during binding compare integer handles instead of strings.

use lasso::{Key, Spur, ThreadedRodeo};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Handle to an interned identifier. Resolve it through the interner that
/// produced it; handles from different interners are not comparable.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct InternedString(Spur);

impl fmt::Debug for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0.into_usize())
    }
}

/// Thread-safe string interner.
///
/// Cloning is cheap: clones share the same underlying storage, so a syntax
/// tree and the builder that produced it resolve the same handles.
#[derive(Clone)]
pub struct StringInterner {
    rodeo: Arc<ThreadedRodeo>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self {
            rodeo: Arc::new(ThreadedRodeo::new()),
        }
    }

    /// Create a new string interner with room for `capacity` strings.
    pub fn with_capacity(capacity: usize) -> Self {
        let bytes = NonZeroUsize::new(capacity * 8).unwrap_or(NonZeroUsize::MIN);
        Self {
            rodeo: Arc::new(ThreadedRodeo::with_capacity(lasso::Capacity::new(
                capacity, bytes,
            ))),
        }
    }

    /// Intern a string, returning the existing handle if it was seen before.
    #[inline]
    pub fn intern(&self, s: &str) -> InternedString {
        InternedString(self.rodeo.get_or_intern(s))
    }

    /// Look up an already-interned string without interning it if absent.
    #[inline]
    pub fn get(&self, s: &str) -> Option<InternedString> {
        self.rodeo.get(s).map(InternedString)
    }

    #[inline]
    pub fn resolve(&self, key: InternedString) -> &str {
        self.rodeo.resolve(&key.0)
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}
