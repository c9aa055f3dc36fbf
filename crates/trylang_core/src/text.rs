//! Source locations.
//!
//! Spans are opaque to the semantic core: they come from whoever built the
//! syntax tree and are copied onto diagnostics unchanged.

use std::fmt;

/// Byte offset into the source text.
pub type TextPos = u32;

/// A half-open byte range `[start, start + length)`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextSpan {
    pub start: TextPos,
    pub length: TextPos,
}

impl TextSpan {
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        (self.start..self.end()).contains(&pos)
    }

    /// The smallest span covering both `self` and `other`.
    pub fn union(&self, other: &TextSpan) -> TextSpan {
        let start = self.start.min(other.start);
        let end = self.end().max(other.end());
        TextSpan::new(start, end - start)
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_open() {
        let span = TextSpan::new(5, 10);
        assert_eq!(span.end(), 15);
        assert!(span.contains(5));
        assert!(span.contains(14));
        assert!(!span.contains(15));
        assert_eq!(span.to_string(), "[5, 15)");
    }

    #[test]
    fn test_union_is_symmetric() {
        let a = TextSpan::new(4, 2);
        let b = TextSpan::new(10, 2);
        assert_eq!(a.union(&b), TextSpan::new(4, 8));
        assert_eq!(b.union(&a), TextSpan::new(4, 8));
    }

    #[test]
    fn test_empty_span_contains_nothing() {
        let span = TextSpan::new(3, 0);
        assert!(!span.contains(3));
        assert_eq!(span.union(&TextSpan::new(3, 1)), TextSpan::new(3, 1));
    }
}
