//! Byte ranges into the query text.

use core::fmt;
use core::ops::Range;

use serde::Serialize;

/// A half-open byte range `start..end` in the source text.
///
/// Every token and every AST node carries (or can derive) one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// An empty span sitting at `offset`.
    #[must_use]
    pub const fn point(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both `self` and `other`.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        let start = if self.start < other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end > other.end {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    /// Returns true if `other` lies entirely inside `self`.
    #[must_use]
    pub const fn contains(&self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The slice of `source` this span covers.
    ///
    /// Returns `None` when the span does not fall on char boundaries of
    /// `source` (e.g. when it was produced for a different input).
    #[must_use]
    pub fn slice<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.start..self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len_and_empty() {
        assert_eq!(Span::new(5, 10).len(), 5);
        assert!(Span::point(3).is_empty());
        assert!(!Span::new(3, 4).is_empty());
    }

    #[test]
    fn test_span_merge_is_order_independent() {
        let a = Span::new(5, 10);
        let b = Span::new(8, 15);
        assert_eq!(a.merge(b), Span::new(5, 15));
        assert_eq!(b.merge(a), Span::new(5, 15));
    }

    #[test]
    fn test_span_contains() {
        let outer = Span::new(0, 20);
        assert!(outer.contains(Span::new(3, 7)));
        assert!(!Span::new(3, 7).contains(outer));
    }

    #[test]
    fn test_span_slice() {
        let sql = "SELECT a FROM t";
        assert_eq!(Span::new(7, 8).slice(sql), Some("a"));
        assert_eq!(Span::new(7, 99).slice(sql), None);
    }
}
