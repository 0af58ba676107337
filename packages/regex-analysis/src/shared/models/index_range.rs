//! Source ranges inside a regex literal
//!
//! Offsets are signed so that sentinel ranges can sit before the first
//! character: `(-1, 0)` anchors the opening quote and `(-1, -1)` stands for
//! "no range".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open range `[begin, end)` of offsets into the regex source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndexRange {
    pub begin: isize,
    pub end: isize,
}

impl IndexRange {
    pub fn new(begin: isize, end: isize) -> Self {
        Self { begin, end }
    }

    /// Range of the opening quote, located before the first character
    pub fn opening_quote() -> Self {
        Self::new(-1, 0)
    }

    /// Range that matches no syntax element
    pub fn none() -> Self {
        Self::new(-1, -1)
    }

    pub fn is_none(&self) -> bool {
        *self == Self::none()
    }

    pub fn len(&self) -> usize {
        (self.end - self.begin).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.begin
    }

    /// Extend this range up to the end of `other`
    pub fn merge(&self, other: IndexRange) -> IndexRange {
        IndexRange::new(self.begin, other.end)
    }

    /// `other` lies completely inside this range
    pub fn contains(&self, other: IndexRange) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }

    /// This range ends before `other` starts
    pub fn lower_than(&self, other: IndexRange) -> bool {
        self.end <= other.begin
    }

    /// This range starts after `other` ends
    pub fn higher_than(&self, other: IndexRange) -> bool {
        self.begin >= other.end
    }

    /// Slice of `source` covered by this range, `None` for sentinel ranges
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        if self.begin < 0 || self.end < self.begin {
            return None;
        }
        source.get(self.begin as usize..self.end as usize)
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.begin, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containment_and_order() {
        let outer = IndexRange::new(2, 8);
        let inner = IndexRange::new(3, 5);
        assert!(outer.contains(inner));
        assert!(!inner.contains(outer));
        assert!(IndexRange::new(0, 2).lower_than(outer));
        assert!(IndexRange::new(8, 9).higher_than(outer));
        assert!(!inner.higher_than(outer));
        assert!(IndexRange::new(0, 1) < IndexRange::new(1, 2));
    }

    #[test]
    fn test_sentinels() {
        assert!(IndexRange::none().is_none());
        assert_eq!(IndexRange::opening_quote().slice("abc"), None);
        assert_eq!(IndexRange::new(1, 3).slice("abcd"), Some("bc"));
        assert!(IndexRange::opening_quote().lower_than(IndexRange::new(0, 1)));
    }
}
