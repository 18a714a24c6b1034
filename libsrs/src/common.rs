//! Common types used by libsrs.

/// Describes the character span of a substring in rule-set or word source text.
///
/// Spans count characters, not bytes, so that symbols like "ε" occupy a single position.
/// For example, in "ab -> ε", "ε" has the span (6, 7).
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub struct Span {
    /// Inclusive lower bound index of the span
    pub lo: usize,
    /// Exclusive upper bound index of the span
    pub hi: usize,
}

impl Span {
    /// Returns the substring of `source` this span covers.
    pub fn over(self, source: &str) -> String {
        source.chars().skip(self.lo).take(self.hi - self.lo).collect()
    }

    pub fn is_empty(self) -> bool {
        self.lo >= self.hi
    }
}

impl From<(usize, usize)> for Span {
    fn from(span: (usize, usize)) -> Self {
        Self {
            lo: span.0,
            hi: span.1,
        }
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(span: std::ops::Range<usize>) -> Self {
        Self {
            lo: span.start,
            hi: span.end,
        }
    }
}

impl From<Span> for (usize, usize) {
    fn from(span: Span) -> Self {
        (span.lo, span.hi)
    }
}
