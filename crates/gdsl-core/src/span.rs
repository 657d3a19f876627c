//! Source positions attached to AST nodes and diagnostics.

use std::fmt;

/// Where a construct starts in the source, and how many bytes it covers.
///
/// Errors raised inside type hooks have no position of their own and carry
/// `Span::default()` until the compiler attaches the span of the node being
/// lowered.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// 1-based line.
    pub line: u32,
    /// 1-based byte column.
    pub col: u32,
    /// Length in bytes.
    pub len: u32,
}

impl Span {
    #[inline]
    pub fn new(line: u32, col: u32, len: u32) -> Self {
        Self { line, col, len }
    }

    /// A zero-length span, for positions synthesized by tools and tests.
    #[inline]
    pub fn point(line: u32, col: u32) -> Self {
        Self::new(line, col, 0)
    }

    /// Whether no position has been attached yet.
    #[inline]
    pub fn is_unknown(&self) -> bool {
        self.line == 0
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_line_and_column() {
        assert_eq!(Span::new(3, 15, 5).to_string(), "3:15");
        assert_eq!(format!("{:?}", Span::point(1, 2)), "1:2");
    }

    #[test]
    fn default_is_unknown() {
        assert!(Span::default().is_unknown());
        assert!(!Span::point(1, 1).is_unknown());
    }
}
