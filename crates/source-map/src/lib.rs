//! Source positions for render-compiler diagnostics.
//!
//! Every token and template node remembers the byte range it was read from.
//! Positions are only ever used to point at the offending markup when a stage
//! fails; nothing here participates in code generation.

use std::ops::Range;

/// A half-open byte range `[start, end)` in the template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Start offset (inclusive)
    pub start: u32,
    /// End offset (exclusive)
    pub end: u32,
}

impl Span {
    /// Create a new span from start and end offsets.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Span covering `len` bytes starting at a `usize` offset.
    ///
    /// Offsets are truncated to `u32`; the lexer rejects sources longer than
    /// `u32::MAX` bytes before any span is built.
    #[inline]
    pub fn at(offset: usize, len: usize) -> Self {
        Self::new(offset as u32, (offset + len) as u32)
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    #[inline]
    pub fn to_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

/// Maps byte offsets to line/column positions.
///
/// Like [`Span`], offsets are `u32`, so the text must be under 4 GiB.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offsets of the start of each line.
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.char_indices()
                .filter(|&(_, c)| c == '\n')
                .map(|(i, _)| (i + 1) as u32),
        );
        Self { line_starts }
    }

    /// Get the 0-indexed line and column for a byte offset.
    pub fn line_col(&self, offset: u32) -> LineCol {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        LineCol {
            line: line as u32,
            col: offset - self.line_starts[line],
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// A line and column position, both 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineCol {
    pub line: u32,
    /// Byte offset within the line.
    pub col: u32,
}

impl LineCol {
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// Convert to 1-indexed for display.
    #[inline]
    pub const fn to_display(self) -> (u32, u32) {
        (self.line + 1, self.col + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_span_at_and_merge() {
        let open = Span::at(0, 5);
        let close = Span::at(12, 6);
        assert_eq!(open, Span::new(0, 5));
        assert_eq!(open.merge(close), Span::new(0, 18));
        assert_eq!(open.merge(close).to_range(), 0..18);
    }

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("<div>\n  <p>Vue</p>\n</div>");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_col(0), LineCol::new(0, 0));
        assert_eq!(index.line_col(5), LineCol::new(0, 5));
        assert_eq!(index.line_col(6), LineCol::new(1, 0));
        assert_eq!(index.line_col(8), LineCol::new(1, 2));
        assert_eq!(index.line_col(19), LineCol::new(2, 0));
        assert_eq!(LineCol::new(1, 2).to_display(), (2, 3));
    }
}
