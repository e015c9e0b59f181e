use std::ops::Range;

/// Selected character range, expressed as a start offset and a length.
///
/// A zero `length` is a caret (insertion point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SelectionRange {
    /// Start character offset.
    pub start: usize,
    /// Number of selected characters.
    pub length: usize,
}

impl SelectionRange {
    /// Create a selection.
    pub const fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Create a caret at `offset`.
    pub const fn caret(offset: usize) -> Self {
        Self::new(offset, 0)
    }

    /// Returns `true` for a zero-length selection.
    pub const fn is_caret(&self) -> bool {
        self.length == 0
    }

    /// Exclusive end offset.
    pub const fn end(&self) -> usize {
        self.start.saturating_add(self.length)
    }

    /// Selected range (half-open).
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Clamp a possibly stale selection into a buffer of `len` characters.
    pub fn clamped(&self, len: usize) -> Self {
        let start = self.start.min(len);
        let length = self.length.min(len - start);
        Self::new(start, length)
    }
}
