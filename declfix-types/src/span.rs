use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` within a source buffer.
///
/// For a declaration block the range runs from the first `{` after the
/// declaration keyword to one past its matching `}`, so slicing a buffer
/// with the span yields the full brace-delimited body including both braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Slice `text` with this span.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}
