//! Source spans attached to every parsed construct.

use super::Position;

pub use text_size::{TextRange, TextSize};

/// Where a parsed construct lives in its source.
///
/// Carries both the human-facing start position and the exact byte range, so
/// `&source[span.range()]` yields the construct's original text. The token
/// span indexes into the normalized token vector the parser consumed
/// (whitespace and comment tokens included).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceSpan {
    pub position: Position,
    pub range: TextRange,
    pub token_offset: usize,
    pub token_size: usize,
}

impl SourceSpan {
    pub fn new(position: Position, range: TextRange, token_offset: usize, token_size: usize) -> Self {
        Self {
            position,
            range,
            token_offset,
            token_size,
        }
    }

    /// Byte offset of the first character.
    pub fn offset(&self) -> u32 {
        self.range.start().into()
    }

    /// Size in bytes.
    pub fn size(&self) -> u32 {
        self.range.len().into()
    }

    pub fn line(&self) -> u32 {
        self.position.line
    }

    pub fn column(&self) -> u32 {
        self.position.column
    }

    /// Slice the construct's text out of the source it was parsed from.
    ///
    /// Returns `None` if the span does not fit `source` (e.g. a different file).
    pub fn text<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(std::ops::Range::<usize>::from(self.range))
    }

    /// Check if a byte offset falls within this span
    pub fn contains(&self, offset: TextSize) -> bool {
        self.range.contains(offset)
    }
}
