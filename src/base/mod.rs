//! Foundation types for the resolution-context toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Position`] - 1-indexed line/column positions
//! - [`SourceSpan`] - position, byte range, and token span of a parsed construct
//! - [`TextRange`], [`TextSize`] - Byte offsets (from `text-size`)
//!
//! This module has NO dependencies on other crate modules.

mod position;
mod span;

pub use position::Position;
pub use span::{SourceSpan, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
