//! PHP lexing and resolution context parsing.
//!
//! ## Pipeline
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → RawToken: tagged (kind, text, line) or bare char
//!     ↓
//! Normalizer → Token with line, column, byte offset, size; trailing End
//!     ↓
//! Context parser → Vec<ParsedResolutionContext>
//! ```
//!
//! The parser only accepts normalized [`Token`]s, so position information is
//! always present by the time it runs.

pub mod context_parser;
pub mod lexer;
pub mod normalizer;
mod token;

pub use context_parser::{ResolutionContextParser, parse_source, parse_tokens};
pub use lexer::Lexer;
pub use normalizer::{normalize, tokenize};
pub use token::{RawToken, Token, TokenKind};
