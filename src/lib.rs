//! # php-resolution-context
//!
//! Symbol resolution contexts for PHP source: which namespace a piece of
//! code lives in and which use statements are in effect there.
//!
//! - [`parser`] recovers contexts from existing source, with spans.
//! - [`ResolutionContextGenerator`] builds the minimal context some
//!   generated code needs, picking collision-free import aliases.
//! - [`ResolutionContext::resolve`] turns references written in a context
//!   into fully qualified symbols.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → ContextReader: files, streams, directory trees
//!   ↓
//! parser    → Logos lexer, token normalizer, context state machine
//!   ↓
//! context   → Use statements, ResolutionContext, generator, renderer
//!   ↓
//! symbol    → Symbol atoms, join/normalize
//!   ↓
//! base      → Primitives (Position, SourceSpan, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → symbol → context → parser → project)
// ============================================================================

/// Foundation types: Position, SourceSpan, TextRange
pub mod base;

/// Symbol paths: qualified names and relative references
pub mod symbol;

/// Use statements, resolution contexts, generation, rendering
pub mod context;

/// Lexer, token normalizer, resolution context parser
pub mod parser;

/// Reading contexts from files and directories
pub mod project;

// Re-export foundation types
pub use base::{Position, SourceSpan, TextRange, TextSize};

// Re-export the main API
pub use context::{
    ParsedResolutionContext, ParsedSymbol, ParsedUseStatement, ResolutionContext,
    ResolutionContextGenerator, SymbolKind, UseStatement, UseStatementClause, UseStatementError,
    UseStatementType, render,
};
pub use parser::{parse_source, parse_tokens};
pub use project::{ContextReader, ReaderError};
pub use symbol::{Symbol, SymbolError};
