//! Resolution contexts: use statements, resolution, generation, rendering.
//!
//! A [`ResolutionContext`] is a primary namespace plus the use statements in
//! effect inside it. Contexts come from two places:
//!
//! - the parser ([`crate::parser`]) recovers them from source, wrapped in
//!   [`ParsedResolutionContext`] with source spans;
//! - the [`ResolutionContextGenerator`] builds a minimal one for a set of
//!   symbols some generated code needs, choosing collision-free aliases.
//!
//! Either kind renders back to source with [`render`].

mod error;
mod generator;
mod normalize;
mod parsed;
mod render;
mod resolution_context;
mod use_statement;

pub use error::UseStatementError;
pub use generator::{DEFAULT_MAX_REFERENCE_ATOMS, ResolutionContextGenerator};
pub use normalize::{normalize, normalize_clauses};
pub use parsed::{ParsedResolutionContext, ParsedSymbol, ParsedUseStatement, SymbolKind};
pub use render::render;
pub use resolution_context::ResolutionContext;
pub use use_statement::{UseStatement, UseStatementClause, UseStatementType};
