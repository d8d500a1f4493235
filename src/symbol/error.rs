//! Error types for symbol construction.

use thiserror::Error;

/// Errors raised while building a [`Symbol`](super::Symbol).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    /// An atom does not match the identifier grammar.
    #[error("Invalid symbol atom: {atom:?}")]
    InvalidAtom { atom: String },

    /// A reference needs at least one atom.
    #[error("Symbol reference has no atoms")]
    EmptyReference,
}

impl SymbolError {
    /// Create an invalid atom error.
    pub fn invalid_atom(atom: impl Into<String>) -> Self {
        Self::InvalidAtom { atom: atom.into() }
    }
}
