//! Error types for use-statement construction.

use thiserror::Error;

use crate::symbol::SymbolError;

/// Errors raised while building use statements and their clauses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UseStatementError {
    /// The alias is not a single plain identifier.
    #[error("Invalid use statement alias: {alias:?}")]
    InvalidAlias { alias: String },

    /// A clause must import something below the global namespace.
    #[error("Cannot import the global namespace")]
    GlobalNamespace,

    /// A use statement needs at least one clause.
    #[error("Use statement has no clauses")]
    EmptyUseStatement,

    /// A symbol inside the statement was malformed.
    #[error(transparent)]
    Symbol(#[from] SymbolError),
}
