//! Symbol path model.
//!
//! A [`Symbol`] is an immutable sequence of atoms, either qualified (rooted
//! at the global namespace) or a relative reference. Join, normalize, and
//! ancestry checks are shared over the common atom representation and
//! dispatched by matching on the variant.

mod atom;
mod error;
#[allow(clippy::module_inception)]
mod symbol;

pub use atom::{
    NAMESPACE_SEPARATOR, PARENT_ATOM, SELF_ATOM, is_identifier, is_sentinel, validate_atom,
};
pub use error::SymbolError;
pub use symbol::Symbol;
