//! Atom grammar: identifier segments and the two path sentinels.

use super::SymbolError;

/// Sentinel atom meaning "the current namespace".
pub const SELF_ATOM: &str = ".";

/// Sentinel atom meaning "one namespace up".
pub const PARENT_ATOM: &str = "..";

/// Separator between atoms in source text.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Check whether `atom` is a PHP identifier.
///
/// PHP accepts any byte above 0x7f in identifiers, so every non-ASCII
/// character is allowed in both the leading and trailing positions.
pub fn is_identifier(atom: &str) -> bool {
    let mut chars = atom.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_continue),
        _ => false,
    }
}

/// Check whether `atom` is one of the self/parent sentinels.
pub fn is_sentinel(atom: &str) -> bool {
    atom == SELF_ATOM || atom == PARENT_ATOM
}

/// Accept identifiers and sentinels, reject everything else.
pub fn validate_atom(atom: &str) -> Result<(), SymbolError> {
    if is_identifier(atom) || is_sentinel(atom) {
        Ok(())
    } else {
        Err(SymbolError::invalid_atom(atom))
    }
}

pub(crate) fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic() || !c.is_ascii()
}

pub(crate) fn is_identifier_continue(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}
