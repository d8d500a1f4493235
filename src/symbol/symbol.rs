//! The symbol path value type.

use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

use super::atom::{NAMESPACE_SEPARATOR, PARENT_ATOM, SELF_ATOM, validate_atom};
use super::SymbolError;

/// A namespace, class, function, or constant name as a sequence of atoms.
///
/// `Qualified` symbols are rooted at the global namespace (`\Foo\Bar`);
/// `Reference` symbols are relative (`Foo\Bar`) and only mean something
/// against a resolution context. The global namespace is `Qualified([])`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawSymbol")
)]
pub enum Symbol {
    Qualified(Vec<SmolStr>),
    Reference(Vec<SmolStr>),
}

impl Symbol {
    /// Build a qualified symbol, validating every atom.
    pub fn qualified<I, S>(atoms: I) -> Result<Self, SymbolError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Ok(Self::Qualified(collect_atoms(atoms)?))
    }

    /// Build a symbol reference, validating every atom.
    pub fn reference<I, S>(atoms: I) -> Result<Self, SymbolError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let atoms = collect_atoms(atoms)?;
        if atoms.is_empty() {
            return Err(SymbolError::EmptyReference);
        }
        Ok(Self::Reference(atoms))
    }

    /// Build a symbol from atoms already known to be valid (e.g. lexed identifiers).
    pub(crate) fn from_atoms_unchecked(qualified: bool, atoms: Vec<SmolStr>) -> Self {
        if qualified {
            Self::Qualified(atoms)
        } else if atoms.is_empty() {
            Self::Reference(vec![SmolStr::new_static(SELF_ATOM)])
        } else {
            Self::Reference(atoms)
        }
    }

    /// The global namespace.
    pub fn global() -> Self {
        Self::Qualified(Vec::new())
    }

    /// Parse PHP source syntax: `\Foo\Bar` is qualified, `Foo\Bar` is a reference.
    ///
    /// A leading `namespace` atom in a reference (`namespace\Foo`) is read as
    /// the self sentinel.
    pub fn parse(text: &str) -> Result<Self, SymbolError> {
        if text.is_empty() {
            return Err(SymbolError::EmptyReference);
        }

        if let Some(rest) = text.strip_prefix(NAMESPACE_SEPARATOR) {
            if rest.is_empty() {
                return Ok(Self::global());
            }
            return Self::qualified(rest.split(NAMESPACE_SEPARATOR));
        }

        let mut atoms = text.split(NAMESPACE_SEPARATOR).map(SmolStr::new).collect::<Vec<_>>();
        if atoms.len() > 1 && atoms[0].eq_ignore_ascii_case("namespace") {
            atoms[0] = SmolStr::new_static(SELF_ATOM);
        }
        Self::reference(atoms)
    }

    pub fn atoms(&self) -> &[SmolStr] {
        match self {
            Self::Qualified(atoms) | Self::Reference(atoms) => atoms,
        }
    }

    pub fn atom_count(&self) -> usize {
        self.atoms().len()
    }

    pub fn atom_at(&self, index: usize) -> Option<&str> {
        self.atoms().get(index).map(SmolStr::as_str)
    }

    pub fn last_atom(&self) -> Option<&str> {
        self.atoms().last().map(SmolStr::as_str)
    }

    pub fn is_qualified(&self) -> bool {
        matches!(self, Self::Qualified(_))
    }

    pub fn is_global(&self) -> bool {
        matches!(self, Self::Qualified(atoms) if atoms.is_empty())
    }

    /// A symbol of the same kind holding `count` atoms starting at `from`
    /// (all remaining atoms when `count` is `None`).
    pub fn slice_atoms(&self, from: usize, count: Option<usize>) -> Self {
        let atoms = self.atoms();
        let start = from.min(atoms.len());
        let end = match count {
            Some(count) => start.saturating_add(count).min(atoms.len()),
            None => atoms.len(),
        };
        Self::from_atoms_unchecked(self.is_qualified(), atoms[start..end].to_vec())
    }

    /// Append `other` to this symbol. A qualified `other` replaces `self`.
    ///
    /// The result is not normalized.
    pub fn join(&self, other: &Symbol) -> Self {
        match other {
            Self::Qualified(_) => other.clone(),
            Self::Reference(tail) => {
                let mut atoms = self.atoms().to_vec();
                atoms.extend(tail.iter().cloned());
                Self::from_atoms_unchecked(self.is_qualified(), atoms)
            }
        }
    }

    /// Remove self atoms and fold parent atoms into their predecessor.
    ///
    /// Parent atoms that would climb above the global namespace are dropped
    /// from qualified symbols and kept at the front of references.
    pub fn normalize(&self) -> Self {
        let mut atoms: Vec<SmolStr> = Vec::with_capacity(self.atom_count());
        for atom in self.atoms() {
            match atom.as_str() {
                SELF_ATOM => {}
                PARENT_ATOM => {
                    let can_pop = atoms.last().is_some_and(|last| last.as_str() != PARENT_ATOM);
                    if can_pop {
                        atoms.pop();
                    } else if !self.is_qualified() {
                        atoms.push(atom.clone());
                    }
                }
                _ => atoms.push(atom.clone()),
            }
        }
        Self::from_atoms_unchecked(self.is_qualified(), atoms)
    }

    /// True when `other` lives strictly below this symbol.
    pub fn is_ancestor_of(&self, other: &Symbol) -> bool {
        if self.is_qualified() != other.is_qualified() {
            return false;
        }
        let ancestor = self.normalize();
        let descendant = other.normalize();
        let (ancestor, descendant) = (ancestor.atoms(), descendant.atoms());
        ancestor.len() < descendant.len() && descendant.starts_with(ancestor)
    }

    pub fn to_qualified(&self) -> Self {
        Self::Qualified(self.atoms().to_vec())
    }

    pub fn to_reference(&self) -> Self {
        Self::from_atoms_unchecked(false, self.atoms().to_vec())
    }

    /// The enclosing namespace (normalized).
    pub fn parent(&self) -> Self {
        self.join(&Self::Reference(vec![SmolStr::new_static(PARENT_ATOM)]))
            .normalize()
    }

    /// Atoms joined by `\` with no leading separator, as written in a `use` clause.
    pub fn to_relative_string(&self) -> String {
        self.atoms().join("\\")
    }
}

fn collect_atoms<I, S>(atoms: I) -> Result<Vec<SmolStr>, SymbolError>
where
    I: IntoIterator<Item = S>,
    S: Into<SmolStr>,
{
    atoms
        .into_iter()
        .map(|atom| {
            let atom = atom.into();
            validate_atom(&atom)?;
            Ok(atom)
        })
        .collect()
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_qualified() {
            write!(f, "{}", NAMESPACE_SEPARATOR)?;
        }
        f.write_str(&self.to_relative_string())
    }
}

impl FromStr for Symbol {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Unvalidated wire form of a [`Symbol`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
enum RawSymbol {
    Qualified(Vec<SmolStr>),
    Reference(Vec<SmolStr>),
}

#[cfg(feature = "serde")]
impl TryFrom<RawSymbol> for Symbol {
    type Error = SymbolError;

    fn try_from(raw: RawSymbol) -> Result<Self, Self::Error> {
        match raw {
            RawSymbol::Qualified(atoms) => Self::qualified(atoms),
            RawSymbol::Reference(atoms) => Self::reference(atoms),
        }
    }
}
