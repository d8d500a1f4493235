//! Use statement clauses and statements.

use std::fmt;

use smol_str::SmolStr;

use super::UseStatementError;
use crate::symbol::{Symbol, is_identifier};

/// The three independent import namespaces of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UseStatementType {
    /// Classes, interfaces, traits, and namespaces
    Type,
    Function,
    Constant,
}

impl UseStatementType {
    /// Every type, in rendering order.
    pub const ALL: [Self; 3] = [Self::Type, Self::Function, Self::Constant];

    /// Keyword written after `use`, if any.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Type => None,
            Self::Function => Some("function"),
            Self::Constant => Some("const"),
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// One imported symbol, optionally renamed: `Foo\Bar` or `Foo\Bar as Baz`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawUseStatementClause")
)]
pub struct UseStatementClause {
    symbol: Symbol,
    alias: Option<SmolStr>,
}

impl UseStatementClause {
    /// Build a clause. The symbol is made qualified and normalized.
    ///
    /// Fails if the alias is not a plain identifier, or if the symbol is the
    /// global namespace.
    pub fn new(symbol: Symbol, alias: Option<SmolStr>) -> Result<Self, UseStatementError> {
        let symbol = symbol.to_qualified().normalize();
        if symbol.is_global() {
            return Err(UseStatementError::GlobalNamespace);
        }
        if let Some(alias) = &alias {
            if !is_identifier(alias) {
                return Err(UseStatementError::InvalidAlias {
                    alias: alias.to_string(),
                });
            }
        }
        Ok(Self { symbol, alias })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The name this clause imports under: the alias, else the last atom.
    pub fn effective_alias(&self) -> &str {
        self.alias
            .as_deref()
            .or_else(|| self.symbol.last_atom())
            .unwrap_or_default()
    }
}

impl fmt::Display for UseStatementClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol.to_relative_string())?;
        if let Some(alias) = &self.alias {
            write!(f, " as {}", alias)?;
        }
        Ok(())
    }
}

/// An import declaration: one or more clauses sharing a [`UseStatementType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawUseStatement")
)]
pub struct UseStatement {
    clauses: Vec<UseStatementClause>,
    kind: UseStatementType,
}

impl UseStatement {
    pub fn new(
        clauses: Vec<UseStatementClause>,
        kind: UseStatementType,
    ) -> Result<Self, UseStatementError> {
        if clauses.is_empty() {
            return Err(UseStatementError::EmptyUseStatement);
        }
        Ok(Self { clauses, kind })
    }

    /// A statement holding exactly one clause.
    pub fn single(clause: UseStatementClause, kind: UseStatementType) -> Self {
        Self {
            clauses: vec![clause],
            kind,
        }
    }

    pub fn clauses(&self) -> &[UseStatementClause] {
        &self.clauses
    }

    pub fn kind(&self) -> UseStatementType {
        self.kind
    }
}

impl fmt::Display for UseStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("use ")?;
        if let Some(keyword) = self.kind.keyword() {
            write!(f, "{} ", keyword)?;
        }
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", clause)?;
        }
        f.write_str(";")
    }
}

// Deserialization goes through the checked constructors

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawUseStatementClause {
    symbol: Symbol,
    alias: Option<SmolStr>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawUseStatementClause> for UseStatementClause {
    type Error = UseStatementError;

    fn try_from(raw: RawUseStatementClause) -> Result<Self, Self::Error> {
        Self::new(raw.symbol, raw.alias)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawUseStatement {
    clauses: Vec<UseStatementClause>,
    kind: UseStatementType,
}

#[cfg(feature = "serde")]
impl TryFrom<RawUseStatement> for UseStatement {
    type Error = UseStatementError;

    fn try_from(raw: RawUseStatement) -> Result<Self, Self::Error> {
        Self::new(raw.clauses, raw.kind)
    }
}
