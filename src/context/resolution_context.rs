//! Resolution contexts: a namespace plus its active use statements.
//!
//! A [`ResolutionContext`] is enough to resolve any symbol reference that
//! appears lexically inside one namespace block. Resolution consults a
//! first-atom index built from the use statements' effective aliases; the
//! index is built lazily on first use and cached for the life of the
//! (immutable) context.

use std::fmt;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::{UseStatement, UseStatementClause, UseStatementType};
use crate::symbol::{PARENT_ATOM, Symbol};

/// Effective alias → imported symbol, one map per [`UseStatementType`].
#[derive(Clone, Debug, Default)]
struct AliasIndex {
    by_type: [FxHashMap<SmolStr, Symbol>; 3],
}

impl AliasIndex {
    fn build(use_statements: &[UseStatement]) -> Self {
        let mut index = Self::default();
        for statement in use_statements {
            let map = &mut index.by_type[statement.kind().index()];
            for clause in statement.clauses() {
                // The first import of an alias wins
                map.entry(SmolStr::new(clause.effective_alias()))
                    .or_insert_with(|| clause.symbol().clone());
            }
        }
        index
    }

    fn get(&self, atom: &str, kind: UseStatementType) -> Option<&Symbol> {
        self.by_type[kind.index()].get(atom)
    }
}

/// A primary namespace and the use statements in effect inside it.
#[derive(Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "RawResolutionContext")
)]
pub struct ResolutionContext {
    primary_namespace: Symbol,
    use_statements: Vec<UseStatement>,
    #[cfg_attr(feature = "serde", serde(skip))]
    index: OnceLock<AliasIndex>,
}

impl ResolutionContext {
    /// Create a context. The namespace is made qualified and normalized.
    pub fn new(primary_namespace: Symbol, use_statements: Vec<UseStatement>) -> Self {
        Self {
            primary_namespace: primary_namespace.to_qualified().normalize(),
            use_statements,
            index: OnceLock::new(),
        }
    }

    /// The global namespace with no use statements.
    pub fn global() -> Self {
        Self::new(Symbol::global(), Vec::new())
    }

    pub fn primary_namespace(&self) -> &Symbol {
        &self.primary_namespace
    }

    pub fn use_statements(&self) -> &[UseStatement] {
        &self.use_statements
    }

    /// Use statements of one type, in stored order.
    pub fn use_statements_by_type(
        &self,
        kind: UseStatementType,
    ) -> impl Iterator<Item = &UseStatement> + '_ {
        self.use_statements
            .iter()
            .filter(move |statement| statement.kind() == kind)
    }

    /// The symbol imported under `atom` for the given type, if any.
    pub fn symbol_by_first_atom(&self, atom: &str, kind: UseStatementType) -> Option<&Symbol> {
        self.index().get(atom, kind)
    }

    fn index(&self) -> &AliasIndex {
        self.index
            .get_or_init(|| AliasIndex::build(&self.use_statements))
    }

    /// Resolve a class, interface, trait, or namespace reference.
    pub fn resolve(&self, reference: &Symbol) -> Symbol {
        self.resolve_as(UseStatementType::Type, reference)
    }

    /// Resolve a function reference.
    pub fn resolve_function(&self, reference: &Symbol) -> Symbol {
        self.resolve_as(UseStatementType::Function, reference)
    }

    /// Resolve a constant reference.
    pub fn resolve_constant(&self, reference: &Symbol) -> Symbol {
        self.resolve_as(UseStatementType::Constant, reference)
    }

    /// Resolve `reference` to a qualified symbol.
    ///
    /// Qualified input is returned normalized. Otherwise the first atom is
    /// looked up among the imported aliases: single-atom references use the
    /// index for `kind`, longer references use the type index (the first atom
    /// names a namespace or class). On a hit the imported symbol replaces the
    /// first atom; on a miss the reference is joined onto the primary
    /// namespace.
    pub fn resolve_as(&self, kind: UseStatementType, reference: &Symbol) -> Symbol {
        if reference.is_qualified() {
            return reference.normalize();
        }

        let lookup = if reference.atom_count() > 1 {
            UseStatementType::Type
        } else {
            kind
        };

        if let Some(first) = reference.atom_at(0) {
            if first != PARENT_ATOM {
                if let Some(imported) = self.symbol_by_first_atom(first, lookup) {
                    return imported.join(&reference.slice_atoms(1, None)).normalize();
                }
            }
        }

        self.primary_namespace.join(reference).normalize()
    }

    /// The shortest reference that resolves back to `symbol` in this context.
    ///
    /// Candidates come from imported aliases (exact or as a namespace prefix)
    /// and from the primary namespace; when none round-trips, the qualified
    /// symbol itself is returned.
    pub fn relative_reference(&self, symbol: &Symbol, kind: UseStatementType) -> Symbol {
        let symbol = symbol.to_qualified().normalize();
        let mut candidates: Vec<Symbol> = Vec::new();

        for statement in &self.use_statements {
            for clause in statement.clauses() {
                if let Some(candidate) = alias_candidate(clause, statement.kind(), &symbol, kind) {
                    candidates.push(candidate);
                }
            }
        }

        if self.primary_namespace.is_ancestor_of(&symbol) {
            candidates.push(
                symbol
                    .slice_atoms(self.primary_namespace.atom_count(), None)
                    .to_reference(),
            );
        }

        candidates
            .into_iter()
            .filter(|candidate| self.resolve_as(kind, candidate) == symbol)
            .min_by(|a, b| {
                a.atom_count()
                    .cmp(&b.atom_count())
                    .then_with(|| a.to_string().len().cmp(&b.to_string().len()))
                    .then_with(|| a.to_string().cmp(&b.to_string()))
            })
            .unwrap_or(symbol)
    }
}

/// A reference to `symbol` through `clause`, if the clause can produce one.
fn alias_candidate(
    clause: &UseStatementClause,
    clause_kind: UseStatementType,
    symbol: &Symbol,
    kind: UseStatementType,
) -> Option<Symbol> {
    let alias = SmolStr::new(clause.effective_alias());
    if clause_kind == kind && clause.symbol() == symbol {
        return Some(Symbol::Reference(vec![alias]));
    }
    if clause_kind == UseStatementType::Type && clause.symbol().is_ancestor_of(symbol) {
        let mut atoms = vec![alias];
        atoms.extend(
            symbol.atoms()[clause.symbol().atom_count()..]
                .iter()
                .cloned(),
        );
        return Some(Symbol::Reference(atoms));
    }
    None
}

impl Default for ResolutionContext {
    fn default() -> Self {
        Self::global()
    }
}

impl PartialEq for ResolutionContext {
    fn eq(&self, other: &Self) -> bool {
        self.primary_namespace == other.primary_namespace
            && self.use_statements == other.use_statements
    }
}

impl Eq for ResolutionContext {}

/// Wire form of a [`ResolutionContext`]; the namespace is normalized on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawResolutionContext {
    primary_namespace: Symbol,
    use_statements: Vec<UseStatement>,
}

#[cfg(feature = "serde")]
impl From<RawResolutionContext> for ResolutionContext {
    fn from(raw: RawResolutionContext) -> Self {
        Self::new(raw.primary_namespace, raw.use_statements)
    }
}

impl fmt::Debug for ResolutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionContext")
            .field("primary_namespace", &self.primary_namespace)
            .field("use_statements", &self.use_statements)
            .finish()
    }
}
