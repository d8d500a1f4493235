//! Resolution context generation.
//!
//! Given a namespace and the symbols some code needs, decide which symbols
//! must be imported and pick collision-free aliases for them.
//!
//! ## Alias collisions
//!
//! Every import starts out under its last atom. Imports sharing an alias
//! borrow one more atom from the end of their own symbol per generation:
//!
//! ```text
//! \Bar\Baz\Qux        Qux → BazQux → BarBazQux
//! \Doom\Bar\Baz\Qux   Qux → BazQux → BarBazQux → DoomBarBazQux
//! \Foo\Bar\Baz\Qux    Qux → BazQux → BarBazQux → FooBarBazQux
//! ```
//!
//! Buckets are rebuilt from scratch every generation; the loop stops once a
//! generation changes nothing. Imports that exhaust their atoms while still
//! colliding get the smallest free numeric suffix.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::{debug, warn};

use super::{ResolutionContext, UseStatement, UseStatementClause, UseStatementType};
use crate::symbol::Symbol;

/// Symbols at most this many atoms below the namespace are referenced
/// relatively instead of imported.
pub const DEFAULT_MAX_REFERENCE_ATOMS: usize = 1;

/// Builds minimal [`ResolutionContext`]s for a set of symbols.
#[derive(Debug, Clone)]
pub struct ResolutionContextGenerator {
    max_reference_atoms: usize,
}

impl Default for ResolutionContextGenerator {
    fn default() -> Self {
        Self {
            max_reference_atoms: DEFAULT_MAX_REFERENCE_ATOMS,
        }
    }
}

impl ResolutionContextGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how deep below the namespace a symbol may be and still be
    /// referenced without an import.
    pub fn with_max_reference_atoms(mut self, max_reference_atoms: usize) -> Self {
        self.max_reference_atoms = max_reference_atoms;
        self
    }

    pub fn max_reference_atoms(&self) -> usize {
        self.max_reference_atoms
    }

    /// Generate a context under `primary_namespace` (global when `None`)
    /// importing whatever the given symbols need.
    ///
    /// Statements are emitted one clause each, sorted by symbol, types
    /// first, then functions, then constants.
    pub fn generate(
        &self,
        primary_namespace: Option<&Symbol>,
        type_symbols: &[Symbol],
        function_symbols: &[Symbol],
        constant_symbols: &[Symbol],
    ) -> ResolutionContext {
        let namespace = primary_namespace
            .map(|namespace| namespace.to_qualified().normalize())
            .unwrap_or_else(Symbol::global);

        let mut use_statements = Vec::new();
        for (kind, symbols) in [
            (UseStatementType::Type, type_symbols),
            (UseStatementType::Function, function_symbols),
            (UseStatementType::Constant, constant_symbols),
        ] {
            use_statements.extend(self.generate_statements(&namespace, kind, symbols));
        }

        debug!(
            namespace = %namespace,
            use_statements = use_statements.len(),
            "generated resolution context"
        );
        ResolutionContext::new(namespace, use_statements)
    }

    fn generate_statements(
        &self,
        namespace: &Symbol,
        kind: UseStatementType,
        symbols: &[Symbol],
    ) -> Vec<UseStatement> {
        let mut imports: IndexMap<String, Symbol> = IndexMap::new();
        let mut reserved: FxHashSet<SmolStr> = FxHashSet::default();

        for symbol in symbols {
            let symbol = symbol.to_qualified().normalize();
            if symbol.is_global() {
                continue;
            }
            if self.is_relatively_reachable(namespace, &symbol) {
                // Relative references start with this atom; no import may shadow it
                if let Some(first) = symbol.atoms().get(namespace.atom_count()) {
                    reserved.insert(first.clone());
                }
                continue;
            }
            imports.entry(symbol.to_string()).or_insert(symbol);
        }

        imports.sort_keys();
        let symbols: Vec<Symbol> = imports.into_values().collect();
        let aliases = resolve_aliases(&symbols, &reserved);

        symbols
            .into_iter()
            .zip(aliases)
            .filter_map(|(symbol, alias)| match UseStatementClause::new(symbol, alias) {
                Ok(clause) => Some(UseStatement::single(clause, kind)),
                Err(error) => {
                    warn!(%error, "skipping generated use clause");
                    None
                }
            })
            .collect()
    }

    fn is_relatively_reachable(&self, namespace: &Symbol, symbol: &Symbol) -> bool {
        namespace.is_ancestor_of(symbol)
            && symbol.atom_count() - namespace.atom_count() <= self.max_reference_atoms
    }
}

/// Alias built from the last `borrowed + 1` atoms of `symbol`.
fn alias_at(symbol: &Symbol, borrowed: usize) -> SmolStr {
    let atoms = symbol.atoms();
    let start = atoms.len().saturating_sub(borrowed + 1);
    SmolStr::from(atoms[start..].concat())
}

fn bucket_by_alias(symbols: &[Symbol], borrowed: &[usize]) -> IndexMap<SmolStr, Vec<usize>> {
    let mut buckets: IndexMap<SmolStr, Vec<usize>> = IndexMap::new();
    for (i, symbol) in symbols.iter().enumerate() {
        buckets.entry(alias_at(symbol, borrowed[i])).or_default().push(i);
    }
    buckets
}

/// Pick an explicit alias (or `None` for the plain last atom) per symbol so
/// that no two symbols, and no reserved name, share an effective alias.
fn resolve_aliases(symbols: &[Symbol], reserved: &FxHashSet<SmolStr>) -> Vec<Option<SmolStr>> {
    let mut borrowed = vec![0usize; symbols.len()];

    let mut generation = 0usize;
    loop {
        let buckets = bucket_by_alias(symbols, &borrowed);
        let mut changed = false;
        for (alias, members) in &buckets {
            if members.len() < 2 && !reserved.contains(alias) {
                continue;
            }
            for &i in members {
                if borrowed[i] + 1 < symbols[i].atom_count() {
                    borrowed[i] += 1;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
        generation += 1;
        debug!(generation, "extended colliding aliases");
    }

    let mut aliases: Vec<SmolStr> = symbols
        .iter()
        .zip(&borrowed)
        .map(|(symbol, &borrowed)| alias_at(symbol, borrowed))
        .collect();

    // Exhausted collisions: first holder keeps the alias, the rest get suffixes
    let mut taken: FxHashSet<SmolStr> = reserved.clone();
    let mut exhausted = Vec::new();
    for (alias, members) in bucket_by_alias(symbols, &borrowed) {
        let mut members = members.into_iter();
        if !reserved.contains(&alias) {
            members.next();
            taken.insert(alias);
        }
        exhausted.extend(members);
    }
    for i in exhausted {
        let base = aliases[i].clone();
        let mut suffix = 2usize;
        let alias = loop {
            let candidate = SmolStr::from(format!("{base}{suffix}"));
            if !taken.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        debug!(symbol = %symbols[i], %alias, "suffixed exhausted alias");
        taken.insert(alias.clone());
        aliases[i] = alias;
    }

    symbols
        .iter()
        .zip(aliases)
        .map(|(symbol, alias)| {
            if symbol.last_atom() == Some(alias.as_str()) {
                None
            } else {
                Some(alias)
            }
        })
        .collect()
}
