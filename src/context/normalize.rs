//! Use statement normalization: dedupe, sort, and regroup by type.

use indexmap::IndexMap;

use super::{UseStatement, UseStatementClause, UseStatementType};

/// Remove duplicate clauses and sort the rest by their rendered form.
///
/// Two clauses are duplicates when they render identically (same symbol,
/// same alias). The result is deterministic and idempotent.
pub fn normalize_clauses<I>(clauses: I) -> Vec<UseStatementClause>
where
    I: IntoIterator<Item = UseStatementClause>,
{
    let mut unique: IndexMap<String, UseStatementClause> = IndexMap::new();
    for clause in clauses {
        unique.entry(clause.to_string()).or_insert(clause);
    }
    unique.sort_keys();
    unique.into_values().collect()
}

/// Split statements by type, normalize each bucket, and emit one
/// single-clause statement per surviving clause.
///
/// Output order is type, then function, then constant.
pub fn normalize(statements: &[UseStatement]) -> Vec<UseStatement> {
    let mut buckets: [Vec<UseStatementClause>; 3] = Default::default();
    for statement in statements {
        buckets[statement.kind().index()].extend(statement.clauses().iter().cloned());
    }

    UseStatementType::ALL
        .into_iter()
        .zip(buckets)
        .flat_map(|(kind, clauses)| {
            normalize_clauses(clauses)
                .into_iter()
                .map(move |clause| UseStatement::single(clause, kind))
        })
        .collect()
}
