//! Boolean conjunctive queries: is there a way to map every query
//! atom onto an instance fact, such that the whole query unifies with
//! the facts it's mapped to?
//!
//! We simply try every total assignment from query positions to
//! instance positions, in odometer order, and stop at the first one
//! that unifies.  Polarity is ignored: instances and queries are
//! built from atoms.
use crate::model::{Literal, Predicate};
use crate::unification::Unifier;
use assignmerator::Assignments;
use std::collections::HashSet;
use tracing::trace;

/// Returns true iff `instance` entails the conjunctive query `query`.
/// The empty query is always entailed.
#[must_use]
pub fn query(instance: &[Literal], query: &[Literal]) -> bool {
    if query.is_empty() {
        return true;
    }

    let available: HashSet<&Predicate> = instance.iter().map(Literal::predicate).collect();
    if !query.iter().all(|atom| available.contains(atom.predicate())) {
        return false;
    }

    for assignment in Assignments::total(query.len(), instance.len()) {
        let mut unifier = Unifier::new();
        let mut success = true;

        for pair in assignment.matches() {
            if !unifier.unify_atoms(&query[pair.assignee], &instance[pair.origin]) {
                success = false;
                break;
            }
        }

        if success {
            trace!(?assignment, "query entailed");
            return true;
        }
    }

    false
}

#[cfg(test)]
fn literals(text: &[&str]) -> Vec<Literal> {
    text.iter()
        .map(|lit| crate::parse::parse_literal(lit).expect("ok"))
        .collect()
}

#[test]
fn test_empty_query() {
    assert!(query(&[], &[]));
    assert!(query(&literals(&["p(a)"]), &[]));
    assert!(!query(&[], &literals(&["p(a)"])));
}

#[test]
fn test_ground_query() {
    let instance = literals(&["p(a, b)", "q(b)"]);

    assert!(query(&instance, &literals(&["q(b)", "p(a, b)"])));
    assert!(!query(&instance, &literals(&["p(b, a)"])));
    assert!(!query(&instance, &literals(&["r(a)"])));
}

#[test]
fn test_query_variables() {
    let instance = literals(&["p(a, _:n)", "q(_:n)", "q(c)"]);

    assert!(query(&instance, &literals(&["p(a, !Y)", "q(!Y)"])));
    assert!(query(&instance, &literals(&["q(!Y)", "q(!Z)"])));
    assert!(!query(&instance, &literals(&["p(!Y, !Y)"])));
    assert!(!query(&literals(&["p(a, b)", "q(c)"]), &literals(&["p(a, !Y)", "q(!Y)"])));
}

#[test]
fn test_polarity_ignored() {
    assert!(query(&literals(&["~p(a)"]), &literals(&["p(a)"])));
}

#[test]
fn test_arity_distinguishes_predicates() {
    assert!(!query(&literals(&["p(a)"]), &literals(&["p(a, a)"])));
}
