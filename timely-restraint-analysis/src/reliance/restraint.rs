//! Restraint: `rule1` restrains `rule2` when some application of
//! `rule2` can be made redundant by an earlier application of `rule1`
//! that `rule2`'s own nulls could otherwise have been used for.
//!
//! We pick a set of `rule2`'s existential variables, a set of head
//! literals of `rule2` mentioning them, and a partial assignment of
//! those literals onto `rule1`'s head.  A unifying candidate is
//! accepted when
//!
//!  1. `rule1` is still applicable once both bodies and `rule2`'s head
//!     hold;
//!  2. `rule1`'s existential variables stay fresh (distinct from any
//!     ground term, universal variable, or each other);
//!  3. no existential variable of `rule2` that survives in an
//!     unmatched `rule2` head literal was merged with one of `rule1`;
//!  4. the matched `rule2` head literals are entailed by the `rule1`
//!     head literals they were matched onto.
use super::conditions::{applicable, entailed, existentials_demoted};
use crate::model::{Literal, Rule};
use crate::unification::{Renamer, Unifier};
use assignmerator::{select, Assignments, Subsets};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Returns true iff `rule1` restrains `rule2`.
///
/// # Panics
///
/// Panics if `rule2` has more than 63 existential variables, or more
/// than 63 head literals mentioning them.
#[must_use]
pub fn restrains(rule1: &Rule, rule2: &Rule) -> bool {
    if !rule2.has_existentials() {
        return false;
    }

    if rule1 == rule2 {
        return super::self_restrains(rule1);
    }

    let mut renamer = Renamer::new();
    let rule1 = renamer.rename_rule(rule1);
    let rule2 = renamer.rename_rule(rule2);

    let ret = restrains_renamed(&rule1, &rule2);
    debug!(%rule1, %rule2, restrains = ret, "restraint");
    ret
}

/// Restraint check proper, for rules that do not share variables.
pub(crate) fn restrains_renamed(rule1: &Rule, rule2: &Rule) -> bool {
    let head2 = rule2.head();
    let existentials2 = rule2.existential_variables();

    let mut tried: HashSet<Vec<usize>> = HashSet::new();
    for chosen in Subsets::new(existentials2.len()) {
        let chosen = select(&existentials2, &chosen);
        let candidates: Vec<usize> = (0..head2.len())
            .filter(|index| head2[*index].variables().any(|var| chosen.contains(var)))
            .collect();

        for subset in Subsets::new(candidates.len()) {
            let positions2 = select(&candidates, &subset);
            if !tried.insert(positions2.clone()) {
                continue;
            }

            if restrains_with(rule1, rule2, &positions2) {
                return true;
            }
        }
    }

    false
}

/// Tries every assignment of the `rule2` head literals at `positions2`
/// onto `rule1`'s head.
fn restrains_with(rule1: &Rule, rule2: &Rule, positions2: &[usize]) -> bool {
    let head1 = rule1.head();
    let head2 = rule2.head();
    let selected2 = select(head2, positions2);

    let existentials1 = rule1.existential_variables();
    let existentials2 = rule2.existential_variables();
    let mut universals = rule1.universal_variables();
    universals.extend(rule2.universal_variables());

    let bodies: Vec<Literal> = rule1
        .positive_body()
        .into_iter()
        .chain(rule2.positive_body().into_iter())
        .collect();
    let context1: Vec<Literal> = bodies.iter().chain(head2.iter()).cloned().collect();

    for assignment in Assignments::new(selected2.len(), head1.len()) {
        let unifier = Unifier::for_assignment(&selected2, head1, &assignment);
        if !unifier.success() {
            continue;
        }

        if existentials_demoted(&unifier, &existentials1, &universals) {
            trace!(?assignment, "rejected: existential demoted");
            continue;
        }

        let matched2: HashSet<usize> = assignment
            .used_assignee_positions()
            .into_iter()
            .map(|index| positions2[index])
            .collect();
        let head22: Vec<Literal> = (0..head2.len())
            .filter(|index| !matched2.contains(index))
            .map(|index| head2[index].clone())
            .collect();

        let leaked = existentials2
            .iter()
            .filter(|var| head22.iter().any(|lit| lit.variables().any(|v| v == *var)))
            .any(|var| {
                existentials1
                    .iter()
                    .any(|other| unifier.same_class(var, other))
            });
        if leaked {
            trace!(?assignment, "rejected: shared null reachable from unmatched head");
            continue;
        }

        let head11 = select(head1, &assignment.used_origin_positions());
        let head21 = select(&selected2, &assignment.used_assignee_positions());
        if !entailed(&unifier, &head11, &head21) {
            trace!(?assignment, "rejected: matched head not entailed");
            continue;
        }

        if !applicable(&unifier, &context1, head1) {
            trace!(?assignment, "rejected: redundant application");
            continue;
        }

        trace!(?assignment, "accepted");
        return true;
    }

    false
}

#[cfg(test)]
fn rule(text: &str) -> Rule {
    crate::parse::parse_rule(text).expect("ok")
}

#[test]
fn test_two_headed_restrains_single() {
    let rule2 = rule("q(?X, !Z), q(?Y, !Z) :- p(?X, ?Y) .");
    let rule1 = rule("q(?X, !Y) :- r(?X) .");

    assert!(restrains(&rule2, &rule1));
    assert!(!restrains(&rule1, &rule2));
}

#[test]
fn test_needs_existentials() {
    let datalog = rule("q(?X, ?X) :- p(?X) .");
    let existential = rule("q(?X, !Y) :- p(?X) .");

    assert!(!restrains(&existential, &datalog));
    assert!(!restrains(&datalog, &datalog));
}

#[test]
fn test_disjoint_predicates() {
    assert!(!restrains(&rule("a(?X, !Y) :- p(?X) ."), &rule("b(?X, !Y) :- p(?X) .")));
}

#[test]
fn test_redundant_restrainer() {
    // Both rules fire on `p`, and `rule2`'s head always satisfies the
    // head of `rule1`: `rule1` never gets to fire first.
    assert!(!restrains(
        &rule("q(?X, !Y) :- p(?X) ."),
        &rule("q(?X, !Y) :- p(?X), s(?X) .")
    ));
}

#[test]
fn test_satisfied_restrainer_head() {
    // Matching `!Y` against `c` makes rule2's head `q(?X, c)`, which
    // already satisfies rule1's head.
    assert!(!restrains(&rule("q(?X, c) :- p(?X) ."), &rule("q(?X, !Y) :- r(?X) .")));
}

#[test]
fn test_unmatched_head_literal() {
    // `s(?X)` is left out of the match: it does not need to follow
    // from anything for rule1's null to stand in for rule2's.
    let rule1 = rule("q(?X, !Y), u(?X) :- a(?X) .");

    assert!(restrains(&rule1, &rule("q(?X, !Z) :- b(?X) .")));
    assert!(restrains(&rule1, &rule("q(?X, !Z), s(?X) :- b(?X) .")));
}

#[test]
fn test_universal_cannot_match_fresh_null() {
    // Matching `p(?W, ?W, !Z)` onto `p(?X, !Y, !V)` merges `!Y` with
    // the universals `?X` and `?W`.
    assert!(!restrains(
        &rule("p(?X, !Y, !V), u(?X) :- a(?X) ."),
        &rule("p(?W, ?W, !Z) :- c(?W) .")
    ));
}

#[test]
fn test_null_shared_with_unmatched_head() {
    // `!Z` would be rule1's `!Y`, but `t(!Z)` still needs it and rule1
    // never derives `t`.
    assert!(!restrains(
        &rule("q(?X, !Y), u(?X) :- a(?X) ."),
        &rule("q(?W, !Z), t(!Z) :- b(?W) .")
    ));
}

#[cfg(test)]
pub(super) fn wide_rule() -> Rule {
    let nulls: Vec<String> = (0..64).map(|index| format!("!E{}", index)).collect();
    rule(&format!("e(?X, {}) :- a(?X) .", nulls.join(", ")))
}

#[test]
#[should_panic]
fn test_too_many_existentials() {
    let _ = restrains(&rule("e(?X, !Y) :- b(?X) ."), &wide_rule());
}
