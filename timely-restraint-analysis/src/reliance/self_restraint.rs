//! Self-restraint: does a rule restrain itself?  Besides comparing the
//! rule with a renamed copy of itself, we also look at the rule's
//! head split in two, since one half of the head may be satisfied by
//! an earlier application's other half.
use super::conditions::applicable;
use super::restraint::restrains_renamed;
use crate::model::{Literal, Rule};
use crate::unification::{Renamer, Unifier};
use assignmerator::{select, Splits};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Returns true iff `rule` restrains itself.
///
/// # Panics
///
/// Panics if `rule` has more than 63 existential variables or head
/// literals.
#[must_use]
pub fn self_restrains(rule: &Rule) -> bool {
    let ret = self_restrains_impl(rule);
    debug!(%rule, restrains = ret, "self restraint");
    ret
}

fn self_restrains_impl(rule: &Rule) -> bool {
    if !rule.has_existentials() {
        return false;
    }

    if !applicable(&Unifier::new(), &rule.positive_body(), rule.head()) {
        trace!("rule is never applicable");
        return false;
    }

    if rule.has_unconnected_piece() {
        trace!("unconnected piece");
        return true;
    }

    let mut renamer = Renamer::new();
    if restrains_renamed(&renamer.rename_rule(rule), &renamer.rename_rule(rule)) {
        return true;
    }

    let head = rule.head();
    for (left, right) in Splits::new(head.len()) {
        if !shares_predicate(head, &left, &right) {
            continue;
        }

        let variant1 = Rule::from_parts(select(head, &left), rule.body().to_vec());
        let variant2 = Rule::from_parts(select(head, &right), rule.body().to_vec());
        if restrains_renamed(&renamer.rename_rule(&variant1), &renamer.rename_rule(&variant2)) {
            trace!(?left, ?right, "head split restrains");
            return true;
        }
    }

    false
}

fn shares_predicate(head: &[Literal], left: &[usize], right: &[usize]) -> bool {
    let predicates: HashSet<_> = left.iter().map(|index| head[*index].predicate()).collect();
    right
        .iter()
        .any(|index| predicates.contains(head[*index].predicate()))
}

#[cfg(test)]
fn rule(text: &str) -> Rule {
    crate::parse::parse_rule(text).expect("ok")
}

#[test]
fn test_single_piece() {
    assert!(!self_restrains(&rule("q(?X, !Y) :- p(?X) .")));
}

#[test]
fn test_unconnected_piece() {
    assert!(self_restrains(&rule("b(!Y) :- a(?X) .")));
}

#[test]
fn test_no_existentials() {
    assert!(!self_restrains(&rule("q(?X) :- p(?X) .")));
    assert!(!self_restrains(&rule("b(c) :- a(?X) .")));
}

#[test]
fn test_never_applicable() {
    // The body already satisfies the head.
    assert!(!self_restrains(&rule("q(?X, !Y), b(!Z) :- q(?X, ?W), b(?W) .")));
}

#[test]
fn test_shared_null() {
    assert!(self_restrains(&rule("q(?X, !Z), q(?Y, !Z) :- p(?X, ?Y) .")));
}

#[test]
fn test_restrains_delegates_on_identical_rules() {
    let shared = rule("q(?X, !Z), q(?Y, !Z) :- p(?X, ?Y) .");
    let single = rule("q(?X, !Y) :- p(?X) .");

    assert_eq!(super::restrains(&shared, &shared), self_restrains(&shared));
    assert_eq!(super::restrains(&single, &single), self_restrains(&single));
}

#[test]
#[should_panic]
fn test_too_many_existentials() {
    let _ = self_restrains(&super::restraint::wide_rule());
}
