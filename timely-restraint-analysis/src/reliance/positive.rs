//! Positive reliance: `rule2` positively relies on `rule1` when
//! applying `rule1` can produce facts that make `rule2` newly
//! applicable.
//!
//! We look for a partial assignment from `rule2`'s positive body onto
//! `rule1`'s head that unifies, keeps `rule1`'s existential variables
//! fresh, and leaves `rule1` applicable in the smallest context where
//! both rules fire: `rule1`'s body, the rest of `rule2`'s body, and
//! `rule2`'s head.
use super::conditions::{applicable, existentials_demoted, variables_of};
use crate::model::{Literal, Rule};
use crate::unification::{Renamer, Unifier};
use assignmerator::{select, Assignments};
use tracing::{debug, trace};

/// Returns true iff `rule2` positively relies on `rule1`.
#[must_use]
pub fn relies_positively(rule1: &Rule, rule2: &Rule) -> bool {
    let mut renamer = Renamer::new();
    let rule1 = renamer.rename_rule(rule1);
    let rule2 = renamer.rename_rule(rule2);

    let ret = relies_positively_renamed(&rule1, &rule2);
    debug!(%rule1, %rule2, relies = ret, "positive reliance");
    ret
}

fn relies_positively_renamed(rule1: &Rule, rule2: &Rule) -> bool {
    let head1 = rule1.head();
    let body1 = rule1.positive_body();
    let body2 = rule2.positive_body();
    let existentials1 = rule1.existential_variables();
    let universals1 = rule1.universal_variables();

    for assignment in Assignments::new(body2.len(), head1.len()) {
        let unifier = Unifier::for_assignment(&body2, head1, &assignment);
        if !unifier.success() {
            continue;
        }

        let unmatched2 = select(&body2, &assignment.unused_assignee_positions());
        let mut others = universals1.clone();
        others.extend(variables_of(&unmatched2));
        if existentials_demoted(&unifier, &existentials1, &others) {
            trace!(?assignment, "rejected: existential demoted");
            continue;
        }

        let context: Vec<Literal> = body1
            .iter()
            .chain(unmatched2.iter())
            .chain(rule2.head().iter())
            .cloned()
            .collect();
        if applicable(&unifier, &context, head1) {
            trace!(?assignment, "accepted");
            return true;
        }

        trace!(?assignment, "rejected: redundant application");
    }

    false
}

#[cfg(test)]
fn rule(text: &str) -> Rule {
    crate::parse::parse_rule(text).expect("ok")
}

#[test]
fn test_chain() {
    let rule_q = rule("q(?X) :- p(?X) .");
    let rule_r = rule("r(?X) :- q(?X) .");

    assert!(relies_positively(&rule_q, &rule_r));
    assert!(!relies_positively(&rule_r, &rule_q));
}

#[test]
fn test_self_reliance() {
    assert!(relies_positively(
        &rule("e(?Y, !Z) :- e(?X, ?Y) ."),
        &rule("e(?Y, !Z) :- e(?X, ?Y) .")
    ));
    // The second rule would need `q(a)`, but the first only derives
    // `q(b)`.
    assert!(!relies_positively(&rule("q(b) :- p(?X) ."), &rule("r(?X) :- q(a), p(?X) .")));
}

#[test]
fn test_constant_against_existential() {
    // Fresh nulls never equal constants.
    assert!(!relies_positively(&rule("q(?X, !Y) :- p(?X) ."), &rule("r(?X) :- q(?X, c) .")));
    assert!(relies_positively(&rule("q(?X, !Y) :- p(?X) ."), &rule("r(?X) :- q(c, ?X) .")));
}

#[test]
fn test_existential_joined_with_unmatched_body() {
    // `?Y` would have to be a fresh null and also match `s(?Y)`,
    // which only holds for pre-existing values.
    assert!(!relies_positively(
        &rule("q(?X, !Y) :- p(?X) ."),
        &rule("r(?Y) :- q(?X, ?Y), s(?Y) .")
    ));
    assert!(relies_positively(
        &rule("q(?X, !Y) :- p(?X) ."),
        &rule("r(?Y) :- q(?X, ?Y), s(?X) .")
    ));
}

#[test]
fn test_redundant_application() {
    // Whenever rule2 could use the fact, rule2's own head already
    // satisfies rule1's head.
    assert!(!relies_positively(
        &rule("q(?X, !Y) :- p(?X) ."),
        &rule("q(?X, ?X) :- q(?X, ?Y) .")
    ));
}
