//! Conditions shared by the reliance and restraint checks, once a
//! candidate unifier has been found.
use crate::matching;
use crate::model::{Literal, Term};
use crate::unification::{facts, query, Unifier};

/// Returns true iff some existential variable in `existentials` was
/// merged with a ground term, with another variable of
/// `existentials`, or with one of the variables in `others`.  Fresh
/// nulls can't coincide with pre-existing values, nor with each
/// other.
pub(crate) fn existentials_demoted(unifier: &Unifier, existentials: &[Term], others: &[Term]) -> bool {
    for (index, var) in existentials.iter().enumerate() {
        if unifier.resolve(var).is_ground() {
            return true;
        }

        if existentials[index + 1..]
            .iter()
            .any(|other| unifier.same_class(var, other))
        {
            return true;
        }

        if others.iter().any(|other| unifier.same_class(var, other)) {
            return true;
        }
    }

    false
}

/// Returns true iff the facts in `context`, after substitution, entail
/// `goal`, where `goal`'s existential variables (after substitution)
/// are query variables.
pub(crate) fn entailed(unifier: &Unifier, context: &[Literal], goal: &[Literal]) -> bool {
    let instance = facts(unifier.apply_literals(context).iter());
    let goal = query(unifier.apply_literals(goal).iter());

    matching::query(&instance, &goal)
}

/// A rule application is useful iff its head isn't already entailed
/// by `context`: the restricted chase skips redundant applications.
pub(crate) fn applicable(unifier: &Unifier, context: &[Literal], head: &[Literal]) -> bool {
    !entailed(unifier, context, head)
}

/// Returns the variables of `literals`, without duplicates.
pub(crate) fn variables_of(literals: &[Literal]) -> Vec<Term> {
    let mut ret: Vec<Term> = Vec::new();
    for var in literals.iter().flat_map(Literal::variables) {
        if !ret.contains(var) {
            ret.push(var.clone());
        }
    }

    ret
}

#[cfg(test)]
fn lit(text: &str) -> Literal {
    crate::parse::parse_literal(text).expect("ok")
}

#[test]
fn test_demoted_by_constant() {
    let mut unifier = Unifier::new();
    assert!(unifier.unify_literals(&lit("q(!Y)"), &lit("q(a)")));

    assert!(existentials_demoted(&unifier, &[Term::existential("Y")], &[]));
}

#[test]
fn test_demoted_by_variables() {
    let y = Term::existential("Y");
    let z = Term::existential("Z");
    let x = Term::universal("X");

    let mut merged = Unifier::new();
    assert!(merged.unify_literals(&lit("q(!Y, !Z)"), &lit("q(?W, ?W)")));
    assert!(existentials_demoted(&merged, &[y.clone(), z.clone()], &[]));

    let mut universal = Unifier::new();
    assert!(universal.unify_literals(&lit("q(!Y)"), &lit("q(?X)")));
    assert!(existentials_demoted(&universal, &[y.clone()], &[x.clone()]));
    assert!(!existentials_demoted(&universal, &[y], &[]));
}

#[test]
fn test_applicable() {
    let unifier = Unifier::new();
    let body = vec![lit("p(?X)")];

    assert!(applicable(&unifier, &body, &[lit("q(?X, !Y)")]));
    assert!(!applicable(
        &unifier,
        &[lit("p(?X)"), lit("q(?X, ?Z)")],
        &[lit("q(?X, !Y)")]
    ));
    assert!(applicable(
        &unifier,
        &[lit("p(?X)"), lit("q(?Z, ?X)")],
        &[lit("q(?X, !Y)")]
    ));
}

#[test]
fn test_variables_of() {
    assert_eq!(
        variables_of(&[lit("p(?X, a, ?Y)"), lit("q(?Y, ?X)")]),
        vec![Term::universal("X"), Term::universal("Y")]
    );
}
