//! Instantiation turns literals into facts for a BCQ instance, or
//! into query atoms.  A variable `v` is grounded to the named null
//! labelled with `v`'s rendering (e.g., `_:?X#0`); parsed named nulls
//! can't contain `?` or `!`, so grounded variables stay distinct from
//! user-written nulls and from each other.
use crate::model::{Literal, Term};

#[must_use]
pub fn ground_variable(var: &Term) -> Term {
    if var.is_variable() {
        Term::NamedNull(var.to_string())
    } else {
        var.clone()
    }
}

/// Grounds every variable in `literal`.
#[must_use]
pub fn instantiate_fact(literal: &Literal) -> Literal {
    literal.map_terms(ground_variable)
}

/// Grounds universal variables, and keeps existential variables as
/// the query's (existentially quantified) variables.
#[must_use]
pub fn instantiate_query(literal: &Literal) -> Literal {
    literal.map_terms(|term| {
        if term.is_existential() {
            term.clone()
        } else {
            ground_variable(term)
        }
    })
}

#[must_use]
pub fn facts<'a>(literals: impl IntoIterator<Item = &'a Literal>) -> Vec<Literal> {
    literals.into_iter().map(instantiate_fact).collect()
}

#[must_use]
pub fn query<'a>(literals: impl IntoIterator<Item = &'a Literal>) -> Vec<Literal> {
    literals.into_iter().map(instantiate_query).collect()
}

#[test]
fn test_instantiate() {
    let literal = Literal::atom(
        "q",
        vec![Term::universal("X#0"), Term::existential("Y#0"), Term::constant("a")],
    );

    assert_eq!(instantiate_fact(&literal).to_string(), "q(_:?X#0, _:!Y#0, a)");
    assert_eq!(instantiate_query(&literal).to_string(), "q(_:?X#0, !Y#0, a)");
    assert!(instantiate_fact(&literal).terms().iter().all(Term::is_ground));
    assert_ne!(
        ground_variable(&Term::universal("X")),
        ground_variable(&Term::existential("X"))
    );
}
