//! Rules compared against each other (or against themselves) must
//! not share variables by accident.  A `Renamer` hands out tags, and
//! renames every variable `N` in a rule to `N#tag`, keeping its
//! quantifier.  Parsed variable names can't contain `#`, so renamed
//! variables never collide with user-written ones, and copies renamed
//! with different tags never collide with each other.
//!
//! The tag counter belongs to the renamer rather than the process:
//! each check (and thus each worker) owns its renamer.
use crate::model::{Literal, Rule, Term};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Renamer {
    next_tag: usize,
}

impl Renamer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a tag never returned before by this renamer.
    pub fn fresh_tag(&mut self) -> usize {
        let ret = self.next_tag;
        self.next_tag += 1;
        ret
    }

    /// Returns a copy of `rule` with all variables renamed under a
    /// fresh tag.
    pub fn rename_rule(&mut self, rule: &Rule) -> Rule {
        let tag = self.fresh_tag();
        rename_rule(rule, tag)
    }
}

#[must_use]
pub fn rename_term(term: &Term, tag: usize) -> Term {
    if term.is_variable() {
        term.with_variable_name(format!("{}#{}", term.name(), tag))
    } else {
        term.clone()
    }
}

#[must_use]
pub fn rename_literal(literal: &Literal, tag: usize) -> Literal {
    literal.map_terms(|term| rename_term(term, tag))
}

#[must_use]
pub fn rename_rule(rule: &Rule, tag: usize) -> Rule {
    Rule::from_parts(
        rule.head().iter().map(|lit| rename_literal(lit, tag)).collect(),
        rule.body().iter().map(|lit| rename_literal(lit, tag)).collect(),
    )
}

/// Renames the variables of `rule` to `V0`, `V1`, ... in order of
/// first occurrence (head, then body), keeping quantifiers.  Rules
/// that only differ in their choice of variable names have the same
/// canonical form.
#[must_use]
pub fn canonicalize(rule: &Rule) -> Rule {
    let mut names: HashMap<Term, String> = HashMap::new();
    let mut rename = |term: &Term| {
        if !term.is_variable() {
            return term.clone();
        }

        let next = names.len();
        let name = names
            .entry(term.clone())
            .or_insert_with(|| format!("V{}", next))
            .clone();
        term.with_variable_name(name)
    };

    let head = rule
        .head()
        .iter()
        .map(|lit| lit.map_terms(&mut rename))
        .collect();
    let body = rule
        .body()
        .iter()
        .map(|lit| lit.map_terms(&mut rename))
        .collect();
    Rule::from_parts(head, body)
}

#[cfg(test)]
fn rule(text: &str) -> Rule {
    crate::parse::parse_rule(text).expect("ok")
}

#[test]
fn test_rename_keeps_structure() {
    let original = rule("q(?X, !Y, a) :- p(?X, \"s\"@en) .");
    let mut renamer = Renamer::new();
    let renamed = renamer.rename_rule(&original);

    assert_eq!(renamed.to_string(), "q(?X#0, !Y#0, a) :- p(?X#0, \"s\"@en) .");
    assert_eq!(renamed.existential_variables(), vec![Term::existential("Y#0")]);
    assert_eq!(renamed.pieces(), original.pieces());
}

#[test]
fn test_distinct_tags_never_collide() {
    let original = rule("q(?X, !Y) :- p(?X) .");
    let mut renamer = Renamer::new();
    let first = renamer.rename_rule(&original);
    let second = renamer.rename_rule(&original);

    assert_ne!(first, second);
    for var in first.universal_variables().iter().chain(first.existential_variables().iter()) {
        assert!(!second.universal_variables().contains(var));
        assert!(!second.existential_variables().contains(var));
    }
}

#[test]
fn test_canonicalize() {
    let left = rule("q(?A, !B) :- p(?A, ?C) .");
    let right = rule("q(?U, !W) :- p(?U, ?Z) .");
    let other = rule("q(?U, !W) :- p(?Z, ?U) .");

    assert_eq!(canonicalize(&left), canonicalize(&right));
    assert_ne!(canonicalize(&left), canonicalize(&other));
    assert_eq!(canonicalize(&left).to_string(), "q(?V0, !V1) :- p(?V0, ?V2) .");
    assert_eq!(canonicalize(&Renamer::new().rename_rule(&left)), canonicalize(&left));
}
