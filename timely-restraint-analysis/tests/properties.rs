//! Property-based tests for the unifier and the reliance/restraint
//! checks, over small random rules.
use proptest::prelude::*;
use timely_restraint_analysis::model::Literal;
use timely_restraint_analysis::unification::{rename_rule, Unifier};
use timely_restraint_analysis::{parse_rule, relies_positively, restrains, self_restrains, Rule};

const BODY_TERMS: &[&str] = &["?X", "?Y", "a"];
const DATALOG_HEAD_TERMS: &[&str] = &["?X", "?Y", "a"];
const HEAD_TERMS: &[&str] = &["?X", "?Y", "!E", "!F", "a"];
const LIST_TERMS: &[&str] = &["?X", "?Y", "?Z", "!E", "a", "b"];

/// Literals over `p/2`, `q/2` and `r/1`, rendered as text.
fn arb_literal(terms: &'static [&'static str]) -> BoxedStrategy<String> {
    let term = || prop::sample::select(terms);
    prop_oneof![
        (term(), term()).prop_map(|(a, b)| format!("p({}, {})", a, b)),
        (term(), term()).prop_map(|(a, b)| format!("q({}, {})", a, b)),
        term().prop_map(|a| format!("r({})", a)),
    ]
    .boxed()
}

fn arb_rule(head_terms: &'static [&'static str]) -> impl Strategy<Value = Rule> {
    let head = prop::collection::vec(arb_literal(head_terms), 1..=2);
    let body = prop::collection::vec(arb_literal(BODY_TERMS), 1..=2);

    (head, body).prop_filter_map("unsafe rule", |(head, body)| {
        parse_rule(&format!("{} :- {} .", head.join(", "), body.join(", "))).ok()
    })
}

fn arb_literals(len: usize) -> impl Strategy<Value = Vec<Literal>> {
    prop::collection::vec(
        arb_literal(LIST_TERMS).prop_map(|text| {
            timely_restraint_analysis::parse::parse_literal(&text).expect("ok")
        }),
        len,
    )
}

fn reversed(literals: &[Literal]) -> Vec<Literal> {
    literals.iter().rev().cloned().collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_unification_ignores_list_order(
        (left, right) in (1..4usize).prop_flat_map(|len| (arb_literals(len), arb_literals(len)))
    ) {
        let forward = Unifier::for_lists(&left, &right);
        let backward = Unifier::for_lists(&reversed(&left), &reversed(&right));

        prop_assert_eq!(forward.success(), backward.success());
        if forward.success() {
            prop_assert_eq!(forward.classes(), backward.classes());
        }
    }

    #[test]
    fn prop_datalog_rules_never_self_restrain(rule in arb_rule(DATALOG_HEAD_TERMS)) {
        prop_assert!(!rule.has_existentials());
        prop_assert!(!self_restrains(&rule));
    }

    #[test]
    fn prop_restrained_rules_have_existentials(
        rule1 in arb_rule(HEAD_TERMS),
        rule2 in arb_rule(HEAD_TERMS),
    ) {
        if restrains(&rule1, &rule2) {
            prop_assert!(!rule2.existential_variables().is_empty());
        }
    }

    #[test]
    fn prop_renaming_invariance(
        rule in arb_rule(HEAD_TERMS),
        other in arb_rule(HEAD_TERMS),
    ) {
        prop_assume!(rule != other);

        for renamed in [rename_rule(&rule, 7), rename_rule(&rule, 8)].iter() {
            prop_assert_eq!(restrains(renamed, &other), restrains(&rule, &other));
            prop_assert_eq!(restrains(&other, renamed), restrains(&other, &rule));
            prop_assert_eq!(relies_positively(renamed, &other), relies_positively(&rule, &other));
            prop_assert_eq!(relies_positively(&other, renamed), relies_positively(&other, &rule));
        }
    }
}
