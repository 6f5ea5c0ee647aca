//! A memo table for reliance and restraint verdicts.  Keys are built
//! from the canonical forms of the rules, so rules that only differ
//! in variable names share verdicts.  Each key is computed at most
//! once: concurrent lookups of a key that is being computed block
//! until the first computation is done.
use crate::model::Rule;
use crate::reliance::{relies_positively, restrains, self_restrains};
use crate::unification::canonicalize;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::trace;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Relation {
    /// The second rule positively relies on the first.
    PositiveReliance,
    /// The first rule restrains the second.
    Restraint,
    /// The first rule restrains itself; the second is ignored.
    SelfRestraint,
}

impl Relation {
    /// Evaluates the relation without any caching.
    #[must_use]
    pub fn evaluate(self, rule1: &Rule, rule2: &Rule) -> bool {
        match self {
            Relation::PositiveReliance => relies_positively(rule1, rule2),
            Relation::Restraint => restrains(rule1, rule2),
            Relation::SelfRestraint => self_restrains(rule1),
        }
    }
}

// `restrains` treats syntactically identical rules specially, so the
// key remembers whether the two rules were the same.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
struct Key {
    relation: Relation,
    rule1: Rule,
    rule2: Option<Rule>,
    identical: bool,
}

impl Key {
    fn new(relation: Relation, rule1: &Rule, rule2: &Rule) -> Self {
        let (rule2, identical) = match relation {
            Relation::SelfRestraint => (None, false),
            _ => (Some(canonicalize(rule2)), rule1 == rule2),
        };

        Self {
            relation,
            rule1: canonicalize(rule1),
            rule2,
            identical,
        }
    }
}

#[derive(Debug, Default)]
pub struct VerdictCache {
    verdicts: DashMap<Key, Arc<OnceLock<bool>>>,
    computations: AtomicUsize,
}

impl VerdictCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `relation.evaluate(rule1, rule2)`, computing it at most
    /// once per key.
    pub fn verdict(&self, relation: Relation, rule1: &Rule, rule2: &Rule) -> bool {
        let key = Key::new(relation, rule1, rule2);
        // Clone the cell out of the map, so that we don't hold the
        // shard lock while computing.
        let cell = self.verdicts.entry(key).or_default().clone();

        *cell.get_or_init(|| {
            self.computations.fetch_add(1, Ordering::Relaxed);
            trace!(?relation, %rule1, %rule2, "computing verdict");
            relation.evaluate(rule1, rule2)
        })
    }

    pub fn relies_positively(&self, rule1: &Rule, rule2: &Rule) -> bool {
        self.verdict(Relation::PositiveReliance, rule1, rule2)
    }

    pub fn restrains(&self, rule1: &Rule, rule2: &Rule) -> bool {
        self.verdict(Relation::Restraint, rule1, rule2)
    }

    pub fn self_restrains(&self, rule: &Rule) -> bool {
        self.verdict(Relation::SelfRestraint, rule, rule)
    }

    /// Number of verdicts actually computed (rather than found in the
    /// cache) so far.
    #[must_use]
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }
}

#[cfg(test)]
fn rule(text: &str) -> Rule {
    crate::parse::parse_rule(text).expect("ok")
}

#[test]
fn test_memoizes_alpha_equivalent_rules() {
    let cache = VerdictCache::new();
    let rule_q = rule("q(?X) :- p(?X) .");
    let rule_r = rule("r(?X) :- q(?X) .");
    let rule_r_renamed = rule("r(?Y) :- q(?Y) .");

    assert!(cache.is_empty());
    assert!(cache.relies_positively(&rule_q, &rule_r));
    assert!(cache.relies_positively(&rule_q, &rule_r_renamed));
    assert!(!cache.relies_positively(&rule_r, &rule_q));
    assert_eq!(cache.computations(), 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_relations_have_distinct_keys() {
    let cache = VerdictCache::new();
    let shared = rule("q(?X, !Z), q(?Y, !Z) :- p(?X, ?Y) .");
    let single = rule("q(?X, !Y) :- r(?X) .");

    assert!(cache.restrains(&shared, &single));
    assert!(!cache.restrains(&single, &shared));
    assert!(cache.self_restrains(&shared));
    assert!(cache.restrains(&shared, &shared));
    assert_eq!(cache.computations(), 4);

    assert!(cache.restrains(&shared, &single));
    assert!(cache.self_restrains(&shared));
    assert_eq!(cache.computations(), 4);
}

#[test]
fn test_identical_rules_keyed_apart() {
    let cache = VerdictCache::new();
    let original = rule("q(?X, !Y) :- p(?X) .");
    let renamed = rule("q(?Z, !W) :- p(?Z) .");

    assert_eq!(cache.restrains(&original, &original), restrains(&original, &original));
    assert_eq!(cache.restrains(&original, &renamed), restrains(&original, &renamed));
    assert_eq!(cache.computations(), 2);
}

#[test]
fn test_concurrent_lookups_compute_once() {
    let cache = Arc::new(VerdictCache::new());
    let rule1 = rule("q(?X, !Z), q(?Y, !Z) :- p(?X, ?Y) .");
    let rule2 = rule("q(?X, !Y) :- r(?X) .");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = cache.clone();
            let rule1 = rule1.clone();
            let rule2 = rule2.clone();
            std::thread::spawn(move || cache.restrains(&rule1, &rule2))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().expect("ok"));
    }

    assert_eq!(cache.computations(), 1);
}
