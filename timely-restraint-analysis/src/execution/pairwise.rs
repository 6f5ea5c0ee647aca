//! `analyse_program` computes the reliance and restraint relations
//! over every ordered pair of rules in a program, and self-restraint
//! for every rule.  The checks are independent, so they are spread
//! over timely workers: worker `i` out of `peers` takes work items
//! `k` with `k % peers == i`.  Each worker runs its own checks (and
//! thus owns its renamers and unifiers); with memoization, all
//! workers share one `VerdictCache`.
use super::cache::{Relation, VerdictCache};
use super::AnalysisConfig;
use crate::model::Rule;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Verdicts for a whole program, in terms of rule indices.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProgramVerdicts {
    /// `(i, j)` such that rule `j` positively relies on rule `i`.
    pub positive_reliances: BTreeSet<(usize, usize)>,
    /// `(i, j)` such that rule `i` restrains rule `j`.
    pub restraints: BTreeSet<(usize, usize)>,
    /// `i` such that rule `i` restrains itself.
    pub self_restraints: BTreeSet<usize>,
}

impl ProgramVerdicts {
    fn merge(&mut self, other: ProgramVerdicts) {
        self.positive_reliances.extend(other.positive_reliances);
        self.restraints.extend(other.restraints);
        self.self_restraints.extend(other.self_restraints);
    }
}

fn verdict(cache: Option<&VerdictCache>, relation: Relation, rule1: &Rule, rule2: &Rule) -> bool {
    match cache {
        Some(cache) => cache.verdict(relation, rule1, rule2),
        None => relation.evaluate(rule1, rule2),
    }
}

/// Work items `0..n*n` are ordered pairs `(k / n, k % n)`, and items
/// `n*n..n*n + n` are single rules.
fn process_item(
    rules: &[Rule],
    cache: Option<&VerdictCache>,
    item: usize,
    verdicts: &mut ProgramVerdicts,
) {
    let count = rules.len();

    if item >= count * count {
        let index = item - count * count;
        let rule = &rules[index];
        if verdict(cache, Relation::SelfRestraint, rule, rule) {
            verdicts.self_restraints.insert(index);
        }

        return;
    }

    let (i, j) = (item / count, item % count);
    if verdict(cache, Relation::PositiveReliance, &rules[i], &rules[j]) {
        verdicts.positive_reliances.insert((i, j));
    }

    if verdict(cache, Relation::Restraint, &rules[i], &rules[j]) {
        verdicts.restraints.insert((i, j));
    }
}

/// Computes all pairwise verdicts for `rules`, on `config.workers()`
/// timely worker threads.
///
/// # Errors
///
/// Returns `Err` when the configuration is invalid, or when timely
/// fails to start or a worker fails.
pub fn analyse_program(rules: &[Rule], config: &AnalysisConfig) -> Result<ProgramVerdicts, &'static str> {
    let timely_config = config.timely_config()?;
    let rules: Arc<Vec<Rule>> = Arc::new(rules.to_vec());
    let cache: Option<Arc<VerdictCache>> = if config.memoize() {
        Some(Arc::new(VerdictCache::new()))
    } else {
        None
    };

    let items = rules.len() * rules.len() + rules.len();
    let guards = timely::execute(timely_config, move |worker| {
        let (index, peers) = (worker.index(), worker.peers());
        let mut verdicts = ProgramVerdicts::default();

        for item in (index..items).step_by(peers) {
            process_item(&rules, cache.as_deref(), item, &mut verdicts);
        }

        debug!(worker = index, items, "analysis worker done");
        verdicts
    })
    .map_err(|_| "Failed to start timely workers.")?;

    let mut ret = ProgramVerdicts::default();
    for result in guards.join() {
        ret.merge(result.map_err(|_| "Analysis worker failed.")?);
    }

    Ok(ret)
}

#[cfg(test)]
fn program(text: &str) -> Vec<Rule> {
    crate::parse::parse_program(text).expect("ok")
}

#[test]
fn test_chain_program() {
    let rules = program(
        "
        q(?X) :- p(?X) .
        r(?X) :- q(?X) .
        s(?X, !Y) :- r(?X) .
        ",
    );

    let verdicts = analyse_program(&rules, &AnalysisConfig::default()).expect("ok");
    assert_eq!(
        verdicts.positive_reliances,
        vec![(0, 1), (1, 2)].into_iter().collect::<BTreeSet<_>>()
    );
    assert!(verdicts.restraints.is_empty());
    assert!(verdicts.self_restraints.is_empty());
}

#[test]
fn test_matches_direct_calls() {
    use crate::reliance::{relies_positively, restrains, self_restrains};

    let rules = program(
        "
        q(?X, !Z), q(?Y, !Z) :- p(?X, ?Y) .
        q(?X, !Y) :- r(?X) .
        b(!Y) :- a(?X) .
        r(?Y) :- q(?X, ?Y), a(?X) .
        ",
    );

    let verdicts = analyse_program(&rules, &AnalysisConfig::new().with_workers(3)).expect("ok");
    for (i, rule1) in rules.iter().enumerate() {
        assert_eq!(verdicts.self_restraints.contains(&i), self_restrains(rule1));
        for (j, rule2) in rules.iter().enumerate() {
            assert_eq!(
                verdicts.positive_reliances.contains(&(i, j)),
                relies_positively(rule1, rule2)
            );
            assert_eq!(verdicts.restraints.contains(&(i, j)), restrains(rule1, rule2));
        }
    }

    assert!(verdicts.restraints.contains(&(0, 1)));
    assert!(!verdicts.restraints.contains(&(1, 0)));
    assert!(verdicts.self_restraints.contains(&2));
}

#[test]
fn test_worker_count_independence() {
    let rules = program(
        "
        q(?X, !Z), q(?Y, !Z) :- p(?X, ?Y) .
        q(?X, !Y) :- r(?X) .
        p(?Y, ?X) :- q(?X, ?Y) .
        ",
    );

    let single = analyse_program(&rules, &AnalysisConfig::default()).expect("ok");
    for workers in 2..5 {
        for memoize in [false, true].iter() {
            let config = AnalysisConfig::new()
                .with_workers(workers)
                .with_memoize(*memoize);
            assert_eq!(analyse_program(&rules, &config).expect("ok"), single);
        }
    }
}

#[test]
fn test_empty_program() {
    assert_eq!(
        analyse_program(&[], &AnalysisConfig::default()).expect("ok"),
        ProgramVerdicts::default()
    );
}

#[test]
fn test_invalid_config() {
    let rules = program("q(?X) :- p(?X) .");

    assert!(analyse_program(&rules, &AnalysisConfig::new().with_workers(0)).is_err());
}
