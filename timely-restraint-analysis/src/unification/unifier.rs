//! The unifier tracks equivalence classes of variables in an explicit
//! union-find.  Each class may be bound to one ground term, and
//! remembers whether it contains an existential variable: merging an
//! existential with a universal variable must not lose the fact that
//! the class stands for an anonymous value.
//!
//! Failure is sticky.  Once two terms fail to unify, `success()` stays
//! false and every later call is a no-op that returns false.
//!
//! The unifier does not enforce any discipline on existential
//! variables (e.g., it will happily bind one to a constant); the
//! reliance and restraint checks inspect the classes afterwards.
use crate::model::{Literal, Rule, Term};
use assignmerator::Assignment;
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Clone, Debug)]
pub struct Unifier {
    success: bool,
    index_of: HashMap<Term, usize>,
    variables: Vec<Term>,
    // The remaining vectors are parallel to `variables`; `binding`
    // and `existential` are only meaningful at class roots.
    parent: Vec<usize>,
    binding: Vec<Option<Term>>,
    existential: Vec<bool>,
}

impl Default for Unifier {
    fn default() -> Self {
        Self {
            success: true,
            index_of: HashMap::new(),
            variables: Vec::new(),
            parent: Vec::new(),
            binding: Vec::new(),
            existential: Vec::new(),
        }
    }
}

impl Unifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unifies `assignee[i]` with `origin[assignment[i]]` for each
    /// mapped position `i`, checking predicates and polarity.
    ///
    /// # Panics
    ///
    /// Panics if the assignment's shape does not match the two lists.
    #[must_use]
    pub fn for_assignment(assignee: &[Literal], origin: &[Literal], assignment: &Assignment) -> Self {
        assert_eq!(assignee.len(), assignment.assignee_len(), "Assignee length mismatch.");
        assert_eq!(origin.len(), assignment.origin_len(), "Origin length mismatch.");

        let mut ret = Self::new();
        for pair in assignment.matches() {
            if !ret.unify_literals(&assignee[pair.assignee], &origin[pair.origin]) {
                break;
            }
        }

        ret
    }

    /// Unifies two equal-length lists of literals position by position.
    ///
    /// # Panics
    ///
    /// Panics if the lists differ in length.
    #[must_use]
    pub fn for_lists(left: &[Literal], right: &[Literal]) -> Self {
        assert_eq!(left.len(), right.len(), "Unified lists must have the same length.");

        let mut ret = Self::new();
        for (x, y) in left.iter().zip(right.iter()) {
            if !ret.unify_literals(x, y) {
                break;
            }
        }

        ret
    }

    #[inline]
    #[must_use]
    pub fn success(&self) -> bool {
        self.success
    }

    /// Unifies two literals with the same predicate and polarity.
    pub fn unify_literals(&mut self, left: &Literal, right: &Literal) -> bool {
        if left.is_negated() != right.is_negated() {
            self.success = false;
        }

        self.unify_atoms(left, right)
    }

    /// Unifies two literals with the same predicate, regardless of
    /// polarity.
    pub fn unify_atoms(&mut self, left: &Literal, right: &Literal) -> bool {
        if !self.success {
            return false;
        }

        if left.predicate() != right.predicate() {
            self.success = false;
            return false;
        }

        for (x, y) in left.terms().iter().zip(right.terms().iter()) {
            if !self.unify_terms(x, y) {
                return false;
            }
        }

        true
    }

    pub fn unify_terms(&mut self, left: &Term, right: &Term) -> bool {
        if !self.success {
            return false;
        }

        self.success = match (left.is_variable(), right.is_variable()) {
            (false, false) => left == right,
            (true, false) => {
                let root = self.root_of(left);
                self.bind(root, right)
            }
            (false, true) => {
                let root = self.root_of(right);
                self.bind(root, left)
            }
            (true, true) => {
                let x = self.root_of(left);
                let y = self.root_of(right);
                self.merge(x, y)
            }
        };

        self.success
    }

    /// Returns the representative of `term`'s class: the ground term
    /// the class is bound to if any, otherwise a variable named after
    /// the class's oldest member, existential iff some member is.
    /// Ground terms and variables the unifier never saw resolve to
    /// themselves.
    #[must_use]
    pub fn resolve(&self, term: &Term) -> Term {
        let index = match self.index_of.get(term) {
            Some(index) => *index,
            None => return term.clone(),
        };

        let root = self.find(index);
        if let Some(bound) = &self.binding[root] {
            return bound.clone();
        }

        let name = self.variables[root].name().to_owned();
        if self.existential[root] {
            Term::ExistentialVariable(name)
        } else {
            Term::UniversalVariable(name)
        }
    }

    /// Returns true iff `left` and `right` are known to denote the
    /// same value.
    #[must_use]
    pub fn same_class(&self, left: &Term, right: &Term) -> bool {
        left == right || self.resolve(left) == self.resolve(right)
    }

    #[must_use]
    pub fn apply_literal(&self, literal: &Literal) -> Literal {
        literal.map_terms(|term| self.resolve(term))
    }

    #[must_use]
    pub fn apply_literals(&self, literals: &[Literal]) -> Vec<Literal> {
        literals.iter().map(|lit| self.apply_literal(lit)).collect()
    }

    #[must_use]
    pub fn apply_rule(&self, rule: &Rule) -> Rule {
        Rule::from_parts(self.apply_literals(rule.head()), self.apply_literals(rule.body()))
    }

    /// Returns the non-trivial equivalence classes: each class lists
    /// its variables and the ground term it is bound to, if any.
    /// Classes that hold a single unbound variable are omitted.
    #[must_use]
    pub fn classes(&self) -> BTreeSet<BTreeSet<Term>> {
        let mut by_root: BTreeMap<usize, BTreeSet<Term>> = BTreeMap::new();
        for (index, var) in self.variables.iter().enumerate() {
            let root = self.find(index);
            let class = by_root.entry(root).or_default();
            class.insert(var.clone());
            if let Some(bound) = &self.binding[root] {
                class.insert(bound.clone());
            }
        }

        by_root
            .into_iter()
            .map(|(_, class)| class)
            .filter(|class| class.len() > 1)
            .collect()
    }

    fn root_of(&mut self, var: &Term) -> usize {
        let index = match self.index_of.get(var) {
            Some(index) => *index,
            None => {
                let index = self.variables.len();
                self.index_of.insert(var.clone(), index);
                self.variables.push(var.clone());
                self.parent.push(index);
                self.binding.push(None);
                self.existential.push(var.is_existential());
                index
            }
        };

        self.find(index)
    }

    fn find(&self, mut index: usize) -> usize {
        while self.parent[index] != index {
            index = self.parent[index];
        }

        index
    }

    fn bind(&mut self, root: usize, value: &Term) -> bool {
        match &self.binding[root] {
            Some(bound) => bound == value,
            None => {
                self.binding[root] = Some(value.clone());
                true
            }
        }
    }

    fn merge(&mut self, x: usize, y: usize) -> bool {
        if x == y {
            return true;
        }

        // The older variable stays the root, so representatives do
        // not depend on which side of a pair a variable came from.
        let (root, child) = (x.min(y), x.max(y));
        if let (Some(a), Some(b)) = (&self.binding[root], &self.binding[child]) {
            if a != b {
                return false;
            }
        }

        let binding = self.binding[child].take();
        self.parent[child] = root;
        if self.binding[root].is_none() {
            self.binding[root] = binding;
        }
        self.existential[root] |= self.existential[child];
        true
    }
}

#[cfg(test)]
fn lit(text: &str) -> Literal {
    crate::parse::parse_literal(text).expect("ok")
}

#[test]
fn test_unify_constants() {
    let mut unifier = Unifier::new();

    assert!(unifier.unify_terms(&Term::constant("a"), &Term::constant("a")));
    assert!(!unifier.unify_terms(&Term::constant("a"), &Term::null("a")));
    assert!(!unifier.success());
}

#[test]
fn test_bindings_propagate() {
    let mut unifier = Unifier::new();
    let x = Term::universal("X");
    let y = Term::universal("Y");

    assert!(unifier.unify_terms(&x, &y));
    assert!(unifier.unify_terms(&Term::constant("a"), &y));
    assert_eq!(unifier.resolve(&x), Term::constant("a"));
    assert!(!unifier.unify_terms(&x, &Term::constant("b")));
}

#[test]
fn test_merge_bound_classes() {
    let mut unifier = Unifier::new();
    let x = Term::universal("X");
    let y = Term::universal("Y");

    assert!(unifier.unify_terms(&x, &Term::constant("a")));
    assert!(unifier.unify_terms(&y, &Term::constant("b")));
    assert!(!unifier.unify_terms(&x, &y));
    // The failed merge leaves both classes bound as before.
    assert_eq!(unifier.resolve(&x), Term::constant("a"));
    assert_eq!(unifier.resolve(&y), Term::constant("b"));
    assert!(!unifier.same_class(&x, &y));
}

#[test]
fn test_failure_is_sticky() {
    let mut unifier = Unifier::new();

    assert!(!unifier.unify_literals(&lit("p(?X)"), &lit("q(?X)")));
    assert!(!unifier.unify_terms(&Term::constant("a"), &Term::constant("a")));
    assert!(!unifier.unify_literals(&lit("p(?X)"), &lit("p(?Y)")));
    assert!(!unifier.success());
    assert!(unifier.classes().is_empty());
}

#[test]
fn test_polarity() {
    let mut unifier = Unifier::new();
    assert!(!unifier.unify_literals(&lit("p(?X)"), &lit("~p(?Y)")));

    let mut unifier = Unifier::new();
    assert!(unifier.unify_atoms(&lit("p(?X)"), &lit("~p(?Y)")));
    assert!(unifier.same_class(&Term::universal("X"), &Term::universal("Y")));
}

#[test]
fn test_existential_representative() {
    let x = Term::universal("X");
    let y = Term::existential("Y");

    for (left, right) in [(&x, &y), (&y, &x)].iter() {
        let mut unifier = Unifier::new();
        assert!(unifier.unify_terms(left, right));
        assert!(unifier.resolve(&x).is_existential());
        assert_eq!(unifier.resolve(&x), unifier.resolve(&y));
    }
}

#[test]
fn test_for_assignment() {
    let assignee = vec![lit("q(?X, ?Y)"), lit("r(?X)")];
    let origin = vec![lit("q(a, !Z)"), lit("r(b)")];

    let both = Unifier::for_assignment(
        &assignee,
        &origin,
        &Assignment::new(vec![Some(0), Some(1)], 2),
    );
    assert!(!both.success());

    let first = Unifier::for_assignment(&assignee, &origin, &Assignment::new(vec![Some(0), None], 2));
    assert!(first.success());
    assert_eq!(first.resolve(&Term::universal("X")), Term::constant("a"));
    assert_eq!(first.resolve(&Term::universal("Y")), Term::existential("Y"));
    assert_eq!(first.apply_literal(&assignee[1]).to_string(), "r(a)");
}

#[test]
#[should_panic]
fn test_for_assignment_shape() {
    let _ = Unifier::for_assignment(
        &[lit("p(?X)")],
        &[lit("p(a)")],
        &Assignment::new(vec![Some(0), None], 1),
    );
}

#[test]
fn test_classes() {
    let unifier = Unifier::for_lists(
        &[lit("p(?X, ?Y, ?Z)"), lit("q(?W)")],
        &[lit("p(?Y, a, ?V)"), lit("q(?W)")],
    );

    assert!(unifier.success());
    let expected: BTreeSet<BTreeSet<Term>> = vec![
        vec![Term::universal("X"), Term::universal("Y"), Term::constant("a")],
        vec![Term::universal("Z"), Term::universal("V")],
    ]
    .into_iter()
    .map(|class| class.into_iter().collect())
    .collect();
    assert_eq!(unifier.classes(), expected);
}
