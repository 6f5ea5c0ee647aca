//! Rules are existential rules (tuple-generating dependencies, with
//! optional negated body literals): whenever the body matches, the
//! head must hold for some values of its existential variables.
use super::{Literal, Term};
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Rule {
    head: Vec<Literal>,
    body: Vec<Literal>,
}

impl Rule {
    /// Validates and returns the rule `head :- body`.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the head is empty or contains a negated
    /// literal, when the same predicate name is used with different
    /// arities, when an existential variable appears in the body,
    /// when a universal variable of the head or of a negated body
    /// literal never appears in a positive body literal, or when a
    /// name is used both as a universal and as an existential
    /// variable.
    pub fn new(head: Vec<Literal>, body: Vec<Literal>) -> Result<Self, &'static str> {
        validate(&head, &body)?;
        Ok(Self { head, body })
    }

    /// Builds a rule without validation, for structural copies of
    /// rules that were already validated.
    pub(crate) fn from_parts(head: Vec<Literal>, body: Vec<Literal>) -> Self {
        Self { head, body }
    }

    #[must_use]
    pub fn head(&self) -> &[Literal] {
        &self.head
    }

    #[must_use]
    pub fn body(&self) -> &[Literal] {
        &self.body
    }

    /// Returns the non-negated body literals, in order.
    #[must_use]
    pub fn positive_body(&self) -> Vec<Literal> {
        self.body
            .iter()
            .filter(|literal| literal.is_positive())
            .cloned()
            .collect()
    }

    /// Returns the existential variables of the head, in order of
    /// first occurrence.
    #[must_use]
    pub fn existential_variables(&self) -> Vec<Term> {
        let mut ret: Vec<Term> = Vec::new();
        for var in self.head.iter().flat_map(Literal::variables) {
            if var.is_existential() && !ret.contains(var) {
                ret.push(var.clone());
            }
        }

        ret
    }

    /// Returns the universal variables of the whole rule, in order of
    /// first occurrence (head first).
    #[must_use]
    pub fn universal_variables(&self) -> Vec<Term> {
        let mut ret: Vec<Term> = Vec::new();
        for var in self
            .head
            .iter()
            .chain(self.body.iter())
            .flat_map(Literal::variables)
        {
            if var.is_universal() && !ret.contains(var) {
                ret.push(var.clone());
            }
        }

        ret
    }

    #[must_use]
    pub fn has_existentials(&self) -> bool {
        self.head
            .iter()
            .flat_map(Literal::variables)
            .any(Term::is_existential)
    }

    /// Partitions head positions into pieces: two head literals are in
    /// the same piece when they are connected through shared
    /// existential variables.  Pieces are sorted by their first
    /// position, and positions are ascending within each piece.
    #[must_use]
    pub fn pieces(&self) -> Vec<Vec<usize>> {
        let mut parent: Vec<usize> = (0..self.head.len()).collect();

        fn find(parent: &mut [usize], mut index: usize) -> usize {
            while parent[index] != index {
                parent[index] = parent[parent[index]];
                index = parent[index];
            }

            index
        }

        let mut first_seen: HashMap<&Term, usize> = HashMap::new();
        for (index, literal) in self.head.iter().enumerate() {
            for var in literal.variables().filter(|var| var.is_existential()) {
                let other = *first_seen.entry(var).or_insert(index);
                let (left, right) = (find(&mut parent, index), find(&mut parent, other));
                if left != right {
                    parent[left.max(right)] = left.min(right);
                }
            }
        }

        let mut pieces: Vec<Vec<usize>> = Vec::new();
        let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
        for index in 0..self.head.len() {
            let root = find(&mut parent, index);
            let slot = *slot_of_root.entry(root).or_insert_with(|| {
                pieces.push(Vec::new());
                pieces.len() - 1
            });
            pieces[slot].push(index);
        }

        pieces
    }

    /// A piece is unconnected when it mentions existential variables
    /// but no universal one: its instances never depend on the body
    /// match.
    #[must_use]
    pub fn has_unconnected_piece(&self) -> bool {
        self.pieces().iter().any(|piece| {
            let mut has_existential = false;
            let mut has_universal = false;
            for var in piece.iter().flat_map(|index| self.head[*index].variables()) {
                has_existential |= var.is_existential();
                has_universal |= var.is_universal();
            }

            has_existential && !has_universal
        })
    }
}

fn validate(head: &[Literal], body: &[Literal]) -> Result<(), &'static str> {
    if head.is_empty() {
        return Err("Rule head must not be empty.");
    }

    if head.iter().any(Literal::is_negated) {
        return Err("Rule head must only contain positive literals.");
    }

    let mut arities = HashMap::new();
    for literal in head.iter().chain(body.iter()) {
        let predicate = literal.predicate();
        let arity = *arities
            .entry(predicate.name.as_str())
            .or_insert(predicate.arity);
        if arity != predicate.arity {
            return Err("Predicate used with inconsistent arities.");
        }
    }

    if body
        .iter()
        .any(|literal| literal.variables().any(Term::is_existential))
    {
        return Err("Existential variables may only appear in the head.");
    }

    let bound: HashSet<&str> = body
        .iter()
        .filter(|literal| literal.is_positive())
        .flat_map(Literal::variables)
        .map(Term::name)
        .collect();
    let must_be_bound = head
        .iter()
        .chain(body.iter().filter(|literal| literal.is_negated()))
        .flat_map(Literal::variables)
        .filter(|var| var.is_universal());
    for var in must_be_bound {
        if !bound.contains(var.name()) {
            return Err("Unsafe rule: universal variable missing from the positive body.");
        }
    }

    let mut quantifiers = HashMap::new();
    for var in head.iter().chain(body.iter()).flat_map(Literal::variables) {
        let existential = *quantifiers
            .entry(var.name())
            .or_insert(var.is_existential());
        if existential != var.is_existential() {
            return Err("Variable name used with both quantifiers.");
        }
    }

    Ok(())
}

fn write_literals(f: &mut fmt::Formatter<'_>, literals: &[Literal]) -> fmt::Result {
    for (index, literal) in literals.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }

        write!(f, "{}", literal)?;
    }

    Ok(())
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_literals(f, &self.head)?;
        write!(f, " :- ")?;
        write_literals(f, &self.body)?;
        write!(f, " .")
    }
}

#[cfg(test)]
fn rule(text: &str) -> Rule {
    crate::parse::parse_rule(text).expect("ok")
}

#[test]
fn test_validation() {
    let x = Term::universal("X");
    let y = Term::existential("Y");
    let p = |terms: Vec<Term>| Literal::atom("p", terms);
    let q = |terms: Vec<Term>| Literal::atom("q", terms);

    assert!(Rule::new(vec![], vec![p(vec![x.clone()])]).is_err());
    assert!(Rule::new(vec![q(vec![x.clone(), y.clone()])], vec![p(vec![x.clone()])]).is_ok());
    // Unsafe head variable.
    assert!(Rule::new(vec![q(vec![Term::universal("Z"), y.clone()])], vec![p(vec![x.clone()])]).is_err());
    // Existential in the body.
    assert!(Rule::new(vec![q(vec![x.clone(), y.clone()])], vec![p(vec![y.clone()])]).is_err());
    // Negated head.
    let negated_head =
        Literal::negative(crate::model::Predicate::new("q", 1), vec![x.clone()]).expect("ok");
    assert!(Rule::new(vec![negated_head], vec![p(vec![x.clone()])]).is_err());
    // Arity clash between head and body.
    assert!(Rule::new(vec![p(vec![x.clone(), x.clone()])], vec![p(vec![x.clone()])]).is_err());
    // Same name, both quantifiers.
    assert!(Rule::new(
        vec![q(vec![x.clone(), Term::existential("X")])],
        vec![p(vec![x.clone()])]
    )
    .is_err());
}

#[test]
fn test_negated_body_safety() {
    assert!(crate::parse::parse_rule("q(?X) :- p(?X), ~r(?X) .").is_ok());
    assert!(crate::parse::parse_rule("q(?X) :- p(?X), ~r(?Z) .").is_err());
}

#[test]
fn test_existential_variables() {
    let r = rule("q(?X, !Z), r(!W, !Z) :- p(?X) .");

    assert_eq!(
        r.existential_variables(),
        vec![Term::existential("Z"), Term::existential("W")]
    );
    assert_eq!(r.universal_variables(), vec![Term::universal("X")]);
    assert!(r.has_existentials());
    assert!(!rule("q(?X) :- p(?X) .").has_existentials());
}

#[test]
fn test_pieces() {
    let r = rule("a(?X, !Y), b(!Y, !Z), c(?X), d(!Z), e(!W) :- p(?X) .");

    assert_eq!(r.pieces(), vec![vec![0, 1, 3], vec![2], vec![4]]);
    assert!(r.has_unconnected_piece());
}

#[test]
fn test_unconnected_piece() {
    assert!(rule("b(!Y) :- a(?X) .").has_unconnected_piece());
    assert!(!rule("q(?X, !Y) :- p(?X) .").has_unconnected_piece());
    assert!(!rule("q(?X) :- p(?X) .").has_unconnected_piece());
    assert!(!rule("q(?X, !Z), q(?Y, !Z) :- p(?X, ?Y) .").has_unconnected_piece());
}

#[test]
fn test_rule_display() {
    let text = "q(?X, !Z), q(?Y, !Z) :- p(?X, ?Y), ~r(?X) .";

    assert_eq!(rule(text).to_string(), text);
    assert_eq!(rule(&rule(text).to_string()), rule(text));
}
