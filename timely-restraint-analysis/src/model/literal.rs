use super::Term;
use std::fmt;

/// Predicates are identified by their name and arity.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Predicate {
    pub name: String,
    pub arity: usize,
}

impl Predicate {
    #[must_use]
    pub fn new(name: &str, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

/// A `Literal` applies a predicate to as many terms as its arity,
/// possibly under negation.  Rule heads only hold positive literals.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Literal {
    predicate: Predicate,
    terms: Vec<Term>,
    negated: bool,
}

impl Literal {
    /// Returns a positive literal `predicate(terms...)`.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the number of terms differs from the
    /// predicate's arity.
    pub fn new(predicate: Predicate, terms: Vec<Term>) -> Result<Self, &'static str> {
        if predicate.arity != terms.len() {
            return Err("Literal arity does not match its predicate.");
        }

        Ok(Self {
            predicate,
            terms,
            negated: false,
        })
    }

    /// Returns `~predicate(terms...)`.
    ///
    /// # Errors
    ///
    /// Returns `Err` on arity mismatch, like `new`.
    pub fn negative(predicate: Predicate, terms: Vec<Term>) -> Result<Self, &'static str> {
        let mut ret = Self::new(predicate, terms)?;
        ret.negated = true;
        Ok(ret)
    }

    /// Builds a literal whose predicate arity is the number of terms.
    #[must_use]
    pub fn atom(name: &str, terms: Vec<Term>) -> Self {
        Self {
            predicate: Predicate::new(name, terms.len()),
            terms,
            negated: false,
        }
    }

    #[must_use]
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        !self.negated
    }

    /// Rebuilds the literal with each term replaced by `f(term)`.
    /// The predicate and polarity are unchanged.
    #[must_use]
    pub fn map_terms(&self, f: impl FnMut(&Term) -> Term) -> Self {
        Self {
            predicate: self.predicate.clone(),
            terms: self.terms.iter().map(f).collect(),
            negated: self.negated,
        }
    }

    /// Iterates over the variables in the literal, in order and with
    /// repetitions.
    pub fn variables(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter().filter(|term| term.is_variable())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "~")?;
        }

        write!(f, "{}(", self.predicate.name)?;
        for (index, term) in self.terms.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }

            write!(f, "{}", term)?;
        }

        write!(f, ")")
    }
}

#[test]
fn test_arity_check() {
    let p = Predicate::new("p", 2);

    assert!(Literal::new(p.clone(), vec![Term::universal("X")]).is_err());
    assert!(Literal::negative(p.clone(), vec![]).is_err());

    let lit = Literal::new(p, vec![Term::universal("X"), Term::constant("a")]).expect("ok");
    assert_eq!(lit.predicate().arity, 2);
    assert!(lit.is_positive());
    assert_eq!(lit.variables().count(), 1);
}

#[test]
fn test_literal_display() {
    let lit = Literal::negative(
        Predicate::new("edge", 2),
        vec![Term::universal("X"), Term::existential("Y")],
    )
    .expect("ok");

    assert_eq!(lit.to_string(), "~edge(?X, !Y)");
    assert_eq!(Literal::atom("nullary", vec![]).to_string(), "nullary()");
}
