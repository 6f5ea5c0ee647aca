//! Terms are the arguments of literals.  The set of term kinds is
//! closed: variables are either universally or existentially
//! quantified, and everything else is ground (constants of various
//! flavours and named nulls).
//!
//! A term's identity is its kind and its name: `?X` and `!X` are
//! different terms.
use std::fmt;

/// A term in a literal.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Term {
    /// Variables bound by matching a rule body, written `?X`.
    UniversalVariable(String),
    /// Head-only variables that the chase fills with fresh nulls,
    /// written `!Y`.
    ExistentialVariable(String),
    /// Plain named constants (IRIs or bare identifiers).
    AbstractConstant(String),
    /// A lexical value with a datatype IRI, written `"v"^^<dt>`.
    DatatypeConstant { lexical: String, datatype: String },
    /// A string with a language tag, written `"v"@tag`.
    LanguageTaggedConstant { lexical: String, language: String },
    /// An anonymous element with a fixed label, written `_:n`.
    NamedNull(String),
}

pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

impl Term {
    #[must_use]
    pub fn universal(name: &str) -> Self {
        Term::UniversalVariable(name.into())
    }

    #[must_use]
    pub fn existential(name: &str) -> Self {
        Term::ExistentialVariable(name.into())
    }

    #[must_use]
    pub fn constant(name: &str) -> Self {
        Term::AbstractConstant(name.into())
    }

    #[must_use]
    pub fn null(label: &str) -> Self {
        Term::NamedNull(label.into())
    }

    #[must_use]
    pub fn is_variable(&self) -> bool {
        matches!(
            self,
            Term::UniversalVariable(_) | Term::ExistentialVariable(_)
        )
    }

    #[must_use]
    pub fn is_universal(&self) -> bool {
        matches!(self, Term::UniversalVariable(_))
    }

    #[must_use]
    pub fn is_existential(&self) -> bool {
        matches!(self, Term::ExistentialVariable(_))
    }

    /// Constants and named nulls are ground; unification treats them
    /// all as rigid values.
    #[must_use]
    pub fn is_ground(&self) -> bool {
        !self.is_variable()
    }

    /// Returns the name (or lexical value) that, together with the
    /// kind, identifies the term.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Term::UniversalVariable(name)
            | Term::ExistentialVariable(name)
            | Term::AbstractConstant(name)
            | Term::NamedNull(name) => name,
            Term::DatatypeConstant { lexical, .. }
            | Term::LanguageTaggedConstant { lexical, .. } => lexical,
        }
    }

    /// Returns a variable of the same quantifier with name `name`.
    /// Ground terms are returned unchanged.
    #[must_use]
    pub fn with_variable_name(&self, name: String) -> Self {
        match self {
            Term::UniversalVariable(_) => Term::UniversalVariable(name),
            Term::ExistentialVariable(_) => Term::ExistentialVariable(name),
            ground => ground.clone(),
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, lexical: &str) -> fmt::Result {
    write!(f, "\"")?;
    for c in lexical.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "\"")
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::UniversalVariable(name) => write!(f, "?{}", name),
            Term::ExistentialVariable(name) => write!(f, "!{}", name),
            Term::AbstractConstant(name) => {
                if name.contains(':') || name.contains('/') {
                    write!(f, "<{}>", name)
                } else {
                    write!(f, "{}", name)
                }
            }
            Term::DatatypeConstant { lexical, datatype } => {
                write_quoted(f, lexical)?;
                if datatype != XSD_STRING {
                    write!(f, "^^<{}>", datatype)?;
                }
                Ok(())
            }
            Term::LanguageTaggedConstant { lexical, language } => {
                write_quoted(f, lexical)?;
                write!(f, "@{}", language)
            }
            Term::NamedNull(label) => write!(f, "_:{}", label),
        }
    }
}

#[test]
fn test_identity_is_kind_and_name() {
    assert_ne!(Term::universal("X"), Term::existential("X"));
    assert_ne!(Term::constant("a"), Term::null("a"));
    assert_eq!(Term::universal("X"), Term::universal("X"));
    assert_eq!(Term::existential("X").name(), "X");
}

#[test]
fn test_kinds() {
    assert!(Term::universal("X").is_variable());
    assert!(Term::universal("X").is_universal());
    assert!(Term::existential("Y").is_existential());
    assert!(Term::constant("a").is_ground());
    assert!(Term::null("n").is_ground());
    assert!(Term::DatatypeConstant {
        lexical: "1".into(),
        datatype: "http://www.w3.org/2001/XMLSchema#integer".into()
    }
    .is_ground());
}

#[test]
fn test_display() {
    assert_eq!(Term::universal("X").to_string(), "?X");
    assert_eq!(Term::existential("Y").to_string(), "!Y");
    assert_eq!(Term::constant("a").to_string(), "a");
    assert_eq!(
        Term::constant("http://example.org/a").to_string(),
        "<http://example.org/a>"
    );
    assert_eq!(Term::null("b1").to_string(), "_:b1");
    assert_eq!(
        Term::LanguageTaggedConstant {
            lexical: "chat".into(),
            language: "fr".into()
        }
        .to_string(),
        "\"chat\"@fr"
    );
    assert_eq!(
        Term::DatatypeConstant {
            lexical: "say \"hi\"".into(),
            datatype: XSD_STRING.into()
        }
        .to_string(),
        "\"say \\\"hi\\\"\""
    );
}
