//! The rule model: terms, predicates, literals and rules.  All of
//! these are immutable values; analyses make renamed or instantiated
//! copies rather than update rules in place.
mod literal;
mod rule;
mod term;

pub use literal::Literal;
pub use literal::Predicate;
pub use rule::Rule;
pub use term::Term;
pub use term::XSD_STRING;
