//! Unification of literal lists, and the renaming and instantiation
//! steps around it.  Rules are renamed apart before they are
//! compared, unified under some position assignment, and the
//! resulting substitution is applied and instantiated into facts and
//! queries for the BCQ evaluator.
mod instantiate;
mod renamer;
mod unifier;

pub use instantiate::facts;
pub use instantiate::ground_variable;
pub use instantiate::instantiate_fact;
pub use instantiate::instantiate_query;
pub use instantiate::query;
pub use renamer::canonicalize;
pub use renamer::rename_literal;
pub use renamer::rename_rule;
pub use renamer::rename_term;
pub use renamer::Renamer;
pub use unifier::Unifier;
