//! Static termination analysis for existential rules.
//!
//! Before running a restricted chase that may not terminate, we
//! compare the program's rules pairwise: does applying one rule make
//! another newly applicable (`relies_positively`), and can one rule's
//! application make another's fresh nulls unnecessary (`restrains`,
//! `self_restrains`)?  Both questions reduce to a search over partial
//! assignments between literal lists, unification, and boolean
//! conjunctive queries over instantiated facts.
//!
//! `analyse_program` runs all pairwise checks for a program on timely
//! workers.
pub mod execution;
pub mod matching;
pub mod model;
pub mod parse;
pub mod reliance;
pub mod unification;

pub use execution::analyse_program;
pub use execution::AnalysisConfig;
pub use execution::ProgramVerdicts;
pub use execution::VerdictCache;
pub use model::{Literal, Predicate, Rule, Term};
pub use parse::{parse_program, parse_rule};
pub use reliance::relies_positively;
pub use reliance::restrains;
pub use reliance::self_restrains;
