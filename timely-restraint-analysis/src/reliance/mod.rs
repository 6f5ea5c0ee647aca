//! Reliance and restraint between existential rules.  These are the
//! pairwise relations behind restricted chase termination criteria:
//! a rule set whose restraint and reliance graphs have no bad cycles
//! can be chased to completion.
//!
//! All checks are pure functions of their input rules; they rename
//! the rules apart internally, and never fail.  Negative answers are
//! just `false`.
mod conditions;
mod positive;
mod restraint;
mod self_restraint;

pub use positive::relies_positively;
pub use restraint::restrains;
pub use self_restraint::self_restrains;
