//! Matching decides whether a set of facts already satisfies a
//! conjunctive query.
mod bcq;

pub use bcq::query;
