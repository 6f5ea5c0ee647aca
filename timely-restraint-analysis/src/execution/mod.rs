//! Program-level analysis: configuration, the shared verdict cache,
//! and the parallel driver over all rule pairs.
mod cache;
mod config;
mod pairwise;

pub use cache::Relation;
pub use cache::VerdictCache;
pub use config::AnalysisConfig;
pub use pairwise::analyse_program;
pub use pairwise::ProgramVerdicts;
