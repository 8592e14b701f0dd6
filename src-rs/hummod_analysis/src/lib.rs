//! Module dependency graph analysis for HumMod sources
//!
//! Dependencies are read from raw module text rather than compiled models, so
//! a set of sources can be analyzed even when some of them do not compile.
//! For each file the analysis records the modules it references directly and
//! how many other files are reachable from it.

mod config;
mod error;
mod graph;
mod scan;

pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use graph::{DependencyEntry, DependencyMap};
pub use scan::direct_references;
