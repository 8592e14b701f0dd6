//! HumMod physiological modules
//!
//! This crate gathers the workspace under one name:
//!
//! - [`parser`] compiles module sources into [`ir::ParsedModel`]s
//! - [`eval`] resolves named quantities across modules and runs simulations
//! - [`analysis`] builds the module dependency map
//! - [`shared`] holds the common error reporting types

#[cfg(feature = "analysis")]
pub use hummod_analysis as analysis;
#[cfg(feature = "eval")]
pub use hummod_eval as eval;
pub use hummod_ir as ir;
pub use hummod_parser as parser;
pub use hummod_shared as shared;

/// Creates a client that compiles module sources from `<directory>/<Module>.DES`.
#[cfg(feature = "eval")]
pub fn client_from_directory(
    directory: impl Into<std::path::PathBuf>,
) -> eval::Client<eval::SourceDirectory> {
    eval::Client::new(eval::SourceDirectory::new(directory))
}
