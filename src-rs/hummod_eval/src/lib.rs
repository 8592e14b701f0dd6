//! Evaluation engine and simulation driver for HumMod modules
//!
//! A [`Client`] owns the modules of one simulated subject. Modules are loaded
//! lazily through a [`ModuleLoader`] the first time they are referenced, and
//! every named quantity is resolved fresh on each request from the module's
//! compiled model and the overrides pinned by callers.
//!
//! ```rust
//! use hummod_eval::{Client, SourceMap, Value};
//!
//! let sources = SourceMap::new().with_source(
//!     "Heart",
//!     "<structure><variables><parm><name>Rate</name><val>72</val></parm></variables></structure>",
//! );
//! let mut client = Client::new(sources);
//!
//! assert_eq!(client.get_variable("Heart.Rate").expect("valid"), Value::Number(72.0));
//!
//! client.module("Heart").expect("loads").set("Rate", 90.0);
//! assert_eq!(client.get_variable("Heart.Rate").expect("valid"), Value::Number(90.0));
//! ```

mod client;
mod config;
pub mod curve;
mod error;
mod loader;
mod module;
mod resolve;
mod simulate;
#[cfg(test)]
mod test;
mod value;

pub use client::Client;
pub use config::{EvalConfig, SimulationConfig};
pub use error::{EvalError, LoadError, SimulationError};
pub use loader::{ArtifactDirectory, ModuleLoader, SourceDirectory, SourceMap};
pub use module::ModuleRef;
pub use simulate::StepRecord;
pub use value::{Literal, Value};
