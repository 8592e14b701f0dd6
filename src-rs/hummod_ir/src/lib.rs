//! Compiled model representation for HumMod modules
//!
//! A [`ParsedModel`] is what the source compiler produces for one module: its
//! declared variables, its functions, and its tree of definitions. Models are
//! immutable once built and can be written to and read from a JSON artifact so
//! that compiled modules can be cached and inspected.

mod definition;
mod expr;
mod function;
mod model;
mod reference;
mod variable;

pub use definition::{DefinitionBlock, DefinitionNode};
pub use expr::CallExpression;
pub use function::{Curve, CurvePoint, FunctionSpec};
pub use model::ParsedModel;
pub use reference::{BadReference, QualifiedName};
pub use variable::{VariableKind, VariableSpec};
