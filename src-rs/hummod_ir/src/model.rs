//! The compiled form of one module.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{DefinitionBlock, DefinitionNode, FunctionSpec, VariableSpec};

/// The compiled form of one module: its variables, functions, and definitions.
///
/// Each section is optional in the source; a missing section compiles to an
/// empty mapping, so callers never need to distinguish "absent" from "empty".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedModel {
    #[serde(default)]
    variables: IndexMap<String, VariableSpec>,
    #[serde(default)]
    functions: IndexMap<String, FunctionSpec>,
    #[serde(default)]
    definitions: DefinitionBlock,
}

impl ParsedModel {
    /// Creates a new model from its three sections.
    #[must_use]
    pub const fn new(
        variables: IndexMap<String, VariableSpec>,
        functions: IndexMap<String, FunctionSpec>,
        definitions: DefinitionBlock,
    ) -> Self {
        Self {
            variables,
            functions,
            definitions,
        }
    }

    /// Returns the declared variables in source order.
    #[must_use]
    pub const fn variables(&self) -> &IndexMap<String, VariableSpec> {
        &self.variables
    }

    /// Returns the declared functions in source order.
    #[must_use]
    pub const fn functions(&self) -> &IndexMap<String, FunctionSpec> {
        &self.functions
    }

    /// Returns the top-level definitions block.
    #[must_use]
    pub const fn definitions(&self) -> &DefinitionBlock {
        &self.definitions
    }

    /// Looks up a declared variable.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&VariableSpec> {
        self.variables.get(name)
    }

    /// Looks up a declared function.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.get(name)
    }

    /// Looks up a top-level definition.
    #[must_use]
    pub fn definition(&self, name: &str) -> Option<&DefinitionNode> {
        self.definitions.get(name)
    }

    /// Returns whether `name` is a declared variable or a top-level definition.
    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.variables.contains_key(name) || self.definitions.get(name).is_some()
    }

    /// Serializes the model to its JSON artifact form.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails, which only happens for
    /// non-finite curve coordinates.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Reads a model from its JSON artifact form.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid model artifact.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
