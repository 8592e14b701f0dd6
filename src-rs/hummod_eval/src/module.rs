//! Loaded modules and handles to them.

use std::rc::Rc;

use hummod_ir::ParsedModel;
use indexmap::IndexMap;

use crate::{
    client::Client,
    error::EvalError,
    loader::ModuleLoader,
    resolve,
    value::{Literal, Value},
};

/// A module registered with a [`Client`].
///
/// The compiled model is shared and never changes. The only mutable state is
/// the set of overrides; nothing computed is cached between evaluations.
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    model: Rc<ParsedModel>,
    overrides: IndexMap<String, Literal>,
}

impl Module {
    pub(crate) fn new(name: String, model: ParsedModel) -> Self {
        Self {
            name,
            model: Rc::new(model),
            overrides: IndexMap::new(),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn model(&self) -> &ParsedModel {
        &self.model
    }

    pub(crate) fn shared_model(&self) -> Rc<ParsedModel> {
        Rc::clone(&self.model)
    }

    pub(crate) const fn overrides(&self) -> &IndexMap<String, Literal> {
        &self.overrides
    }

    pub(crate) const fn overrides_mut(&mut self) -> &mut IndexMap<String, Literal> {
        &mut self.overrides
    }
}

/// A handle to a loaded module, borrowed from its [`Client`].
///
/// Evaluating through the handle may load further modules into the client.
#[derive(Debug)]
pub struct ModuleRef<'c, L: ModuleLoader> {
    client: &'c mut Client<L>,
    index: usize,
}

impl<'c, L: ModuleLoader> ModuleRef<'c, L> {
    pub(crate) const fn new(client: &'c mut Client<L>, index: usize) -> Self {
        Self { client, index }
    }

    fn module(&self) -> &Module {
        self.client.module_at(self.index)
    }

    /// Returns the module's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.module().name()
    }

    /// Returns the module's compiled model.
    #[must_use]
    pub fn model(&self) -> &ParsedModel {
        self.module().model()
    }

    /// Returns the value of a named quantity: its override if one is set,
    /// otherwise the freshly resolved value.
    ///
    /// A name containing `.` refers to a quantity in another module.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced module fails to load, a reference is
    /// malformed, or resolution nests past the recursion limit.
    pub fn get(&mut self, name: &str) -> Result<Value, EvalError> {
        resolve::get(self.client, self.index, name)
    }

    /// Pins a value for `name`, replacing any earlier override.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Literal>) {
        self.client
            .module_at_mut(self.index)
            .overrides_mut()
            .insert(name.into(), value.into());
    }

    /// Removes the override for `name`, returning it if there was one.
    pub fn clear_override(&mut self, name: &str) -> Option<Literal> {
        self.client
            .module_at_mut(self.index)
            .overrides_mut()
            .shift_remove(name)
    }

    /// Returns the overrides in the order they were first set.
    #[must_use]
    pub fn overrides(&self) -> &IndexMap<String, Literal> {
        self.module().overrides()
    }

    /// Returns the declared variable names in source order.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.model().variables().keys().map(String::as_str)
    }

    /// Returns the top-level definition names in source order.
    pub fn definition_names(&self) -> impl Iterator<Item = &str> {
        self.model().definitions().entries().keys().map(String::as_str)
    }

    /// Returns the function names in source order.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.model().functions().keys().map(String::as_str)
    }
}
