//! The module registry that cross-module references resolve through.

use hummod_ir::QualifiedName;
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::{
    config::{EvalConfig, SimulationConfig},
    error::{EvalError, SimulationError},
    loader::ModuleLoader,
    module::{Module, ModuleRef},
    resolve,
    simulate::{self, StepRecord},
    value::Value,
};

/// Owns every live module of one simulated subject.
///
/// Modules are loaded through the [`ModuleLoader`] the first time they are
/// referenced and stay registered for the client's lifetime, so there is at
/// most one module per name. A module that fails to load is not registered.
#[derive(Debug)]
pub struct Client<L: ModuleLoader> {
    loader: L,
    modules: IndexMap<String, Module>,
    config: EvalConfig,
    dt: f64,
    depth: usize,
    call_log: Vec<QualifiedName>,
}

impl<L: ModuleLoader> Client<L> {
    /// Creates a client with the default configuration.
    pub fn new(loader: L) -> Self {
        Self::with_config(loader, EvalConfig::default())
    }

    /// Creates a client with the given configuration.
    pub fn with_config(loader: L, config: EvalConfig) -> Self {
        Self {
            loader,
            modules: IndexMap::new(),
            config,
            dt: SimulationConfig::default().timestep,
            depth: 0,
            call_log: Vec::new(),
        }
    }

    /// Returns the evaluation configuration.
    #[must_use]
    pub const fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Returns the module loader.
    #[must_use]
    pub const fn loader(&self) -> &L {
        &self.loader
    }

    /// Returns the module loader mutably, for example to add a source that
    /// failed to load earlier.
    pub const fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    /// Returns the module with the given name, loading it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::Load`] if the module is not registered and cannot
    /// be loaded.
    pub fn module(&mut self, name: &str) -> Result<ModuleRef<'_, L>, EvalError> {
        let index = self.load(name)?;
        Ok(ModuleRef::new(self, index))
    }

    /// Returns the value of a `Module.Name` reference.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::BadReference`] if `reference` is not of the form
    /// `Module.Name`, and otherwise fails as [`ModuleRef::get`] does.
    pub fn get_variable(&mut self, reference: &str) -> Result<Value, EvalError> {
        let reference = QualifiedName::parse(reference)?;
        self.get_qualified(&reference)
    }

    /// Returns the value of a qualified name.
    ///
    /// # Errors
    ///
    /// Fails as [`ModuleRef::get`] does, or if the module cannot be loaded.
    pub fn get_qualified(&mut self, reference: &QualifiedName) -> Result<Value, EvalError> {
        let index = self.load(reference.module())?;
        resolve::get(self, index, reference.name())
    }

    /// Returns the names of the registered modules in load order.
    pub fn loaded_modules(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Returns whether a module with the given name is registered.
    #[must_use]
    pub fn is_loaded(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Returns the current step size, in minutes.
    #[must_use]
    pub const fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns every block call executed since the log was last cleared, in
    /// the order the calls started.
    #[must_use]
    pub fn call_log(&self) -> &[QualifiedName] {
        &self.call_log
    }

    /// Clears the call log.
    pub fn clear_call_log(&mut self) {
        self.call_log.clear();
    }

    /// Runs a simulation of `duration` minutes in steps of `timestep`.
    ///
    /// Before each step `perturb` is called with the client and the step
    /// index; it is where overrides are usually installed. Each step then
    /// evaluates every variable and top-level definition of every loaded
    /// module and records the numeric results under `Module.Name`.
    ///
    /// # Errors
    ///
    /// Returns an error if `timestep` is not positive or `duration` is
    /// negative. Names that fail to evaluate are logged and left out of the
    /// step's record.
    pub fn simulate(
        &mut self,
        duration: f64,
        timestep: f64,
        perturb: Option<&mut dyn FnMut(&mut Self, usize)>,
    ) -> Result<Vec<StepRecord>, SimulationError> {
        let config = SimulationConfig::new()
            .with_duration(duration)
            .with_timestep(timestep);
        simulate::run(self, config, perturb)
    }

    /// Runs a simulation with the duration and timestep of `config`.
    ///
    /// # Errors
    ///
    /// Fails as [`Client::simulate`] does.
    pub fn simulate_with_config(
        &mut self,
        config: SimulationConfig,
        perturb: Option<&mut dyn FnMut(&mut Self, usize)>,
    ) -> Result<Vec<StepRecord>, SimulationError> {
        simulate::run(self, config, perturb)
    }

    /// Returns the index of the named module, loading it first if needed.
    pub(crate) fn load(&mut self, name: &str) -> Result<usize, EvalError> {
        if let Some(index) = self.modules.get_index_of(name) {
            return Ok(index);
        }

        let model = self.loader.load_model(name).map_err(|error| {
            warn!(module = name, %error, "failed to load module");
            EvalError::Load {
                module: name.to_string(),
                error,
            }
        })?;

        debug!(
            module = name,
            variables = model.variables().len(),
            functions = model.functions().len(),
            definitions = model.definitions().entries().len(),
            "loaded module"
        );

        let (index, _) = self
            .modules
            .insert_full(name.to_string(), Module::new(name.to_string(), model));
        Ok(index)
    }

    pub(crate) fn loaded_count(&self) -> usize {
        self.modules.len()
    }

    pub(crate) fn module_at(&self, index: usize) -> &Module {
        &self.modules[index]
    }

    pub(crate) fn module_at_mut(&mut self, index: usize) -> &mut Module {
        &mut self.modules[index]
    }

    /// Enters the resolution of `name` in the module at `index`.
    pub(crate) fn enter(&mut self, index: usize, name: &str) -> Result<(), EvalError> {
        if let Some(limit) = self.config.recursion_limit
            && self.depth >= limit
        {
            let name = QualifiedName::new(self.modules[index].name(), name);
            warn!(%name, limit, "recursion limit exceeded");
            return Err(EvalError::RecursionLimitExceeded { limit, name });
        }

        self.depth += 1;
        Ok(())
    }

    /// Leaves a resolution entered with [`Client::enter`].
    pub(crate) const fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn record_call(&mut self, call: QualifiedName) {
        self.call_log.push(call);
    }

    pub(crate) const fn set_dt(&mut self, dt: f64) {
        self.dt = dt;
    }
}
