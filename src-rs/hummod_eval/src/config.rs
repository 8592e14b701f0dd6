/// Configuration for evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalConfig {
    /// How deeply name resolution may nest before failing with
    /// [`EvalError::RecursionLimitExceeded`](crate::EvalError::RecursionLimitExceeded).
    /// `None` disables the limit.
    pub recursion_limit: Option<usize>,
}

impl EvalConfig {
    /// The default nesting limit. Each level costs several stack frames, so
    /// this stays well inside a 2 MiB thread stack.
    pub const DEFAULT_RECURSION_LIMIT: usize = 128;

    /// Creates a new configuration with default values
    #[must_use]
    pub const fn new() -> Self {
        Self {
            recursion_limit: Some(Self::DEFAULT_RECURSION_LIMIT),
        }
    }

    /// Sets the recursion limit
    #[must_use]
    pub const fn with_recursion_limit(self, recursion_limit: Option<usize>) -> Self {
        Self { recursion_limit }
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for a simulation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Total simulated time, in minutes
    pub duration: f64,
    /// Length of one step, in minutes
    pub timestep: f64,
}

impl SimulationConfig {
    /// Creates a new configuration with default values
    #[must_use]
    pub const fn new() -> Self {
        Self {
            duration: 10.0,
            timestep: 1.0,
        }
    }

    /// Sets the duration
    #[must_use]
    pub const fn with_duration(self, duration: f64) -> Self {
        Self { duration, ..self }
    }

    /// Sets the timestep
    #[must_use]
    pub const fn with_timestep(self, timestep: f64) -> Self {
        Self { timestep, ..self }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}
