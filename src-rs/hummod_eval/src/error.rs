//! Error types for module loading, evaluation, and simulation.

use std::{fmt, io, path::PathBuf};

use hummod_ir::{BadReference, QualifiedName};
use hummod_parser::CompileError;
use hummod_shared::error::{AsHummodError, Context, ErrorLocation};

/// An error that prevents a module from being constructed.
///
/// A module that fails to load is not registered, so a later reference to it
/// tries again.
#[derive(Debug)]
pub enum LoadError {
    /// No source or artifact exists for the module
    NotFound {
        /// The module that was requested
        module: String,
    },
    /// The module's file exists but could not be read
    Io {
        /// The file that was read
        path: PathBuf,
        /// The underlying error
        error: io::Error,
    },
    /// The module's source does not compile
    Compile(CompileError),
    /// The module's compiled artifact is not a valid model
    Artifact(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { module } => write!(f, "no source found for module `{module}`"),
            Self::Io { path, error } => write!(f, "failed to read `{}`: {error}", path.display()),
            Self::Compile(error) => write!(f, "{error}"),
            Self::Artifact(error) => write!(f, "invalid model artifact: {error}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Io { error, .. } => Some(error),
            Self::Compile(error) => Some(error),
            Self::Artifact(error) => Some(error),
        }
    }
}

impl From<CompileError> for LoadError {
    fn from(error: CompileError) -> Self {
        Self::Compile(error)
    }
}

impl AsHummodError for LoadError {
    fn message(&self) -> String {
        match self {
            Self::Compile(error) => error.message(),
            Self::NotFound { .. } | Self::Io { .. } | Self::Artifact(_) => self.to_string(),
        }
    }

    fn context(&self) -> Vec<Context> {
        match self {
            Self::Compile(error) => error.context(),
            Self::NotFound { .. } | Self::Io { .. } | Self::Artifact(_) => vec![],
        }
    }

    fn error_location(&self, source: &str) -> Option<ErrorLocation> {
        match self {
            Self::Compile(error) => error.error_location(source),
            Self::NotFound { .. } | Self::Io { .. } | Self::Artifact(_) => None,
        }
    }
}

/// An error that occurred while resolving a named quantity.
#[derive(Debug)]
pub enum EvalError {
    /// A referenced module could not be loaded
    Load {
        /// The module that failed to load
        module: String,
        /// Why it failed
        error: LoadError,
    },
    /// A cross-module reference is not of the form `Module.Name`
    BadReference(BadReference),
    /// Resolution nested deeper than the configured limit
    RecursionLimitExceeded {
        /// The configured limit
        limit: usize,
        /// The name whose resolution would have exceeded it
        name: QualifiedName,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load { module, error } => write!(f, "failed to load module `{module}`: {error}"),
            Self::BadReference(error) => write!(f, "{error}"),
            Self::RecursionLimitExceeded { limit, name } => write!(
                f,
                "resolving `{name}` exceeded the recursion limit of {limit}"
            ),
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load { error, .. } => Some(error),
            Self::BadReference(error) => Some(error),
            Self::RecursionLimitExceeded { .. } => None,
        }
    }
}

impl From<BadReference> for EvalError {
    fn from(error: BadReference) -> Self {
        Self::BadReference(error)
    }
}

impl AsHummodError for EvalError {
    fn message(&self) -> String {
        self.to_string()
    }

    fn context(&self) -> Vec<Context> {
        match self {
            Self::Load { error, .. } => error.context(),
            Self::BadReference(error) => error.context(),
            Self::RecursionLimitExceeded { .. } => vec![Context::Note(
                "a chain of module references may be mutually recursive".to_string(),
            )],
        }
    }
}

/// An error that prevents a simulation from running.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimulationError {
    /// The timestep is not a positive number
    InvalidTimestep(f64),
    /// The duration is negative or not a number
    InvalidDuration(f64),
    /// `duration / timestep` is too large to count
    TooManySteps {
        /// The requested duration
        duration: f64,
        /// The requested timestep
        timestep: f64,
    },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimestep(timestep) => {
                write!(f, "timestep must be a positive number, got {timestep}")
            }
            Self::InvalidDuration(duration) => {
                write!(f, "duration must be a non-negative number, got {duration}")
            }
            Self::TooManySteps { duration, timestep } => write!(
                f,
                "a duration of {duration} with a timestep of {timestep} has too many steps"
            ),
        }
    }
}

impl std::error::Error for SimulationError {}

impl AsHummodError for SimulationError {
    fn message(&self) -> String {
        self.to_string()
    }
}
