use std::{fmt, io, path::PathBuf};

use hummod_shared::error::AsHummodError;

/// An error that prevents a directory of module sources from being analyzed.
#[derive(Debug)]
pub enum AnalysisError {
    /// A directory or file could not be read
    Io {
        /// The path that was read
        path: PathBuf,
        /// The underlying error
        error: io::Error,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, error } => write!(f, "failed to read `{}`: {error}", path.display()),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { error, .. } => Some(error),
        }
    }
}

impl AsHummodError for AnalysisError {
    fn message(&self) -> String {
        self.to_string()
    }
}
