//! Errors for the HumMod crates

mod context;
mod location;
mod traits;

use std::{fmt, path::PathBuf};

pub use context::Context;
pub use location::ErrorLocation;
pub use traits::AsHummodError;

/// Unified error representation for HumMod
///
/// This struct represents errors in a format suitable for display to users.
/// It includes the file (or module) the error belongs to, a human-readable
/// message, and optional source location information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HummodError {
    path: PathBuf,
    message: String,
    location: Option<ErrorLocation>,
    context: Vec<Context>,
}

impl HummodError {
    /// Creates a new `HummodError` without source location information.
    ///
    /// ```rust
    /// use hummod_shared::error::{AsHummodError, HummodError};
    /// use std::path::PathBuf;
    ///
    /// struct SimpleError(String);
    ///
    /// impl AsHummodError for SimpleError {
    ///     fn message(&self) -> String {
    ///         self.0.clone()
    ///     }
    /// }
    ///
    /// let error = SimpleError("module not found".to_string());
    /// let error = HummodError::from_error(&error, PathBuf::from("Heart.DES"));
    /// assert_eq!(error.message(), "module not found");
    /// assert!(error.location().is_none());
    /// ```
    pub fn from_error(error: &impl AsHummodError, path: PathBuf) -> Self {
        Self {
            path,
            message: error.message(),
            location: None,
            context: error.context(),
        }
    }

    /// Creates a new `HummodError`, using the source text to compute the
    /// line and column of the error.
    pub fn from_error_with_source(error: &impl AsHummodError, path: PathBuf, source: &str) -> Self {
        Self {
            path,
            message: error.message(),
            location: error.error_location(source),
            context: error.context(),
        }
    }

    /// Returns the path of the file where the error occurred
    #[must_use]
    pub const fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Returns the human-readable error message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the source location information, if any
    #[must_use]
    pub const fn location(&self) -> Option<&ErrorLocation> {
        self.location.as_ref()
    }

    /// Returns the context information
    #[must_use]
    pub fn context(&self) -> &[Context] {
        &self.context
    }
}

impl fmt::Display for HummodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(
                f,
                "{}:{}:{}: {}",
                self.path.display(),
                location.line(),
                location.column(),
                self.message
            )?,
            None => write!(f, "{}: {}", self.path.display(), self.message)?,
        }

        for context in &self.context {
            write!(f, "\n  {context}")?;
        }

        Ok(())
    }
}

impl std::error::Error for HummodError {}
