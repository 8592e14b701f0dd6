use crate::error::{Context, ErrorLocation};

/// Trait for error types that can be rendered as a [`HummodError`](crate::error::HummodError).
///
/// Every crate in the workspace implements this for its public error types so
/// that callers can report compile, load, and evaluation failures uniformly.
pub trait AsHummodError {
    /// Returns the primary error message.
    fn message(&self) -> String;

    /// Returns additional context information about the error.
    fn context(&self) -> Vec<Context> {
        vec![]
    }

    /// Returns the location of the error in the given source, if the error
    /// refers to one.
    fn error_location(&self, source: &str) -> Option<ErrorLocation> {
        let _ = source;
        None
    }
}
