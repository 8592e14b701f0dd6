/// Supplementary information attached to an error message.
///
/// ```rust
/// use hummod_shared::error::Context;
///
/// let note = Context::Note("module `Heart` was requested by `Lungs.Ventilate`".to_string());
/// let help = Context::Help("references must have the form `Module.Name`".to_string());
/// assert_ne!(note, help);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    /// Additional detail about what was happening when the error occurred.
    Note(String),
    /// A suggestion for resolving the error.
    Help(String),
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Note(note) => write!(f, "note: {note}"),
            Self::Help(help) => write!(f, "help: {help}"),
        }
    }
}
