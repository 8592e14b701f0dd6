/// Configuration for dependency analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// The extension of module source files, without the leading `.`
    pub extension: String,
    /// Pseudo-module names that are never treated as dependencies, compared
    /// case-insensitively
    pub reserved_modules: Vec<String>,
}

impl AnalysisConfig {
    /// Creates a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self {
            extension: "DES".to_string(),
            reserved_modules: vec!["system".to_string()],
        }
    }

    /// Sets the extension of module source files
    #[must_use]
    pub fn with_extension(self, extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            ..self
        }
    }

    /// Sets the reserved pseudo-module names
    #[must_use]
    pub fn with_reserved_modules(self, reserved_modules: Vec<String>) -> Self {
        Self {
            reserved_modules,
            ..self
        }
    }

    /// Returns whether `module` is a reserved pseudo-module name.
    #[must_use]
    pub fn is_reserved(&self, module: &str) -> bool {
        self.reserved_modules
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(module))
    }

    /// Returns the file name of a module's source.
    #[must_use]
    pub fn file_name(&self, module: &str) -> String {
        format!("{module}.{}", self.extension)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new()
    }
}
