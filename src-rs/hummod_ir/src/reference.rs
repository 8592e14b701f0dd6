//! Two-part `Module.Name` references between modules.

use std::fmt;

use hummod_shared::error::{AsHummodError, Context};

/// A reference to a named quantity in another module, written `Module.Name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    module: String,
    name: String,
}

impl QualifiedName {
    /// Creates a qualified name from its parts.
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }

    /// Parses a `Module.Name` reference.
    ///
    /// Surrounding whitespace is ignored. Both parts must be non-empty and the
    /// reference must contain exactly one `.`.
    ///
    /// ```rust
    /// use hummod_ir::QualifiedName;
    ///
    /// let reference = QualifiedName::parse("Heart.Pump").expect("valid reference");
    /// assert_eq!(reference.module(), "Heart");
    /// assert_eq!(reference.name(), "Pump");
    ///
    /// assert!(QualifiedName::parse("Heart").is_err());
    /// assert!(QualifiedName::parse("A.B.C").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`BadReference`] if the text is not of the form `Module.Name`.
    pub fn parse(reference: &str) -> Result<Self, BadReference> {
        let bad_reference = || BadReference::new(reference);

        let (module, name) = reference.trim().split_once('.').ok_or_else(bad_reference)?;
        let (module, name) = (module.trim(), name.trim());

        if module.is_empty() || name.is_empty() || name.contains('.') {
            return Err(bad_reference());
        }

        Ok(Self::new(module, name))
    }

    /// Returns the module part of the reference.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Returns the name part of the reference.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}

/// A cross-module reference that is not of the form `Module.Name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadReference {
    reference: String,
}

impl BadReference {
    /// Creates a new error for the given reference text.
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    /// Returns the offending reference text.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

impl fmt::Display for BadReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed module reference `{}`", self.reference)
    }
}

impl std::error::Error for BadReference {}

impl AsHummodError for BadReference {
    fn message(&self) -> String {
        self.to_string()
    }

    fn context(&self) -> Vec<Context> {
        vec![Context::Help(
            "cross-module references must have the form `Module.Name`".to_string(),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let reference = QualifiedName::parse("  Lungs . Ventilate ").expect("valid reference");
        assert_eq!(reference, QualifiedName::new("Lungs", "Ventilate"));
        assert_eq!(reference.to_string(), "Lungs.Ventilate");
    }

    #[test]
    fn parse_keeps_dashes_in_module_names() {
        let reference =
            QualifiedName::parse("TricuspidValve-Regurgitation.Effect").expect("valid reference");
        assert_eq!(reference.module(), "TricuspidValve-Regurgitation");
        assert_eq!(reference.name(), "Effect");
    }

    #[test]
    fn parse_rejects_malformed_references() {
        for reference in ["Heart", ".Pump", "Heart.", "A.B.C", ""] {
            let error = QualifiedName::parse(reference).expect_err("reference should be rejected");
            assert_eq!(error.reference(), reference);
        }
    }
}
