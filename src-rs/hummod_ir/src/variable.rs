use serde::{Deserialize, Serialize};

/// The tag a variable was declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    /// A `<var>` entry
    Var,
    /// A `<parm>` entry
    Parm,
}

impl VariableKind {
    /// Returns the markup tag for this kind.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Parm => "parm",
        }
    }

    /// Returns the kind for a markup tag, if the tag declares a variable.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "var" => Some(Self::Var),
            "parm" => Some(Self::Parm),
            _ => None,
        }
    }
}

/// A declared variable.
///
/// `value` holds the literal text of the `<val>` element. A variable without a
/// `<val>` has no literal and must be computed through a function or a
/// definition of the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSpec {
    #[serde(rename = "type")]
    kind: VariableKind,
    value: Option<String>,
}

impl VariableSpec {
    /// Creates a new variable specification.
    #[must_use]
    pub const fn new(kind: VariableKind, value: Option<String>) -> Self {
        Self { kind, value }
    }

    /// Returns the tag the variable was declared with.
    #[must_use]
    pub const fn kind(&self) -> VariableKind {
        self.kind
    }

    /// Returns the literal text, if the variable has one.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}
