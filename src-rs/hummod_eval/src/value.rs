//! Values produced by evaluation and values pinned by overrides.

use std::fmt;

use hummod_ir::FunctionSpec;

/// The result of evaluating a named quantity.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric result
    Number(f64),
    /// A non-numeric literal, or an expression that is not a function call
    Text(String),
    /// Returned by a definition block that only executes calls
    Executed,
    /// A function declaration that nothing wraps
    Function(FunctionSpec),
    /// The name matched none of the resolution rules
    NoValue,
}

impl Value {
    /// Returns the number if this is a [`Value::Number`].
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(_) | Self::Executed | Self::Function(_) | Self::NoValue => None,
        }
    }

    /// Returns the value as a number, parsing text if it holds a number.
    #[must_use]
    pub fn coerce_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Executed | Self::Function(_) | Self::NoValue => None,
        }
    }

    /// Returns whether this is [`Value::NoValue`].
    #[must_use]
    pub const fn is_no_value(&self) -> bool {
        matches!(self, Self::NoValue)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => write!(f, "{text}"),
            Self::Executed => write!(f, "<executed>"),
            Self::Function(function) => write!(f, "<{} function>", function.kind()),
            Self::NoValue => write!(f, "<no value>"),
        }
    }
}

/// A value that a caller pins with [`ModuleRef::set`](crate::ModuleRef::set).
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A number
    Number(f64),
    /// Text
    Text(String),
}

impl Literal {
    /// Interprets literal source text: numeric text becomes a number.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        text.trim()
            .parse()
            .map_or_else(|_| Self::Text(text.to_string()), Self::Number)
    }
}

impl From<f64> for Literal {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<&str> for Literal {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Literal {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Number(number) => Self::Number(number),
            Literal::Text(text) => Self::Text(text),
        }
    }
}
