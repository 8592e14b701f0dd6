/// A call-expression of the form `Ident [ arg1, arg2, ... ]`.
///
/// Arguments are kept as trimmed tokens; whether a token names a variable, a
/// definition, another module's quantity, or a literal is decided when the
/// expression is evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpression {
    callee: String,
    arguments: Vec<String>,
}

impl CallExpression {
    /// Creates a new call-expression.
    #[must_use]
    pub const fn new(callee: String, arguments: Vec<String>) -> Self {
        Self { callee, arguments }
    }

    /// Returns the name of the function being called.
    #[must_use]
    pub fn callee(&self) -> &str {
        &self.callee
    }

    /// Returns the argument tokens in order.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }
}
