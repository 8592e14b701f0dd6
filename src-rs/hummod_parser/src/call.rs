//! Parsing of call expressions such as `Effect [ Area, 2 ]`.

use hummod_ir::CallExpression;
use nom::{
    Parser as _,
    bytes::complete::{take_till, take_while1},
    character::complete::{char, multispace0},
};

use crate::util::{InputSpan, Result};

/// Parses a call expression of the form `Ident [ arg1, arg2, … ]`.
///
/// The callee consists of ASCII letters, digits, `_`, and `-`. Arguments are
/// split on commas and trimmed; empty arguments are dropped. Text after the
/// closing bracket is ignored. Returns `None` if the expression does not
/// start with a call.
#[must_use]
pub fn parse_call_expression(expression: &str) -> Option<CallExpression> {
    let (_, (callee, arguments)) = call(InputSpan::new(expression.trim_start())).ok()?;

    let arguments = arguments
        .fragment()
        .split(',')
        .map(str::trim)
        .filter(|argument| !argument.is_empty())
        .map(str::to_string)
        .collect();

    Some(CallExpression::new((*callee.fragment()).to_string(), arguments))
}

fn call(input: InputSpan<'_>) -> Result<'_, (InputSpan<'_>, InputSpan<'_>)> {
    (
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
        multispace0,
        char('['),
        take_till(|c: char| c == ']'),
        char(']'),
    )
        .map(|(callee, _, _, arguments, _)| (callee, arguments))
        .parse(input)
}
