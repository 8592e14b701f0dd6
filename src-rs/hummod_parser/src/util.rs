use nom::IResult;
use nom_locate::LocatedSpan;

use crate::error::ParserError;

/// A span of the markup being parsed, tracking its offset in the input.
pub type InputSpan<'a> = LocatedSpan<&'a str>;

/// A result type for parser operations.
pub type Result<'a, O, E = ParserError> = IResult<InputSpan<'a>, O, E>;
