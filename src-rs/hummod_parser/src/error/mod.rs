//! Error handling for the HumMod source compiler.

use std::fmt;

use hummod_shared::error::{AsHummodError, Context, ErrorLocation};

use crate::util::InputSpan;

pub mod reason;
use reason::ParserErrorReason;

/// An error that occurred while parsing the `<structure>` markup.
///
/// Once returned from [`compile`](crate::compile), `error_offset` is a byte
/// offset into the original, unescaped module source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserError {
    /// The location in the source where the error occurred
    pub error_offset: usize,
    /// The reason for the error
    pub reason: ParserErrorReason,
}

impl ParserError {
    /// Creates a new parser error at the given offset.
    #[must_use]
    pub const fn new(error_offset: usize, reason: ParserErrorReason) -> Self {
        Self {
            error_offset,
            reason,
        }
    }

    pub(crate) fn at(input: InputSpan<'_>, reason: ParserErrorReason) -> Self {
        Self::new(input.location_offset(), reason)
    }
}

impl<'a> nom::error::ParseError<InputSpan<'a>> for ParserError {
    fn from_error_kind(input: InputSpan<'a>, kind: nom::error::ErrorKind) -> Self {
        Self::at(input, ParserErrorReason::NomError(kind))
    }

    fn append(_input: InputSpan<'a>, _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at byte {})", self.reason, self.error_offset)
    }
}

/// An error that prevents a module source from compiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The source has no `<structure>…</structure>` region
    StructureNotFound,
    /// The `<structure>` region is not well-formed markup
    Parse(ParserError),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StructureNotFound => write!(f, "no <structure> region found"),
            Self::Parse(error) => write!(f, "parse error: {error}"),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<ParserError> for CompileError {
    fn from(error: ParserError) -> Self {
        Self::Parse(error)
    }
}

impl AsHummodError for CompileError {
    fn message(&self) -> String {
        match self {
            Self::StructureNotFound => "no <structure> region found".to_string(),
            Self::Parse(error) => error.reason.to_string(),
        }
    }

    fn context(&self) -> Vec<Context> {
        match self {
            Self::StructureNotFound => vec![Context::Help(
                "module sources must contain a `<structure>…</structure>` region".to_string(),
            )],
            Self::Parse(_) => vec![],
        }
    }

    fn error_location(&self, source: &str) -> Option<ErrorLocation> {
        match self {
            Self::StructureNotFound => None,
            Self::Parse(error) => Some(ErrorLocation::from_source_and_offset(
                source,
                error.error_offset,
            )),
        }
    }
}
