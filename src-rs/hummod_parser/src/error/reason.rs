//! Reasons a module's markup failed to parse.

use std::fmt;

/// The reason for a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserErrorReason {
    /// Expected an element start tag
    ExpectElement,
    /// Expected a tag name after `<` or `</`
    ExpectTagName,
    /// A start tag was not closed with `>` or `/>`
    UnterminatedStartTag {
        /// The name of the element
        name: String,
    },
    /// An end tag was not closed with `>`
    UnterminatedEndTag {
        /// The name in the end tag
        name: String,
    },
    /// An element was opened but never closed
    UnclosedElement {
        /// The name of the element
        name: String,
    },
    /// An end tag did not match the element it closes
    MismatchedEndTag {
        /// The name of the element being closed
        expected: String,
        /// The name found in the end tag
        found: String,
    },
    /// A `<!--` comment was not terminated
    UnterminatedComment,
    /// A character or entity reference could not be decoded
    InvalidEntity {
        /// The text of the reference, including `&` and `;` when present
        entity: String,
    },
    /// Content remained after the root element
    TrailingContent,
    /// A curve did not have exactly two complete numeric points
    MalformedCurve {
        /// The name of the curve
        name: String,
    },
    /// A low-level nom error
    NomError(nom::error::ErrorKind),
}

impl fmt::Display for ParserErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectElement => write!(f, "expected an element"),
            Self::ExpectTagName => write!(f, "expected a tag name"),
            Self::UnterminatedStartTag { name } => {
                write!(f, "start tag `<{name}` is missing its closing `>`")
            }
            Self::UnterminatedEndTag { name } => {
                write!(f, "end tag `</{name}` is missing its closing `>`")
            }
            Self::UnclosedElement { name } => write!(f, "element `<{name}>` is never closed"),
            Self::MismatchedEndTag { expected, found } => {
                write!(f, "expected `</{expected}>`, found `</{found}>`")
            }
            Self::UnterminatedComment => write!(f, "comment is missing its closing `-->`"),
            Self::InvalidEntity { entity } => write!(f, "invalid reference `{entity}`"),
            Self::TrailingContent => write!(f, "unexpected content after `</structure>`"),
            Self::MalformedCurve { name } => write!(
                f,
                "curve `{name}` must have exactly two points with numeric `x`, `y`, and `slope`"
            ),
            Self::NomError(kind) => write!(f, "unexpected input ({})", kind.description()),
        }
    }
}
