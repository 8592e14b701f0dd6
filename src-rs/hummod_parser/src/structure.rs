//! Locating the `<structure>` region and escaping bare ampersands.
//!
//! Module sources are only loosely markup: everything outside the
//! `<structure>` region is ignored, and many sources contain `&` characters
//! that are not part of any reference. Those are escaped to `&amp;` before the
//! region is parsed, and the positions of the insertions are remembered so
//! that parse errors can be reported against the original text.

use std::ops::Range;

use nom::{
    Parser as _,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, hex_digit1},
    combinator::recognize,
};

use crate::util::{InputSpan, Result};

const STRUCTURE_START: &str = "<structure>";
const STRUCTURE_END: &str = "</structure>";

/// Returns the byte range of the `<structure>…</structure>` region, tags
/// included, or `None` if the source has no complete region.
#[must_use]
pub fn structure_region(source: &str) -> Option<Range<usize>> {
    let start = source.find(STRUCTURE_START)?;
    let end = source[start..].find(STRUCTURE_END)? + start + STRUCTURE_END.len();
    Some(start..end)
}

/// Text whose bare ampersands were escaped, with enough bookkeeping to map
/// offsets back to the unescaped text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapedText {
    text: String,
    /// Offsets (in `text`) of each `&` that was followed by an inserted `amp;`
    escaped_at: Vec<usize>,
}

impl EscapedText {
    /// Escapes every `&` that does not begin a recognized reference.
    ///
    /// Recognized references are `&amp;`, `&lt;`, `&gt;`, `&apos;`, `&quot;`,
    /// `&#NNN;`, and `&#xHHH;`.
    #[must_use]
    pub fn escape(text: &str) -> Self {
        let mut escaped = String::with_capacity(text.len());
        let mut escaped_at = Vec::new();
        let mut rest = text;

        while let Some(index) = rest.find('&') {
            escaped.push_str(&rest[..=index]);
            rest = &rest[index + 1..];

            if !starts_with_reference(rest) {
                escaped_at.push(escaped.len() - 1);
                escaped.push_str("amp;");
            }
        }
        escaped.push_str(rest);

        Self {
            text: escaped,
            escaped_at,
        }
    }

    /// Returns the escaped text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns how many ampersands were escaped.
    #[must_use]
    pub fn escape_count(&self) -> usize {
        self.escaped_at.len()
    }

    /// Maps an offset in the escaped text back to the unescaped text.
    ///
    /// Offsets that fall inside an inserted `amp;` map to the `&` it follows.
    #[must_use]
    pub fn original_offset(&self, offset: usize) -> usize {
        let inserted_len = "amp;".len();
        let mut shift = 0;

        for &ampersand in &self.escaped_at {
            if offset > ampersand + inserted_len {
                shift += inserted_len;
            } else {
                if offset > ampersand {
                    shift += offset - ampersand;
                }
                break;
            }
        }

        offset - shift
    }
}

/// Checks whether the text following an `&` is a recognized reference.
fn starts_with_reference(after_ampersand: &str) -> bool {
    fn reference(input: InputSpan<'_>) -> Result<'_, InputSpan<'_>> {
        alt((
            tag("amp;"),
            tag("lt;"),
            tag("gt;"),
            tag("apos;"),
            tag("quot;"),
            recognize((char('#'), digit1, char(';'))),
            recognize((tag("#x"), hex_digit1, char(';'))),
        ))
        .parse(input)
    }

    reference(InputSpan::new(after_ampersand)).is_ok()
}
