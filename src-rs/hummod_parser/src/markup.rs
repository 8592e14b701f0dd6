//! A small markup parser for the `<structure>` region.
//!
//! This understands exactly what module sources use: elements, attributes
//! (which are skipped), text with the five predefined entities and numeric
//! character references, and comments. CDATA sections, processing
//! instructions, and DTDs are rejected.

use nom::{
    Parser,
    branch::alt,
    bytes::complete::{tag, take_till, take_until, take_while1},
    character::complete::multispace0,
    sequence::delimited,
};

use crate::{
    error::{ParserError, reason::ParserErrorReason},
    util::{InputSpan, Result},
};

/// An element of the markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    offset: usize,
    children: Vec<Content>,
}

/// The content of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// A child element
    Element(Element),
    /// Decoded character data
    Text(String),
}

impl Element {
    fn new(name: String, offset: usize, children: Vec<Content>) -> Self {
        Self {
            name,
            offset,
            children,
        }
    }

    /// Returns the tag name of the element.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the offset of the element's start tag in the parsed input.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|content| match content {
            Content::Element(element) => Some(element),
            Content::Text(_) => None,
        })
    }

    /// Returns the first child element with the given tag name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.elements().find(|element| element.name == name)
    }

    /// Returns every child element with the given tag name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> {
        self.elements().filter(move |element| element.name == name)
    }

    /// Returns the element's own text (not its descendants'), trimmed.
    #[must_use]
    pub fn text(&self) -> String {
        let text: String = self
            .children
            .iter()
            .filter_map(|content| match content {
                Content::Text(text) => Some(text.as_str()),
                Content::Element(_) => None,
            })
            .collect();

        text.trim().to_string()
    }

    /// Returns the text of the element and all its descendants, with runs of
    /// whitespace collapsed to single spaces.
    #[must_use]
    pub fn deep_text(&self) -> String {
        fn collect<'a>(element: &'a Element, acc: &mut Vec<&'a str>) {
            for content in &element.children {
                match content {
                    Content::Text(text) => acc.extend(text.split_whitespace()),
                    Content::Element(child) => collect(child, acc),
                }
            }
        }

        let mut words = Vec::new();
        collect(self, &mut words);
        words.join(" ")
    }
}

/// Parses a complete document consisting of a single root element.
///
/// This function **fails if the complete input is not consumed**.
pub fn parse_document(input: InputSpan<'_>) -> Result<'_, Element> {
    let (rest, ()) = skip_misc(input)?;
    let (rest, root) = element(rest).map_err(fail_with(
        rest.location_offset(),
        ParserErrorReason::ExpectElement,
    ))?;
    let (rest, ()) = skip_misc(rest)?;

    if rest.fragment().is_empty() {
        Ok((rest, root))
    } else {
        Err(nom::Err::Failure(ParserError::at(
            rest,
            ParserErrorReason::TrailingContent,
        )))
    }
}

/// Parses an element, including its children and end tag.
///
/// Returns a recoverable error only if the input does not start with `<`.
fn element(input: InputSpan<'_>) -> Result<'_, Element> {
    let offset = input.location_offset();

    let (rest, _) = literal("<").parse(input)?;
    let (rest, name) = tag_name(rest).map_err(fail_with(
        rest.location_offset(),
        ParserErrorReason::ExpectTagName,
    ))?;
    let name = (*name.fragment()).to_string();

    let (rest, ()) = attributes(rest, &name)?;

    if let Ok((rest, _)) = literal("/>").parse(rest) {
        return Ok((rest, Element::new(name, offset, vec![])));
    }

    let (rest, _) = literal(">").parse(rest).map_err(fail_with(
        rest.location_offset(),
        ParserErrorReason::UnterminatedStartTag { name: name.clone() },
    ))?;

    let (rest, children) = contents(rest)?;

    let end_tag_offset = rest.location_offset();
    let (rest, end_name) = end_tag(rest).map_err(fail_with(
        offset,
        ParserErrorReason::UnclosedElement { name: name.clone() },
    ))?;

    if *end_name.fragment() != name {
        return Err(nom::Err::Failure(ParserError::new(
            end_tag_offset,
            ParserErrorReason::MismatchedEndTag {
                expected: name,
                found: (*end_name.fragment()).to_string(),
            },
        )));
    }

    Ok((rest, Element::new(name, offset, children)))
}

/// Parses element content up to (not including) the next end tag or the end
/// of the input.
fn contents(input: InputSpan<'_>) -> Result<'_, Vec<Content>> {
    let mut children = Vec::new();
    let mut input = input;

    loop {
        let fragment = *input.fragment();

        if fragment.is_empty() || fragment.starts_with("</") {
            return Ok((input, children));
        }

        if fragment.starts_with("<!--") {
            (input, _) = comment(input)?;
        } else if fragment.starts_with('<') {
            let (rest, child) = element(input)?;
            children.push(Content::Element(child));
            input = rest;
        } else {
            let (rest, text) = text(input)?;
            children.push(Content::Text(text));
            input = rest;
        }
    }
}

/// Parses an end tag and returns its name.
///
/// Returns a recoverable error only if the input does not start with `</`.
fn end_tag(input: InputSpan<'_>) -> Result<'_, InputSpan<'_>> {
    let (rest, _) = literal("</").parse(input)?;
    let (rest, name) = tag_name(rest).map_err(fail_with(
        rest.location_offset(),
        ParserErrorReason::ExpectTagName,
    ))?;
    let (rest, _) = whitespace(rest)?;
    let (rest, _) = literal(">").parse(rest).map_err(fail_with(
        rest.location_offset(),
        ParserErrorReason::UnterminatedEndTag {
            name: (*name.fragment()).to_string(),
        },
    ))?;

    Ok((rest, name))
}

/// Skips the attributes of a start tag.
fn attributes<'a>(input: InputSpan<'a>, element_name: &str) -> Result<'a, ()> {
    let unterminated = || ParserErrorReason::UnterminatedStartTag {
        name: element_name.to_string(),
    };

    let mut input = input;
    loop {
        let (rest, _) = whitespace(input)?;
        let fragment = *rest.fragment();
        if fragment.is_empty() || fragment.starts_with('>') || fragment.starts_with("/>") {
            return Ok((rest, ()));
        }

        let (rest, _) = (
            tag_name,
            whitespace,
            literal("="),
            whitespace,
            quoted_value,
        )
            .parse(rest)
            .map_err(fail_with(rest.location_offset(), unterminated()))?;

        input = rest;
    }
}

fn quoted_value(input: InputSpan<'_>) -> Result<'_, InputSpan<'_>> {
    alt((
        delimited(literal("\""), take_till(|c: char| c == '"'), literal("\"")),
        delimited(literal("'"), take_till(|c: char| c == '\''), literal("'")),
    ))
    .parse(input)
}

fn comment(input: InputSpan<'_>) -> Result<'_, ()> {
    delimited_skip(input, "<!--", "-->", ParserErrorReason::UnterminatedComment)
        .map(|(rest, _)| (rest, ()))
}

/// Parses `open`, everything up to `close`, and `close`, returning the text
/// between them. Fails with `reason` if `close` never appears.
fn delimited_skip<'a>(
    input: InputSpan<'a>,
    open: &'static str,
    close: &'static str,
    reason: ParserErrorReason,
) -> Result<'a, InputSpan<'a>> {
    let (rest, _) = literal(open).parse(input)?;
    let (rest, body) = until(close)
        .parse(rest)
        .map_err(fail_with(input.location_offset(), reason))?;
    let (rest, _) = literal(close).parse(rest)?;
    Ok((rest, body))
}

/// Parses character data up to the next `<` and decodes its references.
fn text(input: InputSpan<'_>) -> Result<'_, String> {
    let (rest, raw) = take_till::<_, _, ParserError>(|c: char| c == '<').parse(input)?;
    let decoded = decode_references(raw).map_err(nom::Err::Failure)?;
    Ok((rest, decoded))
}

/// Decodes the predefined entities and numeric character references.
fn decode_references(raw: InputSpan<'_>) -> std::result::Result<String, ParserError> {
    let text = *raw.fragment();
    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(index) = rest.find('&') {
        decoded.push_str(&rest[..index]);

        let reference_offset = raw.location_offset() + (text.len() - rest.len()) + index;
        let after = &rest[index + 1..];
        let invalid = |entity: String| {
            ParserError::new(
                reference_offset,
                ParserErrorReason::InvalidEntity { entity },
            )
        };

        let Some(end) = after.find(';') else {
            return Err(invalid(rest[index..].chars().take(16).collect()));
        };
        let name = &after[..end];

        let character = match name {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "apos" => Some('\''),
            "quot" => Some('"'),
            _ => numeric_reference(name),
        };

        let Some(character) = character else {
            return Err(invalid(format!("&{name};")));
        };

        decoded.push(character);
        rest = &after[end + 1..];
    }

    decoded.push_str(rest);
    Ok(decoded)
}

fn numeric_reference(name: &str) -> Option<char> {
    let code_point = if let Some(hex) = name.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        name.strip_prefix('#')?.parse().ok()?
    };

    char::from_u32(code_point)
}

/// Skips whitespace and comments outside the root element.
fn skip_misc(input: InputSpan<'_>) -> Result<'_, ()> {
    let mut input = input;
    loop {
        let (rest, _) = whitespace(input)?;
        let fragment = *rest.fragment();

        if fragment.starts_with("<!--") {
            (input, _) = comment(rest)?;
        } else {
            return Ok((rest, ()));
        }
    }
}

fn tag_name(input: InputSpan<'_>) -> Result<'_, InputSpan<'_>> {
    take_while1(|c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')).parse(input)
}

fn whitespace(input: InputSpan<'_>) -> Result<'_, InputSpan<'_>> {
    multispace0(input)
}

fn literal<'a>(
    text: &'static str,
) -> impl Parser<InputSpan<'a>, Output = InputSpan<'a>, Error = ParserError> {
    tag(text)
}

fn until<'a>(
    text: &'static str,
) -> impl Parser<InputSpan<'a>, Output = InputSpan<'a>, Error = ParserError> {
    take_until(text)
}

/// Converts a recoverable error into a failure with the given reason, leaving
/// failures untouched.
fn fail_with(
    offset: usize,
    reason: ParserErrorReason,
) -> impl FnOnce(nom::Err<ParserError>) -> nom::Err<ParserError> {
    move |error| match error {
        nom::Err::Error(_) => nom::Err::Failure(ParserError::new(offset, reason)),
        failure @ (nom::Err::Failure(_) | nom::Err::Incomplete(_)) => failure,
    }
}
