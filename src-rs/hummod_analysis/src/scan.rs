//! Extraction of cross-module references from raw module text.
//!
//! References are found textually rather than from the compiled model: the
//! tags of the `<structure>` region are stripped and the remaining text is
//! scanned for tokens of the form `Module.rest`.

use hummod_parser::structure_region;
use indexmap::IndexSet;
use nom::{
    IResult, Parser as _,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, satisfy},
    combinator::recognize,
    sequence::terminated,
};

use crate::config::AnalysisConfig;

/// Returns the distinct modules referenced by a module source, in the order
/// they first appear.
///
/// A source without a `<structure>` region references nothing.
pub fn direct_references(source: &str, config: &AnalysisConfig) -> IndexSet<String> {
    let Some(region) = structure_region(source) else {
        return IndexSet::new();
    };

    let inner = &source[region.start + "<structure>".len()..region.end - "</structure>".len()];
    scan(&strip_tags(inner), config)
}

/// Replaces every tag with a space and collapses runs of whitespace.
fn strip_tags(text: &str) -> String {
    let mut stripped = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        match after.find('>') {
            Some(end) if end > 0 => {
                stripped.push_str(&rest[..start]);
                stripped.push(' ');
                rest = &after[end + 1..];
            }
            Some(_) | None => {
                stripped.push_str(&rest[..=start]);
                rest = after;
            }
        }
    }
    stripped.push_str(rest);

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Finds the module part of every `Module.rest` token, leftmost first and
/// without overlaps.
///
/// A token may only start where the preceding character is neither a word
/// character nor a `.`, so numbers like `1.5` and the tails of dotted paths
/// are not mistaken for references.
fn scan(text: &str, config: &AnalysisConfig) -> IndexSet<String> {
    let mut references = IndexSet::new();
    let mut previous: Option<char> = None;
    let mut rest = text;

    while let Some(current) = rest.chars().next() {
        let at_boundary = previous.is_none_or(|c| !is_word_char(c) && c != '.');

        if at_boundary && let Ok((after, module)) = reference(rest) {
            if !config.is_reserved(module) {
                references.insert(module.to_string());
            }
            previous = rest[..rest.len() - after.len()].chars().next_back();
            rest = after;
            continue;
        }

        previous = Some(current);
        rest = &rest[current.len_utf8()..];
    }

    references
}

/// Parses `Module.rest` and returns the module part.
fn reference(input: &str) -> IResult<&str, &str> {
    terminated(
        recognize((
            satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
            take_while(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
        )),
        (
            char('.'),
            take_while1(|c: char| is_word_char(c) || "[]()/,-".contains(c)),
        ),
    )
    .parse(input)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
