//! A `nom`-based scanner for `${...}` placeholders.
use crate::ast::{Interpolation, PropertyPath, TextSegment};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{is_not, tag, take, take_while1},
    character::complete::char,
    combinator::{map, recognize},
    multi::many0,
    sequence::{delimited, preceded},
};

// --- Main Public Parser ---

/// Splits `input` into literal text and placeholders.
///
/// Scanning never fails: text that looks like a placeholder but is not one
/// (`${}`, `${a-b}`, an unterminated `${a`) is kept as literal text.
pub fn parse_interpolation(input: &str) -> Interpolation {
    match segments(input) {
        Ok((_, raw)) => Interpolation {
            segments: merge_literals(raw),
        },
        Err(_) => Interpolation {
            segments: vec![TextSegment::Literal(input.to_string())],
        },
    }
}

fn merge_literals(raw: Vec<TextSegment>) -> Vec<TextSegment> {
    let mut merged: Vec<TextSegment> = Vec::with_capacity(raw.len());
    for segment in raw {
        if let (Some(TextSegment::Literal(prev)), TextSegment::Literal(text)) =
            (merged.last_mut(), &segment)
        {
            prev.push_str(text);
            continue;
        }
        merged.push(segment);
    }
    merged
}

// --- Combinators ---

fn segments(input: &str) -> IResult<&str, Vec<TextSegment>> {
    many0(alt((escaped, placeholder, literal))).parse(input)
}

/// Letters, digits, dots, backslashes and whitespace.
fn expression_body(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '.' || c == '\\' || c.is_whitespace())
        .parse(input)
}

fn braced(input: &str) -> IResult<&str, &str> {
    delimited(tag("${"), expression_body, char('}')).parse(input)
}

fn placeholder(input: &str) -> IResult<&str, TextSegment> {
    map(braced, |body| TextSegment::Expression(PropertyPath::parse(body))).parse(input)
}

fn escaped(input: &str) -> IResult<&str, TextSegment> {
    map(preceded(char('\\'), recognize(braced)), |raw: &str| {
        TextSegment::Escaped(raw.to_string())
    })
    .parse(input)
}

fn literal(input: &str) -> IResult<&str, TextSegment> {
    map(alt((is_not("$\\"), take(1usize))), |text: &str| {
        TextSegment::Literal(text.to_string())
    })
    .parse(input)
}
