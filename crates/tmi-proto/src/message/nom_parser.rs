//! Nom-based line tokenizer.
//!
//! Produces borrowed slices into the input line; [`super::parse`] turns them
//! into an owned [`Message`](super::Message).

use nom::{
    bytes::complete::{take_until, take_while1},
    character::complete::{char, space0},
    combinator::opt,
    error::ErrorKind,
    sequence::preceded,
    IResult,
};
use smallvec::SmallVec;

/// Parse the tag segment (the part after `@` and before the first space).
fn parse_tags(input: &str) -> IResult<&str, &str> {
    preceded(char('@'), take_until(" "))(input)
}

/// Parse the prefix (the part after `:` and before the first space).
fn parse_prefix(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_while1(|c| c != ' '))(input)
}

/// Parse the command token.
///
/// Any run of non-space characters is accepted; classification into a
/// numeric reply or a named command happens later.
fn parse_command(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c != ' ' && c != '\r' && c != '\n')(input)
}

/// Split the remainder into middle parameters and the trailing segment.
///
/// Runs of spaces between parameters collapse. The first token starting
/// with `:` ends the middle parameters; everything after that colon, spaces
/// included, is the trailing segment.
fn parse_params(input: &str) -> (&str, SmallVec<[&str; 15]>, Option<&str>) {
    let mut params: SmallVec<[&str; 15]> = SmallVec::new();
    let mut rest = input;

    while let Some(b' ') = rest.as_bytes().first().copied() {
        while rest.as_bytes().first() == Some(&b' ') {
            rest = &rest[1..];
        }

        if rest.is_empty() || rest.starts_with('\r') || rest.starts_with('\n') {
            break;
        }

        if let Some(after_colon) = rest.strip_prefix(':') {
            let end = after_colon.find(['\r', '\n']).unwrap_or(after_colon.len());
            return (&after_colon[end..], params, Some(&after_colon[..end]));
        }

        let end = rest.find([' ', '\r', '\n']).unwrap_or(rest.len());
        params.push(&rest[..end]);
        rest = &rest[end..];
    }

    (rest, params, None)
}

/// Parse a complete line into its components.
///
/// ```text
/// [@tags] [:prefix] <command> [params...] [:trailing]
/// ```
pub(crate) fn parse_message(input: &str) -> IResult<&str, ParsedMessage<'_>> {
    // A leading `@` commits to a tag segment; without a space after it there
    // is no command to read.
    let (input, tags) = if input.starts_with('@') {
        let (input, tags) = parse_tags(input)?;
        (input, Some(tags))
    } else {
        (input, None)
    };
    let (input, _) = space0(input)?;

    let (input, prefix) = opt(parse_prefix)(input)?;
    let (input, _) = space0(input)?;

    let (input, command) = parse_command(input)?;

    let (rest, params, trailing) = parse_params(input);

    Ok((
        rest,
        ParsedMessage {
            tags,
            prefix,
            command,
            params,
            trailing,
        },
    ))
}

/// A tokenized line holding slices of the original input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedMessage<'a> {
    /// Raw tag segment (without the leading `@`), if present.
    pub tags: Option<&'a str>,
    /// Raw prefix (without the leading `:`), if present.
    pub prefix: Option<&'a str>,
    /// The command token.
    pub command: &'a str,
    /// Middle parameters.
    pub params: SmallVec<[&'a str; 15]>,
    /// Trailing segment (without its colon), if present.
    pub trailing: Option<&'a str>,
}

impl<'a> ParsedMessage<'a> {
    /// Tokenize a line, reporting where parsing stopped on failure.
    pub fn parse(input: &'a str) -> Result<Self, DetailedParseError> {
        match parse_message(input) {
            Ok((_remaining, msg)) => Ok(msg),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(DetailedParseError {
                position: input.len() - e.input.len(),
                kind: e.code,
            }),
            Err(nom::Err::Incomplete(_)) => Err(DetailedParseError {
                position: input.len(),
                kind: ErrorKind::Eof,
            }),
        }
    }
}

/// Tokenizer failure with the byte position it happened at.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DetailedParseError {
    /// Byte position where parsing failed.
    pub position: usize,
    /// The nom error kind.
    pub kind: ErrorKind,
}
