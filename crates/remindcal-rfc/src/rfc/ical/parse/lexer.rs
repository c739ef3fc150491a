//! Content line lexer (RFC 5545 §3.1).
//!
//! Handles line unfolding and tokenization of content lines.

use std::iter::Peekable;
use std::str::CharIndices;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{ContentLine, Parameter};

/// Removes every soft line continuation from `input`.
///
/// A continuation is a line terminator (CRLF or bare LF) immediately followed
/// by a single SPACE or HTAB; both the terminator and that one whitespace
/// character are dropped. Hard line breaks are preserved as written.
#[must_use]
pub fn unfold(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                if matches!(chars.peek(), Some(' ' | '\t')) {
                    chars.next();
                } else {
                    result.push_str("\r\n");
                }
            }
            '\n' => {
                if matches!(chars.peek(), Some(' ' | '\t')) {
                    chars.next();
                } else {
                    result.push('\n');
                }
            }
            other => result.push(other),
        }
    }

    result
}

/// Splits input into logical lines, merging folded continuations.
///
/// Returns each logical line with the 1-based number of the physical line it
/// starts on. A document containing any CRLF is split on CRLF only, so a bare
/// LF inside a text value stays part of that value; a document without CRLF
/// is split on bare LF. Lines starting with SP/HTAB are continuations of the
/// previous line; unfolding removes the line break and that single whitespace
/// character (no space is inserted). Blank lines are dropped.
#[must_use]
pub fn split_lines(input: &str) -> Vec<(usize, String)> {
    let terminator = if input.contains("\r\n") { "\r\n" } else { "\n" };
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (i, line) in input.split(terminator).enumerate() {
        if line.is_empty() {
            continue;
        }

        if let Some(continuation) = line.strip_prefix([' ', '\t']) {
            if let Some((_, prev)) = lines.last_mut() {
                prev.push_str(continuation);
            } else {
                lines.push((i + 1, continuation.to_string()));
            }
        } else {
            lines.push((i + 1, line.to_string()));
        }
    }

    lines
}

/// Parses a single content line.
///
/// Format: `name *(";" param) ":" value`
///
/// ## Errors
/// Returns an error if the line is malformed or contains invalid characters.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let mut chars = line.char_indices().peekable();
    let mut delimiter = None;

    // Find the property name (ends at ';' or ':')
    while let Some(&(i, c)) = chars.peek() {
        if c == ';' || c == ':' {
            delimiter = Some((i, c));
            chars.next();
            break;
        }
        if !c.is_ascii_alphanumeric() && c != '-' {
            return Err(ParseError::new(
                ParseErrorKind::InvalidPropertyName,
                line_num,
                i + 1,
            ));
        }
        chars.next();
    }

    let Some((name_end, first_delimiter)) = delimiter else {
        return Err(ParseError::new(
            ParseErrorKind::MissingColon,
            line_num,
            line.len(),
        ));
    };

    if name_end == 0 {
        return Err(ParseError::new(
            ParseErrorKind::MissingPropertyName,
            line_num,
            1,
        ));
    }

    let name = line[..name_end].to_ascii_uppercase();

    let mut params = Vec::new();
    let colon_pos = if first_delimiter == ':' {
        name_end
    } else {
        loop {
            let (param, colon) = parse_parameter(&mut chars, line, line_num)?;
            params.push(param);
            if let Some(colon) = colon {
                break colon;
            }
        }
    };

    Ok(ContentLine {
        name,
        params,
        raw_value: line[colon_pos + 1..].to_string(),
    })
}

/// Parses a single parameter from the character stream.
///
/// Returns the parameter and, when it was terminated by ':', the colon's byte
/// offset.
fn parse_parameter(
    chars: &mut Peekable<CharIndices<'_>>,
    line: &str,
    line_num: usize,
) -> ParseResult<(Parameter, Option<usize>)> {
    let start = chars.peek().map_or(line.len(), |&(i, _)| i);

    // Parse parameter name (up to '=')
    let mut name_end = start;
    while let Some(&(i, c)) = chars.peek() {
        if c == '=' {
            name_end = i;
            chars.next();
            break;
        }
        if !c.is_ascii_alphanumeric() && c != '-' {
            return Err(ParseError::new(
                ParseErrorKind::InvalidParameter,
                line_num,
                i + 1,
            ));
        }
        chars.next();
    }

    if name_end == start {
        return Err(ParseError::new(
            ParseErrorKind::InvalidParameter,
            line_num,
            start + 1,
        ));
    }

    let param_name = line[start..name_end].to_ascii_uppercase();

    // Parse parameter values (comma-separated, may be quoted)
    let mut values = Vec::new();
    loop {
        values.push(parse_param_value(chars, line, line_num)?);

        match chars.next() {
            Some((_, ',')) => {}
            Some((_, ';')) => return Ok((Parameter::with_values(param_name, values), None)),
            Some((i, ':')) => {
                return Ok((Parameter::with_values(param_name, values), Some(i)));
            }
            Some((i, c)) => {
                return Err(
                    ParseError::new(ParseErrorKind::InvalidParameter, line_num, i + 1)
                        .with_context(format!("unexpected character '{c}'")),
                );
            }
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::MissingColon,
                    line_num,
                    line.len(),
                ));
            }
        }
    }
}

/// Parses a parameter value (possibly quoted).
fn parse_param_value(
    chars: &mut Peekable<CharIndices<'_>>,
    line: &str,
    line_num: usize,
) -> ParseResult<String> {
    let Some(&(start, first)) = chars.peek() else {
        return Err(ParseError::new(
            ParseErrorKind::InvalidParameter,
            line_num,
            line.len(),
        ));
    };

    if first != '"' {
        // Unquoted value (ends at ',' ';' or ':')
        let mut end = start;
        while let Some(&(i, c)) = chars.peek() {
            if c == ',' || c == ';' || c == ':' {
                break;
            }
            end = i + c.len_utf8();
            chars.next();
        }
        return Ok(line[start..end].to_string());
    }

    chars.next(); // consume opening quote
    let mut value = String::new();

    for (_, c) in chars.by_ref() {
        if c == '"' {
            return Ok(value);
        }
        value.push(c);
    }

    Err(ParseError::new(
        ParseErrorKind::UnclosedQuote,
        line_num,
        start + 1,
    ))
}
