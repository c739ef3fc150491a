//! Event feed parsing.
//!
//! Line splitting and content-line lexing follow RFC 5545 §3.1; only the
//! properties carried by [`Event`](crate::rfc::ical::core::Event) are
//! interpreted.

mod error;
mod lexer;
mod parser;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{parse_content_line, split_lines, unfold};
pub use parser::{Calendar, parse};
pub use values::{
    has_timestamp_shape, parse_date, parse_datetime, parse_time, parse_timestamp, unescape_text,
};
