//! Calendar event feeds (RFC 5545 subset).
//!
//! Only `VEVENT` blocks and the `UID`, `DTSTART`, `DTEND`, `EXDATE`, `RRULE`,
//! `SUMMARY` and `DESCRIPTION` properties are interpreted; everything else in
//! the document is skipped.

pub mod core;
pub mod expand;
pub mod parse;

pub use core::{DateTimeForm, Event, Timestamp};
pub use expand::{Expansion, ExpandError, Occurrence, Window, between, between_in};
pub use parse::{Calendar, ParseError, ParseErrorKind, parse};
