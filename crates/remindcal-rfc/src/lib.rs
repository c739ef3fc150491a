//! Calendar feed parsing and occurrence expansion.
//!
//! [`rfc::ical::parse`] turns an iCalendar-style document into [`rfc::ical::core::Event`]
//! records, and [`rfc::ical::expand`] answers which occurrences of those events
//! fall inside a time window.

pub mod rfc;
