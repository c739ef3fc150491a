//! Expansion output types.

use chrono::{DateTime, Local, TimeZone};

use super::ExpandError;
use crate::rfc::ical::core::Event;

/// One concrete instance of an event.
#[derive(Debug, Clone)]
pub struct Occurrence<Z: TimeZone = Local> {
    pub uid: Option<String>,
    pub start: DateTime<Z>,
    /// `start` plus the event's duration.
    pub end: DateTime<Z>,
    pub summary: Option<String>,
}

impl<Z: TimeZone> Occurrence<Z> {
    /// Creates an occurrence carrying the identity fields of `event`.
    #[must_use]
    pub fn of(event: &Event, start: DateTime<Z>, end: DateTime<Z>) -> Self {
        Self {
            uid: event.uid.clone(),
            start,
            end,
            summary: event.summary.clone(),
        }
    }
}

impl<Z: TimeZone> PartialEq for Occurrence<Z> {
    fn eq(&self, other: &Self) -> bool {
        self.uid == other.uid
            && self.start == other.start
            && self.end == other.end
            && self.summary == other.summary
    }
}

/// The result of expanding a set of events over one window.
#[derive(Debug, Clone)]
pub struct Expansion<Z: TimeZone = Local> {
    /// Occurrences sorted by `start`; equal starts keep event order.
    pub occurrences: Vec<Occurrence<Z>>,
    /// Per-event failures. Events listed here are missing from
    /// `occurrences` in whole or in part.
    pub errors: Vec<ExpandError>,
}

impl<Z: TimeZone> Expansion<Z> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.occurrences.len()
    }
}

impl<Z: TimeZone> Default for Expansion<Z> {
    fn default() -> Self {
        Self {
            occurrences: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl<Z: TimeZone> IntoIterator for Expansion<Z> {
    type Item = Occurrence<Z>;
    type IntoIter = std::vec::IntoIter<Occurrence<Z>>;

    fn into_iter(self) -> Self::IntoIter {
        self.occurrences.into_iter()
    }
}
