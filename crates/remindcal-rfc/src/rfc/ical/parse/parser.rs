//! Event feed parser.
//!
//! Walks the logical lines of a document once, collecting the interpreted
//! properties of every `VEVENT` block into an [`Event`].

use chrono::TimeZone;

use super::error::{ParseError, ParseErrorKind};
use super::lexer::{parse_content_line, split_lines};
use super::values::{has_timestamp_shape, parse_timestamp, unescape_text};
use crate::rfc::ical::core::{ContentLine, Event, Timestamp};
use crate::rfc::ical::expand::{self, Expansion, Window};

const EVENT_COMPONENT: &str = "VEVENT";

/// The events of one parsed document, plus the problems met on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calendar {
    /// Events in document order.
    pub events: Vec<Event>,
    /// Field- and block-level problems. None of them stopped the parse.
    pub issues: Vec<ParseError>,
}

impl Calendar {
    /// Parses a document. See [`parse`].
    #[must_use]
    pub fn parse(input: &str) -> Self {
        parse(input)
    }

    /// Expands the events into the host's local timezone.
    #[must_use]
    pub fn between(&self, window: &Window) -> Expansion {
        expand::between(&self.events, window)
    }

    /// Expands the events into `zone`.
    #[must_use]
    pub fn between_in<Z: TimeZone>(&self, window: &Window, zone: &Z) -> Expansion<Z> {
        expand::between_in(&self.events, window, zone)
    }
}

/// Parses an event feed.
///
/// Content outside `BEGIN:VEVENT` / `END:VEVENT`, lines that do not match an
/// interpreted field shape, and stray `END:VEVENT` markers are skipped
/// silently. Invalid timestamp values and events without `DTSTART` are
/// reported in [`Calendar::issues`]; the rest of the document is still parsed.
#[must_use]
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> Calendar {
    tracing::debug!("Parsing event feed");

    let lines = split_lines(input);
    tracing::trace!(count = lines.len(), "Split lines");

    let mut calendar = Calendar::default();
    let mut state = BlockState::Outside;

    for (line_num, line) in lines {
        let content_line = match parse_content_line(&line, line_num) {
            Ok(content_line) => content_line,
            Err(err) => {
                tracing::trace!(%err, "Skipping unrecognized line");
                continue;
            }
        };

        if content_line.is_marker("BEGIN", EVENT_COMPONENT) {
            if let BlockState::Inside(open) = &state {
                tracing::warn!(
                    begin_line = open.begin_line,
                    line = line_num,
                    "Discarding VEVENT that was never closed"
                );
            }
            state = BlockState::Inside(EventBuilder::new(line_num));
            continue;
        }

        if content_line.is_marker("END", EVENT_COMPONENT) {
            match std::mem::replace(&mut state, BlockState::Outside) {
                BlockState::Inside(builder) => {
                    let (event, issue) = builder.finish();
                    if let Some(issue) = issue {
                        tracing::warn!(%issue, "Event without start");
                        calendar.issues.push(issue);
                    }
                    calendar.events.push(event);
                }
                BlockState::Outside => {
                    tracing::trace!(line = line_num, "Ignoring stray END:VEVENT");
                }
            }
            continue;
        }

        if let BlockState::Inside(builder) = &mut state {
            let value_col = line.len() - content_line.raw_value.len() + 1;
            builder.accept(&content_line, line_num, value_col, &mut calendar.issues);
        }
    }

    if let BlockState::Inside(open) = state {
        tracing::warn!(begin_line = open.begin_line, "Document ended inside a VEVENT");
    }

    tracing::debug!(
        events = calendar.events.len(),
        issues = calendar.issues.len(),
        "Event feed parsed"
    );

    calendar
}

/// Where the line walk currently is.
enum BlockState {
    Outside,
    Inside(EventBuilder),
}

/// Per-property value lists of the open block.
#[derive(Debug, Default)]
struct EventBuilder {
    begin_line: usize,
    /// Names of sub-components (e.g. `VALARM`) currently open inside the block.
    nested: Vec<String>,
    uid: Vec<String>,
    dtstart: Vec<Timestamp>,
    dtend: Vec<Timestamp>,
    rrule: Vec<String>,
    exdate: Vec<Timestamp>,
    summary: Vec<String>,
    description: Vec<String>,
}

impl EventBuilder {
    fn new(begin_line: usize) -> Self {
        Self {
            begin_line,
            ..Self::default()
        }
    }

    fn accept(
        &mut self,
        line: &ContentLine,
        line_num: usize,
        value_col: usize,
        issues: &mut Vec<ParseError>,
    ) {
        if line.name == "BEGIN" {
            self.nested.push(line.raw_value.to_ascii_uppercase());
            return;
        }
        if let Some(open) = self.nested.last() {
            if line.name == "END" && line.raw_value.eq_ignore_ascii_case(open) {
                self.nested.pop();
            }
            return;
        }

        match line.name.as_str() {
            "DTSTART" | "DTEND" | "EXDATE" => {
                self.accept_timestamps(line, line_num, value_col, issues);
            }
            "UID" | "RRULE" | "SUMMARY" | "DESCRIPTION" if line.params.is_empty() => {
                let text = unescape_text(&line.raw_value);
                match line.name.as_str() {
                    "UID" => self.uid.push(text),
                    "RRULE" => self.rrule.push(text),
                    "SUMMARY" => self.summary.push(text),
                    _ => self.description.push(text),
                }
            }
            _ => {}
        }
    }

    fn accept_timestamps(
        &mut self,
        line: &ContentLine,
        line_num: usize,
        value_col: usize,
        issues: &mut Vec<ParseError>,
    ) {
        let supported = match line.params.as_slice() {
            [] => true,
            [param] => {
                param.name == "TZID" || (param.name == "VALUE" && param.has_value("DATE"))
            }
            _ => false,
        };
        if !supported {
            tracing::trace!(property = %line.name, line = line_num, "Unsupported parameters");
            return;
        }
        let tzid = line.tzid();

        // Only EXDATE may carry a list.
        let raw_values: Vec<&str> = if line.name == "EXDATE" {
            line.raw_value.split(',').collect()
        } else {
            vec![line.raw_value.as_str()]
        };

        if !raw_values.iter().all(|raw| has_timestamp_shape(raw)) {
            tracing::trace!(
                property = %line.name,
                line = line_num,
                "Value is not a date or date-time"
            );
            return;
        }

        let target = match line.name.as_str() {
            "DTSTART" => &mut self.dtstart,
            "DTEND" => &mut self.dtend,
            _ => &mut self.exdate,
        };

        let mut col = value_col;
        for raw in raw_values {
            match parse_timestamp(raw, tzid, line_num, col) {
                Ok(timestamp) => target.push(timestamp),
                Err(err) => {
                    let err = err.with_property(line.name.clone());
                    tracing::warn!(%err, "Skipping invalid timestamp");
                    issues.push(err);
                }
            }
            col += raw.len() + 1;
        }
    }

    fn finish(self) -> (Event, Option<ParseError>) {
        let issue = self.dtstart.is_empty().then(|| {
            let issue = ParseError::new(
                ParseErrorKind::MissingRequiredProperty,
                self.begin_line,
                1,
            )
            .with_property("DTSTART");
            match self.uid.first() {
                Some(uid) => issue.with_context(format!("UID {uid}")),
                None => issue,
            }
        });

        let event = Event {
            uid: self.uid.into_iter().next(),
            dtstart: self.dtstart.into_iter().next(),
            dtend: self.dtend.into_iter().next(),
            rrule: self.rrule.into_iter().next(),
            exdate: self.exdate,
            summary: self.summary.into_iter().next(),
            description: self.description.into_iter().next(),
        };

        (event, issue)
    }
}

impl From<&str> for Calendar {
    fn from(input: &str) -> Self {
        parse(input)
    }
}
