//! Window expansion over a set of events.

use chrono::{DateTime, Local, TimeZone};

use super::error::{ExpandError, ExpandResult};
use super::occurrence::{Expansion, Occurrence};
use super::recurrence;
use super::window::Window;
use crate::rfc::ical::core::{Event, Timestamp};

/// Expands `events` over `window` into the host's local timezone.
///
/// See [`between_in`].
#[must_use]
pub fn between(events: &[Event], window: &Window) -> Expansion<Local> {
    between_in(events, window, &Local)
}

/// ## Summary
/// Produces every occurrence of `events` that starts inside `window`, with
/// start and end expressed in `zone`.
///
/// A non-recurring event is placed in `zone` first and its start compared to
/// the window there. A recurring event is expanded on its zone-stripped
/// anchor and each generated instant is compared to the window before being
/// placed in `zone`; recurrence arithmetic therefore never observes DST.
///
/// Failures are isolated per event: they are logged, collected in
/// [`Expansion::errors`] and the remaining events are still expanded.
#[must_use]
#[tracing::instrument(
    skip(events, zone),
    fields(event_count = events.len(), after = %window.after, before = %window.before)
)]
pub fn between_in<Z: TimeZone>(events: &[Event], window: &Window, zone: &Z) -> Expansion<Z> {
    let mut expansion = Expansion::default();

    for event in events {
        let result = if event.is_recurring() {
            expand_recurring(event, window, zone, &mut expansion)
        } else {
            expand_single(event, window, zone, &mut expansion)
        };

        if let Err(err) = result {
            match err {
                ExpandError::MissingDtend { .. } => tracing::error!(%err, "Skipping event"),
                _ => tracing::warn!(%err, "Skipping event"),
            }
            expansion.errors.push(err);
        }
    }

    expansion.occurrences.sort_by(|a, b| a.start.cmp(&b.start));

    tracing::debug!(
        occurrences = expansion.occurrences.len(),
        errors = expansion.errors.len(),
        "Expansion complete"
    );

    expansion
}

fn expand_single<Z: TimeZone>(
    event: &Event,
    window: &Window,
    zone: &Z,
    expansion: &mut Expansion<Z>,
) -> ExpandResult<()> {
    let dtstart = require_dtstart(event)?;
    let start = place(event, dtstart, zone)?;

    if !window.contains(start.naive_local()) {
        return Ok(());
    }

    // No DTEND means a zero-length event.
    let end = match &event.dtend {
        Some(dtend) => place(event, dtend, zone)?,
        None => start.clone(),
    };

    expansion.occurrences.push(Occurrence::of(event, start, end));
    Ok(())
}

fn expand_recurring<Z: TimeZone>(
    event: &Event,
    window: &Window,
    zone: &Z,
    expansion: &mut Expansion<Z>,
) -> ExpandResult<()> {
    let dtstart = require_dtstart(event)?;
    let duration = event.duration().ok_or_else(|| ExpandError::MissingDtend {
        uid: event.uid.clone(),
    })?;
    let rule = event.rrule.as_deref().unwrap_or_default();

    let exdates: Vec<_> = event.exdate.iter().map(|exdate| exdate.value).collect();
    let instants = recurrence::instants(rule, dtstart.value, &exdates, window).map_err(|err| {
        ExpandError::InvalidRule {
            uid: event.uid.clone(),
            rule: rule.to_string(),
            message: err.to_string(),
        }
    })?;

    tracing::trace!(uid = ?event.uid, count = instants.len(), "Recurrence instants in window");

    for value in instants {
        // Each instant keeps the anchor's form when placed in the output zone.
        let instant = Timestamp {
            value,
            ..dtstart.clone()
        };

        let occurrence = place(event, &instant, zone).and_then(|start| {
            let end = start
                .clone()
                .checked_add_signed(duration)
                .ok_or_else(|| ExpandError::OutOfRange {
                    uid: event.uid.clone(),
                })?;
            Ok(Occurrence::of(event, start, end))
        });

        match occurrence {
            Ok(occurrence) => expansion.occurrences.push(occurrence),
            Err(err) => {
                tracing::warn!(%err, "Skipping occurrence");
                expansion.errors.push(err);
            }
        }
    }

    Ok(())
}

fn require_dtstart(event: &Event) -> ExpandResult<&Timestamp> {
    event
        .dtstart
        .as_ref()
        .ok_or_else(|| ExpandError::MissingDtstart {
            uid: event.uid.clone(),
        })
}

fn place<Z: TimeZone>(event: &Event, timestamp: &Timestamp, zone: &Z) -> ExpandResult<DateTime<Z>> {
    timestamp
        .to_zone(zone)
        .ok_or_else(|| ExpandError::NonexistentLocalTime {
            uid: event.uid.clone(),
            value: timestamp.value,
        })
}
