//! Recurrence rule evaluation using the `rrule` crate.
//!
//! Rules are evaluated on zone-stripped values: the anchor, the exclusions
//! and any `UNTIL` are handed to the library as UTC so that no DST shift can
//! move an instant. Callers place the resulting wall-clock values in their
//! output zone afterwards.

use chrono::{DateTime, NaiveDateTime, TimeDelta};
use rrule::{RRule, RRuleError, Tz, Unvalidated};

use super::Window;

/// Upper bound on instants generated for one event.
pub const MAX_INSTANCES: u16 = u16::MAX;

/// ## Summary
/// Rewrites rule text so the `rrule` crate evaluates it without zones.
///
/// Strips an optional `RRULE:` prefix and turns `UNTIL` into a UTC date-time:
/// `UNTIL=20240131` becomes `UNTIL=20240131T000000Z` (midnight of that day)
/// and a floating `UNTIL=20240131T100000` gains the `Z` designator. Other
/// parts are passed through untouched.
#[must_use]
pub fn normalize_rule(rule: &str) -> String {
    let rule = rule.trim();
    let rule = match rule.get(..6) {
        Some(prefix) if prefix.eq_ignore_ascii_case("RRULE:") => &rule[6..],
        _ => rule,
    };

    rule.split(';')
        .map(|part| {
            let Some((key, value)) = part.split_once('=') else {
                return part.to_string();
            };
            if !key.eq_ignore_ascii_case("UNTIL") {
                return part.to_string();
            }
            match value.len() {
                8 => format!("{key}={value}T000000Z"),
                15 => format!("{key}={value}Z"),
                _ => part.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// ## Summary
/// Returns the instants of `rule` anchored at `anchor` that fall inside
/// `window`, with every exact match in `exdates` removed.
///
/// Instants are returned in ascending order as zone-stripped values. At most
/// [`MAX_INSTANCES`] are generated; a truncated expansion is logged.
///
/// ## Errors
/// Returns the library error if the rule text does not parse or does not
/// validate against the anchor.
pub fn instants(
    rule: &str,
    anchor: NaiveDateTime,
    exdates: &[NaiveDateTime],
    window: &Window,
) -> Result<Vec<NaiveDateTime>, RRuleError> {
    let normalized = normalize_rule(rule);
    tracing::trace!(rule = %normalized, %anchor, "Evaluating recurrence rule");

    let rrule = normalized.parse::<RRule<Unvalidated>>()?;
    let mut rrule_set = rrule.build(as_instant(anchor))?;

    if !exdates.is_empty() {
        rrule_set = rrule_set.set_exdates(exdates.iter().copied().map(as_instant).collect());
    }

    // The library bounds are widened by a second; the window decides inclusivity.
    let margin = TimeDelta::seconds(1);
    if let Some(after) = window.after.checked_sub_signed(margin) {
        rrule_set = rrule_set.after(as_instant(after));
    }
    if let Some(before) = window.before.checked_add_signed(margin) {
        rrule_set = rrule_set.before(as_instant(before));
    }

    let result = rrule_set.all(MAX_INSTANCES);
    if result.limited {
        tracing::warn!(
            rule = %normalized,
            count = result.dates.len(),
            "Recurrence expansion truncated"
        );
    }

    Ok(result
        .dates
        .into_iter()
        .map(|dt| dt.naive_utc())
        .filter(|value| window.contains(*value))
        .collect())
}

fn as_instant(value: NaiveDateTime) -> DateTime<Tz> {
    value.and_utc().with_timezone(&Tz::UTC)
}
