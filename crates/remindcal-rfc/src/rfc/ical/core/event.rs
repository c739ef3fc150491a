//! The event record extracted from one `VEVENT` block.

use chrono::TimeDelta;

use super::Timestamp;

/// One calendar event.
///
/// Every single-valued field holds the first value seen in the block; missing
/// properties stay `None` and are dealt with during expansion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Event {
    pub uid: Option<String>,
    /// Anchor of the recurrence when `rrule` is present.
    pub dtstart: Option<Timestamp>,
    pub dtend: Option<Timestamp>,
    /// Raw recurrence rule text, e.g. `FREQ=WEEKLY;INTERVAL=2`.
    pub rrule: Option<String>,
    /// Excluded recurrence instants, in document order.
    pub exdate: Vec<Timestamp>,
    pub summary: Option<String>,
    pub description: Option<String>,
}

impl Event {
    /// Returns whether the event carries a non-empty recurrence rule.
    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.rrule.as_deref().is_some_and(|rule| !rule.trim().is_empty())
    }

    /// Returns `DTEND - DTSTART` measured on the zone-stripped values.
    ///
    /// `None` when either bound is absent.
    #[must_use]
    pub fn duration(&self) -> Option<TimeDelta> {
        let start = self.dtstart.as_ref()?;
        let end = self.dtend.as_ref()?;
        Some(end.value.signed_duration_since(start.value))
    }
}
