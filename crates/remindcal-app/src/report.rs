//! The document the binary prints for one run.

use chrono::{DateTime, TimeZone};
use remindcal_core::config::ReminderConfig;
use remindcal_rfc::rfc::ical::Calendar;
use remindcal_service::reminder::{ReminderMessage, due_tasks};
use remindcal_service::schedule::{ScheduleEntry, plan_day};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyReport {
    /// Entries for the current day, as they would be stored.
    pub entries: Vec<ScheduleEntry>,
    /// Message due right now, if any.
    pub reminder: Option<ReminderMessage>,
}

/// ## Summary
/// Parses both feeds, plans `now`'s day in `now`'s zone and picks the
/// reminder due at `now`.
///
/// Parse issues and expansion errors are logged and otherwise ignored.
#[must_use]
pub fn build_report<Z: TimeZone>(
    reminder: &ReminderConfig,
    tasks: &str,
    holidays: Option<&str>,
    now: &DateTime<Z>,
) -> DailyReport {
    let tasks = parse_logged("tasks", tasks);
    let holidays = holidays.map(|document| parse_logged("holidays", document));

    let schedule = plan_day(&tasks, holidays.as_ref(), now.date_naive(), &now.timezone());
    for err in &schedule.errors {
        tracing::warn!(%err, "Event left out of the schedule");
    }

    let due = due_tasks(&schedule.entries, now.naive_local(), reminder.lead_minutes);
    let message = ReminderMessage::compose(&reminder.mention, reminder.lead_minutes, &due);

    DailyReport {
        entries: schedule.entries,
        reminder: message,
    }
}

fn parse_logged(feed: &str, document: &str) -> Calendar {
    let calendar = Calendar::parse(document);
    for issue in &calendar.issues {
        tracing::warn!(feed, %issue, "Calendar issue");
    }
    tracing::info!(feed, events = calendar.events.len(), "Calendar parsed");
    calendar
}
