//! Reminder selection and message text.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::schedule::{DATE_FORMAT, EntryKind, ScheduleEntry};

/// ## Summary
/// Returns the task entries of `now`'s day that start exactly `lead_minutes`
/// from `now`, compared to the minute.
///
/// Nothing is due on a day that has a holiday entry.
#[must_use]
pub fn due_tasks(
    entries: &[ScheduleEntry],
    now: NaiveDateTime,
    lead_minutes: u32,
) -> Vec<&ScheduleEntry> {
    let today = now.format(DATE_FORMAT).to_string();
    let todays: Vec<&ScheduleEntry> = entries.iter().filter(|entry| entry.date == today).collect();

    if todays.iter().any(|entry| entry.kind == EntryKind::Holiday) {
        tracing::info!(%today, "Holiday, no reminders");
        return Vec::new();
    }

    let Some(target) = now.checked_add_signed(TimeDelta::minutes(i64::from(lead_minutes))) else {
        return Vec::new();
    };
    let target_time = target.format("%H:%M:00").to_string();

    let due: Vec<&ScheduleEntry> = todays
        .into_iter()
        .filter(|entry| entry.kind == EntryKind::Task && entry.time == target_time)
        .collect();
    tracing::debug!(%target_time, count = due.len(), "Selected due tasks");

    due
}

/// Chat message announcing upcoming tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderMessage {
    pub text: String,
}

impl ReminderMessage {
    /// ## Summary
    /// Builds the message: `mention` on the first line, then one
    /// `【N分前】summary` line per task.
    ///
    /// Returns `None` when there is nothing to announce.
    #[must_use]
    pub fn compose(mention: &str, lead_minutes: u32, tasks: &[&ScheduleEntry]) -> Option<Self> {
        if tasks.is_empty() {
            return None;
        }

        let mut lines = Vec::with_capacity(tasks.len() + 1);
        lines.push(mention.to_string());
        lines.extend(
            tasks
                .iter()
                .map(|task| format!("【{lead_minutes}分前】{}", task.summary)),
        );

        Some(Self {
            text: lines.join("\n"),
        })
    }
}
