//! Daily schedule entries.
//!
//! Each morning the task and holiday feeds are expanded over the current day
//! and every occurrence becomes one [`ScheduleEntry`], keyed by the event UID.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime, TimeZone};
use remindcal_rfc::rfc::ical::{Calendar, Occurrence, Window};
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

const TASK_WINDOW_START: NaiveTime = time_of_day(0, 10, 0, 0);
const END_OF_DAY: NaiveTime = time_of_day(23, 59, 59, 999_999);

const fn time_of_day(hour: u32, min: u32, sec: u32, micro: u32) -> NaiveTime {
    match NaiveTime::from_hms_micro_opt(hour, min, sec, micro) {
        Some(time) => time,
        None => panic!("invalid time of day"),
    }
}

/// Which feed an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryKind {
    Task,
    Holiday,
}

/// One stored occurrence for the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScheduleEntry {
    /// Event UID. Entries with the same id overwrite each other.
    pub id: String,
    /// Local start date, `YYYY-MM-DD`.
    pub date: String,
    /// Local start time, `HH:MM:SS`.
    pub time: String,
    /// Unix timestamp of the occurrence end; the record expires then.
    pub expired_at: i64,
    pub summary: String,
    #[serde(rename = "Type")]
    pub kind: EntryKind,
}

impl ScheduleEntry {
    /// ## Summary
    /// Builds an entry from an occurrence, reading date and time in the
    /// occurrence's own zone.
    ///
    /// ## Errors
    /// Returns [`ServiceError::MissingUid`] if the occurrence has no UID.
    pub fn from_occurrence<Z: TimeZone>(
        occurrence: &Occurrence<Z>,
        kind: EntryKind,
    ) -> ServiceResult<Self> {
        let start = occurrence.start.naive_local();
        let id = occurrence
            .uid
            .clone()
            .ok_or_else(|| ServiceError::MissingUid {
                start: start.to_string(),
            })?;

        Ok(Self {
            id,
            date: start.format(DATE_FORMAT).to_string(),
            time: start.format(TIME_FORMAT).to_string(),
            expired_at: occurrence.end.timestamp(),
            summary: occurrence.summary.clone().unwrap_or_default(),
            kind,
        })
    }
}

/// Window for tasks: `today` from 00:10 to the last microsecond of the day.
#[must_use]
pub fn task_window(today: NaiveDate) -> Window {
    Window::new(today.and_time(TASK_WINDOW_START), today.and_time(END_OF_DAY))
}

/// Window for holidays: the whole of `today`.
#[must_use]
pub fn holiday_window(today: NaiveDate) -> Window {
    Window::new(today.and_time(NaiveTime::MIN), today.and_time(END_OF_DAY))
}

/// Converts occurrences into entries of `kind`.
///
/// Occurrences that cannot become an entry are logged and returned as errors
/// next to the entries that could.
#[must_use]
pub fn build_entries<Z: TimeZone>(
    occurrences: &[Occurrence<Z>],
    kind: EntryKind,
) -> (Vec<ScheduleEntry>, Vec<ServiceError>) {
    let mut entries = Vec::with_capacity(occurrences.len());
    let mut errors = Vec::new();

    for occurrence in occurrences {
        match ScheduleEntry::from_occurrence(occurrence, kind) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                tracing::warn!(%err, ?kind, "Skipping occurrence");
                errors.push(err);
            }
        }
    }

    (entries, errors)
}

/// Collapses entries sharing an id, later entries overwriting earlier ones.
///
/// Each id keeps the position of its first appearance.
#[must_use]
pub fn merge_entries(entries: impl IntoIterator<Item = ScheduleEntry>) -> Vec<ScheduleEntry> {
    let mut merged: Vec<ScheduleEntry> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        if let Some(&index) = positions.get(&entry.id) {
            tracing::debug!(id = %entry.id, "Overwriting entry");
            merged[index] = entry;
        } else {
            positions.insert(entry.id.clone(), merged.len());
            merged.push(entry);
        }
    }

    merged
}

/// Entries for one day plus everything that went wrong building them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailySchedule {
    pub entries: Vec<ScheduleEntry>,
    pub errors: Vec<ServiceError>,
}

/// ## Summary
/// Expands the task feed over [`task_window`] and the holiday feed over
/// [`holiday_window`] for `today`, in `zone`, and merges the resulting
/// entries. Tasks are written first, so a holiday sharing a task's UID wins.
#[must_use]
#[tracing::instrument(skip(tasks, holidays, zone))]
pub fn plan_day<Z: TimeZone>(
    tasks: &Calendar,
    holidays: Option<&Calendar>,
    today: NaiveDate,
    zone: &Z,
) -> DailySchedule {
    let mut schedule = DailySchedule::default();
    let mut collected = Vec::new();

    let task_expansion = tasks.between_in(&task_window(today), zone);
    schedule
        .errors
        .extend(task_expansion.errors.into_iter().map(ServiceError::from));
    let (entries, errors) = build_entries(&task_expansion.occurrences, EntryKind::Task);
    collected.extend(entries);
    schedule.errors.extend(errors);

    if let Some(holidays) = holidays {
        let holiday_expansion = holidays.between_in(&holiday_window(today), zone);
        schedule
            .errors
            .extend(holiday_expansion.errors.into_iter().map(ServiceError::from));
        let (entries, errors) = build_entries(&holiday_expansion.occurrences, EntryKind::Holiday);
        collected.extend(entries);
        schedule.errors.extend(errors);
    }

    schedule.entries = merge_entries(collected);
    tracing::info!(
        entries = schedule.entries.len(),
        errors = schedule.errors.len(),
        "Planned day"
    );

    schedule
}
