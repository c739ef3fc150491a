//! Expansion errors.

use chrono::NaiveDateTime;

/// Result type for expansion of a single event.
pub type ExpandResult<T> = Result<T, ExpandError>;

const NO_UID: &str = "<no uid>";

/// Why one event contributed nothing (or less than expected) to an expansion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpandError {
    /// The event has no `DTSTART`.
    #[error("event {} has no DTSTART", .uid.as_deref().unwrap_or(NO_UID))]
    MissingDtstart { uid: Option<String> },

    /// A recurring event has no `DTEND`, so its duration is unknown.
    #[error("recurring event {} has no DTEND", .uid.as_deref().unwrap_or(NO_UID))]
    MissingDtend { uid: Option<String> },

    /// The recurrence library rejected the rule text.
    #[error("event {} has an invalid RRULE `{rule}`: {message}", .uid.as_deref().unwrap_or(NO_UID))]
    InvalidRule {
        uid: Option<String>,
        rule: String,
        message: String,
    },

    /// A wall-clock time does not exist in the output zone.
    #[error(
        "event {} starts at {value}, which does not exist in the output zone",
        .uid.as_deref().unwrap_or(NO_UID)
    )]
    NonexistentLocalTime {
        uid: Option<String>,
        value: NaiveDateTime,
    },

    /// Adding the event's duration leaves the representable range.
    #[error("event {} ends outside the representable range", .uid.as_deref().unwrap_or(NO_UID))]
    OutOfRange { uid: Option<String> },
}

impl ExpandError {
    /// UID of the event the error belongs to, when it has one.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        match self {
            Self::MissingDtstart { uid }
            | Self::MissingDtend { uid }
            | Self::InvalidRule { uid, .. }
            | Self::NonexistentLocalTime { uid, .. }
            | Self::OutOfRange { uid } => uid.as_deref(),
        }
    }
}
