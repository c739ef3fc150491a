//! Timestamp values for `DTSTART`, `DTEND` and `EXDATE` (RFC 5545 §3.3.4-3.3.5).

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Zone awareness of a timestamp.
///
/// DATE-TIME values come in three mutually exclusive forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateTimeForm {
    /// Floating time - same wall-clock time in any timezone.
    ///
    /// Example: `19980118T230000`
    Floating,

    /// UTC time - absolute instant, indicated by 'Z' suffix.
    ///
    /// Example: `19980119T070000Z`
    Utc,

    /// Zoned time - local time with TZID reference.
    ///
    /// Example: `TZID=America/New_York:19980119T020000`
    Zoned {
        /// The timezone identifier as written in the feed.
        tzid: String,
    },
}

/// A parsed date or date-time value.
///
/// Date-only values (`VALUE=DATE` or a bare `YYYYMMDD`) are stored as midnight
/// with `all_day` set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Timestamp {
    /// Wall-clock value as written, zone information stripped.
    pub value: NaiveDateTime,
    /// The form of this value (floating, UTC, or zoned).
    pub form: DateTimeForm,
    /// Whether the source value was a pure date.
    pub all_day: bool,
}

impl Timestamp {
    /// Creates a floating timestamp.
    #[must_use]
    pub fn floating(value: NaiveDateTime) -> Self {
        Self {
            value,
            form: DateTimeForm::Floating,
            all_day: false,
        }
    }

    /// Creates a UTC timestamp.
    #[must_use]
    pub fn utc(value: NaiveDateTime) -> Self {
        Self {
            value,
            form: DateTimeForm::Utc,
            all_day: false,
        }
    }

    /// Creates a zoned timestamp.
    #[must_use]
    pub fn zoned(value: NaiveDateTime, tzid: impl Into<String>) -> Self {
        Self {
            value,
            form: DateTimeForm::Zoned { tzid: tzid.into() },
            all_day: false,
        }
    }

    /// Creates an all-day timestamp at midnight of `date`.
    #[must_use]
    pub fn date(date: NaiveDate) -> Self {
        Self {
            value: date.and_time(chrono::NaiveTime::MIN),
            form: DateTimeForm::Floating,
            all_day: true,
        }
    }

    /// Returns whether a `TZID` parameter or a `Z` suffix was present.
    #[must_use]
    pub fn is_zone_aware(&self) -> bool {
        !matches!(self.form, DateTimeForm::Floating)
    }

    /// Returns whether this is a UTC time.
    #[must_use]
    pub fn is_utc(&self) -> bool {
        matches!(self.form, DateTimeForm::Utc)
    }

    /// Returns the timezone ID if this is a zoned time.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        match &self.form {
            DateTimeForm::Zoned { tzid } => Some(tzid),
            _ => None,
        }
    }

    /// Normalizes this timestamp into `zone`.
    ///
    /// UTC values convert as absolute instants. Floating and zoned values are
    /// read as wall-clock time in `zone`; no timezone database is consulted for
    /// a `TZID`. Returns `None` when the wall-clock time does not exist in
    /// `zone` (a DST gap). Ambiguous times resolve to the earlier instant.
    #[must_use]
    pub fn to_zone<Z: TimeZone>(&self, zone: &Z) -> Option<DateTime<Z>> {
        match self.form {
            DateTimeForm::Utc => Some(Utc.from_utc_datetime(&self.value).with_timezone(zone)),
            DateTimeForm::Floating | DateTimeForm::Zoned { .. } => {
                zone.from_local_datetime(&self.value).earliest()
            }
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.all_day {
            return write!(f, "{}", self.value.format("%Y%m%d"));
        }
        write!(f, "{}", self.value.format("%Y%m%dT%H%M%S"))?;
        if self.is_utc() {
            write!(f, "Z")?;
        }
        Ok(())
    }
}
