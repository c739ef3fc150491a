//! Value parsers for the interpreted properties (RFC 5545 §3.3).

use chrono::{NaiveDate, NaiveTime};

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::unfold;
use crate::rfc::ical::core::{DateTimeForm, Timestamp};

/// Returns whether `raw` is shaped like a DATE (`YYYYMMDD`) or DATE-TIME
/// (`YYYYMMDDTHHMMSS[Z]`) value.
///
/// Only the shape is checked; calendar validity is left to [`parse_timestamp`].
#[must_use]
pub fn has_timestamp_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);

    match bytes.len() {
        8 => digits(0..8),
        15 => digits(0..8) && bytes[8] == b'T' && digits(9..15),
        16 => digits(0..8) && bytes[8] == b'T' && digits(9..15) && bytes[15] == b'Z',
        _ => false,
    }
}

/// Parses a DATE value (RFC 5545 §3.3.4).
///
/// Format: YYYYMMDD (e.g., "19970714")
///
/// ## Errors
/// Returns an error if the string is not a valid 8-digit calendar date.
pub fn parse_date(s: &str, line: usize, col: usize) -> ParseResult<NaiveDate> {
    let invalid = || ParseError::new(ParseErrorKind::InvalidDate, line, col).with_context(s);

    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    i32::try_from(digits_value(&s[0..4]))
        .ok()
        .and_then(|year| {
            NaiveDate::from_ymd_opt(year, digits_value(&s[4..6]), digits_value(&s[6..8]))
        })
        .ok_or_else(invalid)
}

/// Parses a TIME value (RFC 5545 §3.3.12).
///
/// Format: HHMMSS[Z] (e.g., "133000", "133000Z"). Returns the time and whether
/// the UTC designator was present.
///
/// ## Errors
/// Returns an error if the string is not a valid 6-digit time.
pub fn parse_time(s: &str, line: usize, col: usize) -> ParseResult<(NaiveTime, bool)> {
    let invalid = || ParseError::new(ParseErrorKind::InvalidTime, line, col).with_context(s);

    let (digits, is_utc) = match s.strip_suffix('Z') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let time = NaiveTime::from_hms_opt(
        digits_value(&digits[0..2]),
        digits_value(&digits[2..4]),
        digits_value(&digits[4..6]),
    )
    .ok_or_else(invalid)?;
    Ok((time, is_utc))
}

/// Parses a DATE-TIME value (RFC 5545 §3.3.5).
///
/// Format: YYYYMMDD"T"HHMMSS[Z] (e.g., "19970714T133000Z")
///
/// A `Z` suffix wins over `tzid`; without either the value is floating.
///
/// ## Errors
/// Returns an error if the string is not a valid date-time.
pub fn parse_datetime(
    s: &str,
    tzid: Option<&str>,
    line: usize,
    col: usize,
) -> ParseResult<Timestamp> {
    let Some((date_str, time_str)) = s.split_once('T') else {
        return Err(
            ParseError::new(ParseErrorKind::InvalidDateTime, line, col).with_context(s)
        );
    };

    let date = parse_date(date_str, line, col)?;
    let (time, is_utc) = parse_time(time_str, line, col + date_str.len() + 1)?;
    let value = date.and_time(time);

    Ok(if is_utc {
        Timestamp::utc(value)
    } else if let Some(tz) = tzid {
        Timestamp::zoned(value, tz)
    } else {
        Timestamp::floating(value)
    })
}

/// Parses either a DATE or a DATE-TIME value, picking by length.
///
/// ## Errors
/// Returns an error if the value is not a valid date or date-time.
pub fn parse_timestamp(
    raw: &str,
    tzid: Option<&str>,
    line: usize,
    col: usize,
) -> ParseResult<Timestamp> {
    if raw.len() != 8 {
        return parse_datetime(raw, tzid, line, col);
    }

    let mut timestamp = Timestamp::date(parse_date(raw, line, col)?);
    if let Some(tz) = tzid {
        timestamp.form = DateTimeForm::Zoned {
            tzid: tz.to_string(),
        };
    }
    Ok(timestamp)
}

/// Value of a run of ASCII digits already checked by the caller.
fn digits_value(digits: &str) -> u32 {
    digits
        .bytes()
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

/// Unescapes a TEXT value (RFC 5545 §3.3.11).
///
/// Soft line continuations are collapsed first, then `\N`/`\n` become a line
/// feed and `\,` `\;` `\\` their literal character in a single pass. Unknown
/// escapes are preserved as written.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let unfolded = unfold(s);
    let mut result = String::with_capacity(unfolded.len());
    let mut chars = unfolded.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }

        match chars.next() {
            Some('n' | 'N') => result.push('\n'),
            Some(',') => result.push(','),
            Some(';') => result.push(';'),
            Some('\\') | None => result.push('\\'),
            Some(other) => {
                // Invalid escape, preserve as-is
                result.push('\\');
                result.push(other);
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escape(text: &str) -> String {
        text.replace('\\', "\\\\")
            .replace(',', "\\,")
            .replace(';', "\\;")
            .replace('\n', "\\n")
    }

    #[test]
    fn shape_detection() {
        assert!(has_timestamp_shape("20240501"));
        assert!(has_timestamp_shape("20240501T090000"));
        assert!(has_timestamp_shape("20240501T090000Z"));
        assert!(!has_timestamp_shape("2024-05-01"));
        assert!(!has_timestamp_shape("20240501T0900"));
        assert!(!has_timestamp_shape("20240501T090000+0900"));
        assert!(!has_timestamp_shape("P1D"));
        assert!(!has_timestamp_shape(""));
    }

    #[test]
    fn parse_date_valid() {
        let date = parse_date("19970714", 1, 1).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1997, 7, 14).unwrap());
    }

    #[test]
    fn parse_date_rejects_impossible_day() {
        let err = parse_date("20230229", 3, 9).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidDate);
        assert_eq!(err.line, 3);
        assert_eq!(err.context.as_deref(), Some("20230229"));
    }

    #[test]
    fn parse_time_utc_flag() {
        let (time, utc) = parse_time("133000Z", 1, 1).unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(13, 30, 0).unwrap());
        assert!(utc);

        let (_, utc) = parse_time("133000", 1, 1).unwrap();
        assert!(!utc);
    }

    #[test]
    fn parse_time_rejects_out_of_range() {
        assert_eq!(
            parse_time("250000", 1, 1).unwrap_err().kind,
            ParseErrorKind::InvalidTime
        );
    }

    #[test]
    fn parse_datetime_forms() {
        let utc = parse_datetime("20240501T090000Z", Some("Asia/Tokyo"), 1, 1).unwrap();
        assert!(utc.is_utc());

        let zoned = parse_datetime("20240501T090000", Some("Asia/Tokyo"), 1, 1).unwrap();
        assert_eq!(zoned.tzid(), Some("Asia/Tokyo"));

        let floating = parse_datetime("20240501T090000", None, 1, 1).unwrap();
        assert!(!floating.is_zone_aware());
        assert!(!floating.all_day);
    }

    #[test]
    fn parse_timestamp_date_only() {
        let ts = parse_timestamp("20240501", None, 1, 1).unwrap();
        assert!(ts.all_day);
        assert_eq!(ts.to_string(), "20240501");

        let ts = parse_timestamp("20240501", Some("Asia/Tokyo"), 1, 1).unwrap();
        assert!(ts.all_day);
        assert!(ts.is_zone_aware());
    }

    #[test]
    fn unescape_sequences() {
        assert_eq!(unescape_text(r"a\nb\Nc"), "a\nb\nc");
        assert_eq!(unescape_text(r"Meeting\, important\; really"), "Meeting, important; really");
        assert_eq!(unescape_text(r"C:\\temp"), r"C:\temp");
    }

    #[test]
    fn unescape_escaped_backslash_before_n() {
        // `\\n` is an escaped backslash followed by a plain `n`
        assert_eq!(unescape_text(r"\\n"), r"\n");
    }

    #[test]
    fn unescape_preserves_unknown_escapes() {
        assert_eq!(unescape_text(r"\x"), r"\x");
        assert_eq!(unescape_text("trailing\\"), "trailing\\");
    }

    #[test]
    fn unescape_collapses_continuations() {
        assert_eq!(unescape_text("Long\r\n  text"), "Long text");
        assert_eq!(unescape_text("split \\\r\n , escape"), "split , escape");
    }

    #[test]
    fn unescape_round_trips_escaped_text() {
        let originals = [
            "plain",
            "comma, semicolon; backslash \\ newline\nend",
            "\\n is not a newline here",
            "C:\\path\\to\\file;v=1,2",
            "",
        ];
        for original in originals {
            assert_eq!(unescape_text(&escape(original)), original, "{original:?}");
        }
    }
}
