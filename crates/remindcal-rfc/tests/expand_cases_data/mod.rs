use chrono::{NaiveDateTime, Utc};
use remindcal_rfc::rfc::ical::{Calendar, Window};

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub struct FeedCase {
    pub name: &'static str,
    pub feed: &'static str,
    pub after: &'static str,
    pub before: &'static str,
    pub inclusive: bool,
    /// `(start, end)` pairs in UTC, in expected order.
    pub expected: &'static [(&'static str, &'static str)],
    pub expected_errors: usize,
}

const SINGLE: &str = "\
BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
UID:single\r\n\
DTSTART:20240501T090000\r\n\
DTEND:20240501T093000\r\n\
SUMMARY:Standup\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

const WEEKLY: &str = "\
BEGIN:VEVENT\r\n\
UID:weekly\r\n\
DTSTART:20240101T100000\r\n\
DTEND:20240101T110000\r\n\
RRULE:FREQ=WEEKLY\r\n\
SUMMARY:Weekly sync\r\n\
END:VEVENT\r\n";

const WEEKLY_EXDATE: &str = "\
BEGIN:VEVENT\r\n\
UID:weekly\r\n\
DTSTART:20240101T100000\r\n\
DTEND:20240101T110000\r\n\
RRULE:FREQ=WEEKLY\r\n\
EXDATE:20240108T100000\r\n\
SUMMARY:Weekly sync\r\n\
END:VEVENT\r\n";

const OUT_OF_ORDER: &str = "\
BEGIN:VEVENT\r\n\
UID:third\r\n\
DTSTART:20240501T150000\r\n\
DTEND:20240501T160000\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:daily\r\n\
DTSTART:20240430T120000\r\n\
DTEND:20240430T121500\r\n\
RRULE:FREQ=DAILY;COUNT=3\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:first\r\n\
DTSTART:20240501T080000\r\n\
DTEND:20240501T083000\r\n\
END:VEVENT\r\n";

const BAD_RULE: &str = "\
BEGIN:VEVENT\r\n\
UID:broken\r\n\
DTSTART:20240501T090000\r\n\
DTEND:20240501T100000\r\n\
RRULE:FREQ=SOMETIMES\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:fine\r\n\
DTSTART:20240501T110000\r\n\
DTEND:20240501T120000\r\n\
END:VEVENT\r\n";

const MISSING_DTEND: &str = "\
BEGIN:VEVENT\r\n\
UID:no-end\r\n\
DTSTART:20240501T090000\r\n\
RRULE:FREQ=DAILY\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:fine\r\n\
DTSTART:20240501T110000\r\n\
END:VEVENT\r\n";

const ZONED_AND_ALL_DAY: &str = "\
BEGIN:VEVENT\r\n\
UID:tokyo\r\n\
DTSTART;TZID=Asia/Tokyo:20240501T090000\r\n\
DTEND;TZID=Asia/Tokyo:20240501T100000\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:holiday\r\n\
DTSTART;VALUE=DATE:20240501\r\n\
DTEND;VALUE=DATE:20240502\r\n\
END:VEVENT\r\n";

const DAILY_UNTIL_DATE: &str = "\
BEGIN:VEVENT\r\n\
UID:until\r\n\
DTSTART:20240101T100000\r\n\
DTEND:20240101T103000\r\n\
RRULE:FREQ=DAILY;UNTIL=20240103\r\n\
END:VEVENT\r\n";

#[expect(clippy::too_many_lines)]
pub fn feed_cases() -> Vec<FeedCase> {
    vec![
        FeedCase {
            name: "single_in_window",
            feed: SINGLE,
            after: "2024-05-01T00:00:00",
            before: "2024-05-01T23:59:59",
            inclusive: true,
            expected: &[("2024-05-01T09:00:00", "2024-05-01T09:30:00")],
            expected_errors: 0,
        },
        FeedCase {
            name: "single_window_before",
            feed: SINGLE,
            after: "2024-04-30T00:00:00",
            before: "2024-04-30T23:59:59",
            inclusive: true,
            expected: &[],
            expected_errors: 0,
        },
        FeedCase {
            name: "single_window_after",
            feed: SINGLE,
            after: "2024-05-02T00:00:00",
            before: "2024-05-02T23:59:59",
            inclusive: true,
            expected: &[],
            expected_errors: 0,
        },
        FeedCase {
            name: "start_on_after_bound",
            feed: SINGLE,
            after: "2024-05-01T09:00:00",
            before: "2024-05-01T12:00:00",
            inclusive: true,
            expected: &[("2024-05-01T09:00:00", "2024-05-01T09:30:00")],
            expected_errors: 0,
        },
        FeedCase {
            name: "start_on_before_bound",
            feed: SINGLE,
            after: "2024-05-01T06:00:00",
            before: "2024-05-01T09:00:00",
            inclusive: true,
            expected: &[("2024-05-01T09:00:00", "2024-05-01T09:30:00")],
            expected_errors: 0,
        },
        FeedCase {
            name: "start_on_bound_exclusive",
            feed: SINGLE,
            after: "2024-05-01T09:00:00",
            before: "2024-05-01T12:00:00",
            inclusive: false,
            expected: &[],
            expected_errors: 0,
        },
        FeedCase {
            name: "weekly_three_weeks",
            feed: WEEKLY,
            after: "2024-01-01T00:00:00",
            before: "2024-01-21T23:59:59",
            inclusive: true,
            expected: &[
                ("2024-01-01T10:00:00", "2024-01-01T11:00:00"),
                ("2024-01-08T10:00:00", "2024-01-08T11:00:00"),
                ("2024-01-15T10:00:00", "2024-01-15T11:00:00"),
            ],
            expected_errors: 0,
        },
        FeedCase {
            name: "weekly_with_exdate",
            feed: WEEKLY_EXDATE,
            after: "2024-01-01T00:00:00",
            before: "2024-01-21T23:59:59",
            inclusive: true,
            expected: &[
                ("2024-01-01T10:00:00", "2024-01-01T11:00:00"),
                ("2024-01-15T10:00:00", "2024-01-15T11:00:00"),
            ],
            expected_errors: 0,
        },
        FeedCase {
            name: "weekly_instant_on_bounds",
            feed: WEEKLY,
            after: "2024-01-08T10:00:00",
            before: "2024-01-15T10:00:00",
            inclusive: true,
            expected: &[
                ("2024-01-08T10:00:00", "2024-01-08T11:00:00"),
                ("2024-01-15T10:00:00", "2024-01-15T11:00:00"),
            ],
            expected_errors: 0,
        },
        FeedCase {
            name: "out_of_order_events_sorted",
            feed: OUT_OF_ORDER,
            after: "2024-05-01T00:00:00",
            before: "2024-05-01T23:59:59",
            inclusive: true,
            expected: &[
                ("2024-05-01T08:00:00", "2024-05-01T08:30:00"),
                ("2024-05-01T12:00:00", "2024-05-01T12:15:00"),
                ("2024-05-01T15:00:00", "2024-05-01T16:00:00"),
            ],
            expected_errors: 0,
        },
        FeedCase {
            name: "bad_rule_isolated",
            feed: BAD_RULE,
            after: "2024-05-01T00:00:00",
            before: "2024-05-01T23:59:59",
            inclusive: true,
            expected: &[("2024-05-01T11:00:00", "2024-05-01T12:00:00")],
            expected_errors: 1,
        },
        FeedCase {
            name: "recurring_missing_dtend_isolated",
            feed: MISSING_DTEND,
            after: "2024-05-01T00:00:00",
            before: "2024-05-01T23:59:59",
            inclusive: true,
            expected: &[("2024-05-01T11:00:00", "2024-05-01T11:00:00")],
            expected_errors: 1,
        },
        FeedCase {
            name: "tzid_and_all_day_as_wall_clock",
            feed: ZONED_AND_ALL_DAY,
            after: "2024-05-01T00:00:00",
            before: "2024-05-01T23:59:59",
            inclusive: true,
            expected: &[
                ("2024-05-01T00:00:00", "2024-05-02T00:00:00"),
                ("2024-05-01T09:00:00", "2024-05-01T10:00:00"),
            ],
            expected_errors: 0,
        },
        FeedCase {
            name: "date_only_until",
            feed: DAILY_UNTIL_DATE,
            after: "2024-01-01T00:00:00",
            before: "2024-01-31T00:00:00",
            inclusive: true,
            expected: &[
                ("2024-01-01T10:00:00", "2024-01-01T10:30:00"),
                ("2024-01-02T10:00:00", "2024-01-02T10:30:00"),
            ],
            expected_errors: 0,
        },
    ]
}

pub fn assert_case(case: &FeedCase) {
    let calendar = Calendar::parse(case.feed);
    let mut window = Window::new(parse_naive(case.after), parse_naive(case.before));
    if !case.inclusive {
        window = window.exclusive();
    }

    let expansion = calendar.between_in(&window, &Utc);
    let actual: Vec<(String, String)> = expansion
        .occurrences
        .iter()
        .map(|o| {
            (
                o.start.naive_utc().format(FORMAT).to_string(),
                o.end.naive_utc().format(FORMAT).to_string(),
            )
        })
        .collect();
    let expected: Vec<(String, String)> = case
        .expected
        .iter()
        .map(|(start, end)| ((*start).to_string(), (*end).to_string()))
        .collect();

    assert_eq!(actual, expected, "Case {} did not match", case.name);
    assert_eq!(
        expansion.errors.len(),
        case.expected_errors,
        "Case {} expected {} errors, got {:?}",
        case.name,
        case.expected_errors,
        expansion.errors
    );
}

fn parse_naive(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, FORMAT)
        .unwrap_or_else(|err| panic!("Failed to parse test value {value}: {err}"))
}
