//! Date filter values: `DD.MM.YYYY` in, ISO-8601 UTC timestamp out.

use chrono::{NaiveDate, NaiveTime};

/// Timestamp layout the query service expects, e.g. `2023-01-01T00:00:00.000Z`.
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Smaller years are abbreviations and are not expanded.
const MIN_YEAR: i64 = 100;

/// Parse a `DD.MM.YYYY` form value into a calendar date.
///
/// Each part is parsed as an integer, so `1.2.2023` is accepted. Dates that
/// do not exist on the calendar (`31.13.2021`, `29.02.2023`) are rejected
/// rather than rolled over. Years below 100 are rejected too, so
/// `01.01.23` is neither read as year 23 nor guessed as 1923.
pub fn parse_form_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.trim().split('.').map(|p| p.trim().parse::<i64>().ok());

    let day = parts.next()??;
    let month = parts.next()??;
    let year = parts.next()??;
    if parts.next().is_some() || year < MIN_YEAR {
        return None;
    }

    NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )
}

/// Midnight UTC of `date`, serialized with millisecond precision.
pub fn to_iso_timestamp(date: NaiveDate) -> String {
    date.and_time(NaiveTime::default()).format(ISO_FORMAT).to_string()
}

/// `DD.MM.YYYY` -> `YYYY-MM-DDT00:00:00.000Z`, or `None` if not a real date.
pub fn form_date_to_iso(value: &str) -> Option<String> {
    parse_form_date(value).map(to_iso_timestamp)
}
