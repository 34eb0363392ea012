//! `datetime-local` style values.

use chrono::NaiveDateTime;

pub const DATETIME_FORMAT_HINT: &str = "YYYY-MM-DDTHH:MM";

const FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parse a local date-time as produced by a `datetime-local` input.
pub fn parse_datetime_local(value: &str) -> Option<NaiveDateTime> {
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Human-readable rendering, e.g. `1/1/2024, 10:00:00 AM`.
///
/// Falls back to the raw value when it does not parse.
pub fn describe_datetime(value: &str) -> String {
    match parse_datetime_local(value) {
        Some(dt) => dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        None => value.to_string(),
    }
}
