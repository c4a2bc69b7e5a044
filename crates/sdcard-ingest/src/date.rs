//! Transcript header timestamps.
//!
//! The calling program prints `ctime`-style dates such as
//! `Sat May  6 02:22:24 2023`: day of week, month abbreviation, day of month
//! (padded with a second space when it has one digit), time and year.

use chrono::{NaiveDate, NaiveDateTime};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Month number (1-12) for an abbreviation. Unknown tokens are January.
pub fn month_number(token: &str) -> u32 {
    MONTHS
        .iter()
        .position(|month| *month == token)
        .map_or(1, |index| index as u32 + 1)
}

/// Parses a header date.
///
/// Returns `None` when the numeric parts are missing or out of range; an
/// unknown month does not fail and yields January instead.
pub fn parse_transcript_date(text: &str) -> Option<NaiveDateTime> {
    let mut parts = text.split_whitespace();
    let _day_of_week = parts.next()?;
    let month = month_number(parts.next()?);
    let day: u32 = parts.next()?.parse().ok()?;
    let hms = parts.next()?;
    let year: i32 = parts.next()?.parse().ok()?;

    let mut clock = hms.split(':').map(str::parse::<u32>);
    let hour = clock.next()?.ok()?;
    let minute = clock.next()?.ok()?;
    let second = clock.next()?.ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}
