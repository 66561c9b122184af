//! Calendar helpers shared by the loader, the aggregation store and the charts.

use chrono::{Datelike, NaiveDate};

/// Date format of the `dteday` column and of CLI/session dates: "YYYY-MM-DD"
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Label format for month buckets, e.g. "Jan 2011"
pub const MONTH_YEAR_FORMAT: &str = "%b %Y";

/// Day names indexed by [`day_of_week`].
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Format a NaiveDate as "YYYY-MM-DD"
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a date string in "YYYY-MM-DD" format.
///
/// A trailing time component ("2011-01-01 00:00:00" or "2011-01-01T00:00:00")
/// is accepted and dropped.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let day = s.trim().split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}

/// Day of week with Monday = 0 through Sunday = 6.
pub fn day_of_week(date: &NaiveDate) -> u32 {
    date.weekday().num_days_from_monday()
}

/// "%b %Y" label for a (year, month) bucket, None for an invalid month.
pub fn month_year_label(year: i32, month: u32) -> Option<String> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|d| d.format(MONTH_YEAR_FORMAT).to_string())
}
