//! The current instant decomposed into calendar fields.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde::Serialize;

use crate::calendar::{format_date, weekday_index};

/// Calendar breakdown of a single instant, in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentDate {
    /// `YYYY-MM-DD`.
    pub current_date: String,
    /// RFC 3339 with millisecond precision and a `Z` suffix.
    pub current_datetime: String,
    /// English weekday name, e.g. `"Monday"`.
    pub weekday: String,
    /// 0 = Sunday … 6 = Saturday.
    pub weekday_number: u32,
    pub day: u32,
    /// 1-12.
    pub month: u32,
    pub month_name: String,
    pub year: i32,
    /// Long form, e.g. `"Monday, January 15, 2024"`.
    pub formatted_date: String,
}

/// Describe `now` as a [`CurrentDate`].
///
/// Every field is derived from the single instant passed in, so the date and
/// weekday can never disagree across a midnight tick.
pub fn current_date(now: DateTime<Utc>) -> CurrentDate {
    let date = now.date_naive();
    CurrentDate {
        current_date: format_date(date),
        current_datetime: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        weekday: date.format("%A").to_string(),
        weekday_number: weekday_index(date),
        day: date.day(),
        month: date.month(),
        month_name: date.format("%B").to_string(),
        year: date.year(),
        formatted_date: date.format("%A, %B %-d, %Y").to_string(),
    }
}
