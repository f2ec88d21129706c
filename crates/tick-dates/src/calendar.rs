//! Calendar primitives shared by range formatting and relative parsing.
//!
//! Every date that leaves this crate goes through [`format_date`], so two equal
//! dates always produce the same `YYYY-MM-DD` string no matter what locale or
//! timezone the host runs in. Caller-supplied dates come in through
//! [`parse_date`] and are interpreted at UTC midnight.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DateError;

// ── Formatting and parsing ──────────────────────────────────────────────────

/// Format a date in the canonical `YYYY-MM-DD` form.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a caller-supplied date string.
///
/// Accepts a plain ISO 8601 date (`"2024-01-15"`) or a full RFC 3339 timestamp
/// (`"2024-01-15T10:30:00Z"`), which is reduced to its UTC calendar date.
///
/// # Errors
///
/// Returns [`DateError::InvalidDate`] if the string is neither.
pub fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
    let trimmed = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| DateError::InvalidDate(format!("'{s}' is not a YYYY-MM-DD date")))
}

// ── Week and month arithmetic ───────────────────────────────────────────────

/// Weekday index with Sunday = 0 through Saturday = 6.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Shift a date by a signed number of days.
///
/// # Errors
///
/// Returns [`DateError::OutOfRange`] if the result falls outside the
/// calendar chrono can represent.
pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate, DateError> {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| {
            DateError::OutOfRange(format!("{} shifted by {days} days", format_date(date)))
        })
}

/// The Monday of the Monday-first week containing `date`.
///
/// A Sunday belongs to the week that ends on it, so its Monday is six days
/// earlier. Any other day moves back `weekday_index - 1` days.
pub fn monday_of(date: NaiveDate) -> Result<NaiveDate, DateError> {
    let offset = match weekday_index(date) {
        0 => -6,
        wd => 1 - wd as i64,
    };
    add_days(date, offset)
}

/// First calendar day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> Result<NaiveDate, DateError> {
    add_days(date, -(date.day0() as i64))
}

/// Last calendar day of the month containing `date`: the day before the first
/// of the following month.
pub fn last_of_month(date: NaiveDate) -> Result<NaiveDate, DateError> {
    // 31 days past the 1st always lands in the next month.
    let next_month = first_of_month(add_days(first_of_month(date)?, 31)?)?;
    add_days(next_month, -1)
}

/// First calendar day of the month before the one containing `date`.
pub fn first_of_previous_month(date: NaiveDate) -> Result<NaiveDate, DateError> {
    first_of_month(add_days(first_of_month(date)?, -1)?)
}

// ── WeekdayName ─────────────────────────────────────────────────────────────

/// A day name as accepted by the `days_of_week` argument.
///
/// Parsing is case-insensitive; serialization is lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum WeekdayName {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekdayName {
    pub const ALL: [WeekdayName; 7] = [
        WeekdayName::Monday,
        WeekdayName::Tuesday,
        WeekdayName::Wednesday,
        WeekdayName::Thursday,
        WeekdayName::Friday,
        WeekdayName::Saturday,
        WeekdayName::Sunday,
    ];

    /// Position in a Monday-first week (Monday = 0 … Sunday = 6).
    pub fn offset_from_monday(self) -> i64 {
        match self {
            WeekdayName::Monday => 0,
            WeekdayName::Tuesday => 1,
            WeekdayName::Wednesday => 2,
            WeekdayName::Thursday => 3,
            WeekdayName::Friday => 4,
            WeekdayName::Saturday => 5,
            WeekdayName::Sunday => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeekdayName::Monday => "monday",
            WeekdayName::Tuesday => "tuesday",
            WeekdayName::Wednesday => "wednesday",
            WeekdayName::Thursday => "thursday",
            WeekdayName::Friday => "friday",
            WeekdayName::Saturday => "saturday",
            WeekdayName::Sunday => "sunday",
        }
    }
}

impl fmt::Display for WeekdayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeekdayName {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        WeekdayName::ALL
            .into_iter()
            .find(|day| day.as_str() == lowered)
            .ok_or_else(|| DateError::InvalidWeekday(format!("'{s}'")))
    }
}

impl TryFrom<String> for WeekdayName {
    type Error = DateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
