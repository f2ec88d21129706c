//! Symbolic date-range formatting.
//!
//! Turns a [`RangeType`] such as `"this_week"` or `"last_month"` into concrete
//! `YYYY-MM-DD` start and end dates, plus an explicit date list for the
//! non-contiguous ranges (weekday lists, selected days of a custom week).
//!
//! Weeks are Monday-first. See [`crate::calendar::monday_of`] for how a Sunday
//! is assigned to the week that ends on it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{
    add_days, first_of_month, first_of_previous_month, format_date, last_of_month, monday_of,
    parse_date, WeekdayName,
};
use crate::error::DateError;

/// Number of working days (Monday through Friday) emitted by the `weekdays_*` ranges.
const WORKING_DAYS: i64 = 5;

// ── RangeType ───────────────────────────────────────────────────────────────

/// The closed set of symbolic ranges understood by [`format_date_range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeType {
    Today,
    Yesterday,
    Tomorrow,
    ThisWeek,
    LastWeek,
    NextWeek,
    WeekdaysThisWeek,
    WeekdaysLastWeek,
    WeekdaysNextWeek,
    ThisMonth,
    LastMonth,
    CustomRange,
    CustomWeek,
}

impl RangeType {
    pub const ALL: [RangeType; 13] = [
        RangeType::ThisWeek,
        RangeType::LastWeek,
        RangeType::NextWeek,
        RangeType::ThisMonth,
        RangeType::LastMonth,
        RangeType::Today,
        RangeType::Yesterday,
        RangeType::Tomorrow,
        RangeType::WeekdaysThisWeek,
        RangeType::WeekdaysLastWeek,
        RangeType::WeekdaysNextWeek,
        RangeType::CustomWeek,
        RangeType::CustomRange,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RangeType::Today => "today",
            RangeType::Yesterday => "yesterday",
            RangeType::Tomorrow => "tomorrow",
            RangeType::ThisWeek => "this_week",
            RangeType::LastWeek => "last_week",
            RangeType::NextWeek => "next_week",
            RangeType::WeekdaysThisWeek => "weekdays_this_week",
            RangeType::WeekdaysLastWeek => "weekdays_last_week",
            RangeType::WeekdaysNextWeek => "weekdays_next_week",
            RangeType::ThisMonth => "this_month",
            RangeType::LastMonth => "last_month",
            RangeType::CustomRange => "custom_range",
            RangeType::CustomWeek => "custom_week",
        }
    }
}

impl fmt::Display for RangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangeType {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RangeType::ALL
            .into_iter()
            .find(|rt| rt.as_str() == s)
            .ok_or_else(|| DateError::UnsupportedRangeType(s.to_string()))
    }
}

// ── Request / result ────────────────────────────────────────────────────────

/// Arguments of a range request.
///
/// `range_type` stays a plain string so that an unknown value surfaces as
/// [`DateError::UnsupportedRangeType`] rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRangeRequest {
    pub range_type: String,
    /// Start of a `custom_range`, returned verbatim.
    #[serde(default)]
    pub start_date: Option<String>,
    /// End of a `custom_range`, returned verbatim.
    #[serde(default)]
    pub end_date: Option<String>,
    /// First day of a `custom_week`.
    #[serde(default)]
    pub week_start_date: Option<String>,
    /// Days to pick out of a `custom_week`.
    #[serde(default)]
    pub days_of_week: Option<Vec<WeekdayName>>,
}

impl DateRangeRequest {
    pub fn new(range_type: impl Into<String>) -> Self {
        Self {
            range_type: range_type.into(),
            ..Default::default()
        }
    }
}

/// A resolved range. `dates` is only present when the range is an explicit list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates: Option<Vec<String>>,
}

impl DateRange {
    pub(crate) fn span(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: format_date(start),
            end_date: format_date(end),
            dates: None,
        }
    }

    fn single(date: NaiveDate) -> Self {
        Self::span(date, date)
    }

    /// Build a range from an ordered, non-empty list of dates.
    fn listed(first: NaiveDate, last: NaiveDate, dates: &[NaiveDate]) -> Self {
        Self {
            dates: Some(dates.iter().copied().map(format_date).collect()),
            ..Self::span(first, last)
        }
    }
}

// ── format_date_range ───────────────────────────────────────────────────────

/// Resolve a symbolic range relative to `anchor`.
///
/// `anchor` is the caller's "now"; only its UTC calendar date is used. The
/// caller reads the clock once and passes the same instant for every field of
/// a response.
///
/// # Errors
///
/// - [`DateError::UnsupportedRangeType`] for a `range_type` outside [`RangeType`].
/// - [`DateError::MissingRequiredField`] when `custom_range` lacks a start or
///   end date, or `custom_week` lacks `week_start_date`.
/// - [`DateError::InvalidDate`] when a supplied date cannot be parsed.
/// - [`DateError::InvalidRange`] when a `custom_range` ends before it starts.
/// - [`DateError::OutOfRange`] when the range would leave the representable
///   calendar.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tick_dates::range::{format_date_range, DateRangeRequest};
///
/// // Monday, January 15 2024
/// let now = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
/// let range = format_date_range(now, &DateRangeRequest::new("this_week")).unwrap();
/// assert_eq!(range.start_date, "2024-01-15");
/// assert_eq!(range.end_date, "2024-01-21");
/// ```
pub fn format_date_range(
    anchor: DateTime<Utc>,
    request: &DateRangeRequest,
) -> Result<DateRange, DateError> {
    let range_type: RangeType = request.range_type.parse()?;
    let today = anchor.date_naive();

    match range_type {
        RangeType::Today => Ok(DateRange::single(today)),
        RangeType::Yesterday => Ok(DateRange::single(add_days(today, -1)?)),
        RangeType::Tomorrow => Ok(DateRange::single(add_days(today, 1)?)),
        RangeType::ThisWeek => week_range(today, 0),
        RangeType::LastWeek => week_range(today, -1),
        RangeType::NextWeek => week_range(today, 1),
        RangeType::WeekdaysThisWeek => working_days(today, 0),
        RangeType::WeekdaysLastWeek => working_days(today, -1),
        RangeType::WeekdaysNextWeek => working_days(today, 1),
        RangeType::ThisMonth => Ok(DateRange::span(
            first_of_month(today)?,
            last_of_month(today)?,
        )),
        RangeType::LastMonth => {
            let first = first_of_previous_month(today)?;
            Ok(DateRange::span(first, last_of_month(first)?))
        }
        RangeType::CustomRange => custom_range(request),
        RangeType::CustomWeek => custom_week(request),
    }
}

/// Monday of the week containing `today`, shifted by whole weeks.
fn shifted_monday(today: NaiveDate, week_shift: i64) -> Result<NaiveDate, DateError> {
    add_days(monday_of(today)?, week_shift * 7)
}

fn week_range(today: NaiveDate, week_shift: i64) -> Result<DateRange, DateError> {
    let monday = shifted_monday(today, week_shift)?;
    Ok(DateRange::span(monday, add_days(monday, 6)?))
}

fn working_days(today: NaiveDate, week_shift: i64) -> Result<DateRange, DateError> {
    let monday = shifted_monday(today, week_shift)?;
    let days = (0..WORKING_DAYS)
        .map(|i| add_days(monday, i))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(DateRange::listed(monday, add_days(monday, WORKING_DAYS - 1)?, &days))
}

fn custom_range(request: &DateRangeRequest) -> Result<DateRange, DateError> {
    let (Some(start), Some(end)) = (
        supplied(&request.start_date),
        supplied(&request.end_date),
    ) else {
        return Err(DateError::MissingRequiredField(
            "start_date and end_date are required for custom_range".to_string(),
        ));
    };

    if parse_date(end)? < parse_date(start)? {
        return Err(DateError::InvalidRange(format!(
            "end_date '{end}' is before start_date '{start}'"
        )));
    }

    Ok(DateRange {
        start_date: start.to_string(),
        end_date: end.to_string(),
        dates: None,
    })
}

/// A seven-day window starting at `week_start_date`, optionally narrowed to
/// named days.
///
/// Day offsets count from the supplied start (Monday = +0 … Sunday = +6) and
/// assume that start is a Monday. A start on another weekday shifts every
/// selected date by the same amount rather than snapping to the calendar.
fn custom_week(request: &DateRangeRequest) -> Result<DateRange, DateError> {
    let raw = supplied(&request.week_start_date).ok_or_else(|| {
        DateError::MissingRequiredField("week_start_date is required for custom_week".to_string())
    })?;
    let start = parse_date(raw)?;

    let dates = match request.days_of_week.as_deref() {
        Some(days) if !days.is_empty() => {
            let mut picked = days
                .iter()
                .map(|day| add_days(start, day.offset_from_monday()))
                .collect::<Result<Vec<_>, _>>()?;
            picked.sort();
            Some(picked.into_iter().map(format_date).collect())
        }
        _ => None,
    };

    Ok(DateRange {
        dates,
        ..DateRange::span(start, add_days(start, 6)?)
    })
}

/// An optional argument counts as supplied only when it is non-blank.
fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Wednesday, January 17 2024, mid-morning UTC.
    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 17, 10, 30, 0).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn resolve(range_type: &str) -> DateRange {
        format_date_range(anchor(), &DateRangeRequest::new(range_type)).unwrap()
    }

    fn custom_week_request(start: &str, days: &[WeekdayName]) -> DateRangeRequest {
        DateRangeRequest {
            week_start_date: Some(start.to_string()),
            days_of_week: Some(days.to_vec()),
            ..DateRangeRequest::new("custom_week")
        }
    }

    // ── range type parsing ──────────────────────────────────────────────

    #[test]
    fn test_range_type_round_trips_names() {
        for rt in RangeType::ALL {
            assert_eq!(rt.as_str().parse::<RangeType>().unwrap(), rt);
        }
    }

    #[test]
    fn test_unsupported_range_type_names_value() {
        let err = format_date_range(anchor(), &DateRangeRequest::new("fortnight")).unwrap_err();
        assert_eq!(err, DateError::UnsupportedRangeType("fortnight".to_string()));
        assert_eq!(err.to_string(), "Unsupported range_type: fortnight");
    }

    #[test]
    fn test_range_type_is_case_sensitive() {
        let err = format_date_range(anchor(), &DateRangeRequest::new("This_Week")).unwrap_err();
        assert!(matches!(err, DateError::UnsupportedRangeType(_)));
    }

    // ── single days ─────────────────────────────────────────────────────

    #[test]
    fn test_today() {
        let r = resolve("today");
        assert_eq!(r.start_date, "2024-01-17");
        assert_eq!(r.end_date, "2024-01-17");
        assert!(r.dates.is_none());
    }

    #[test]
    fn test_yesterday_and_tomorrow() {
        assert_eq!(resolve("yesterday").start_date, "2024-01-16");
        assert_eq!(resolve("tomorrow").end_date, "2024-01-18");
    }

    #[test]
    fn test_yesterday_crosses_month_boundary() {
        let r = format_date_range(at(2024, 3, 1), &DateRangeRequest::new("yesterday")).unwrap();
        assert_eq!(r.start_date, "2024-02-29");
    }

    // ── weeks ───────────────────────────────────────────────────────────

    #[test]
    fn test_this_week_from_wednesday() {
        let r = resolve("this_week");
        assert_eq!(r.start_date, "2024-01-15");
        assert_eq!(r.end_date, "2024-01-21");
    }

    #[test]
    fn test_this_week_from_monday() {
        let r = format_date_range(at(2024, 1, 15), &DateRangeRequest::new("this_week")).unwrap();
        assert_eq!(r.start_date, "2024-01-15");
        assert_eq!(r.end_date, "2024-01-21");
    }

    #[test]
    fn test_this_week_from_sunday_ends_that_day() {
        let r = format_date_range(at(2024, 1, 14), &DateRangeRequest::new("this_week")).unwrap();
        assert_eq!(r.start_date, "2024-01-08");
        assert_eq!(r.end_date, "2024-01-14");
    }

    #[test]
    fn test_last_week() {
        let r = resolve("last_week");
        assert_eq!(r.start_date, "2024-01-08");
        assert_eq!(r.end_date, "2024-01-14");
    }

    #[test]
    fn test_next_week() {
        let r = resolve("next_week");
        assert_eq!(r.start_date, "2024-01-22");
        assert_eq!(r.end_date, "2024-01-28");
    }

    #[test]
    fn test_next_week_crosses_year() {
        let r = format_date_range(at(2024, 12, 27), &DateRangeRequest::new("next_week")).unwrap();
        assert_eq!(r.start_date, "2024-12-30");
        assert_eq!(r.end_date, "2025-01-05");
    }

    // ── weekday lists ───────────────────────────────────────────────────

    #[test]
    fn test_weekdays_this_week() {
        let r = resolve("weekdays_this_week");
        assert_eq!(
            r.dates.unwrap(),
            vec!["2024-01-15", "2024-01-16", "2024-01-17", "2024-01-18", "2024-01-19"]
        );
        assert_eq!(r.start_date, "2024-01-15");
        assert_eq!(r.end_date, "2024-01-19");
    }

    #[test]
    fn test_weekdays_last_week() {
        let r = resolve("weekdays_last_week");
        assert_eq!(r.start_date, "2024-01-08");
        assert_eq!(r.end_date, "2024-01-12");
        assert_eq!(r.dates.unwrap().len(), 5);
    }

    #[test]
    fn test_weekdays_next_week() {
        let r = resolve("weekdays_next_week");
        assert_eq!(r.start_date, "2024-01-22");
        assert_eq!(r.end_date, "2024-01-26");
    }

    #[test]
    fn test_weekdays_this_week_from_sunday_uses_past_week() {
        let r = format_date_range(at(2024, 1, 21), &DateRangeRequest::new("weekdays_this_week"))
            .unwrap();
        assert_eq!(r.start_date, "2024-01-15");
        assert_eq!(r.end_date, "2024-01-19");
    }

    // ── months ──────────────────────────────────────────────────────────

    #[test]
    fn test_this_month() {
        let r = resolve("this_month");
        assert_eq!(r.start_date, "2024-01-01");
        assert_eq!(r.end_date, "2024-01-31");
    }

    #[test]
    fn test_last_month_wraps_year() {
        let r = resolve("last_month");
        assert_eq!(r.start_date, "2023-12-01");
        assert_eq!(r.end_date, "2023-12-31");
    }

    #[test]
    fn test_last_month_leap_february() {
        let r = format_date_range(at(2024, 3, 31), &DateRangeRequest::new("last_month")).unwrap();
        assert_eq!(r.start_date, "2024-02-01");
        assert_eq!(r.end_date, "2024-02-29");
    }

    #[test]
    fn test_this_month_thirty_day_month() {
        let r = format_date_range(at(2024, 9, 30), &DateRangeRequest::new("this_month")).unwrap();
        assert_eq!(r.start_date, "2024-09-01");
        assert_eq!(r.end_date, "2024-09-30");
    }

    // ── custom_range ────────────────────────────────────────────────────

    #[test]
    fn test_custom_range_passes_through() {
        let request = DateRangeRequest {
            start_date: Some("2024-02-01".to_string()),
            end_date: Some("2024-02-14".to_string()),
            ..DateRangeRequest::new("custom_range")
        };
        let r = format_date_range(anchor(), &request).unwrap();
        assert_eq!(r.start_date, "2024-02-01");
        assert_eq!(r.end_date, "2024-02-14");
        assert!(r.dates.is_none());
    }

    #[test]
    fn test_custom_range_missing_both_fields() {
        let err = format_date_range(anchor(), &DateRangeRequest::new("custom_range")).unwrap_err();
        assert!(matches!(err, DateError::MissingRequiredField(_)));
        assert_eq!(
            err.to_string(),
            "start_date and end_date are required for custom_range"
        );
    }

    #[test]
    fn test_custom_range_missing_end() {
        let request = DateRangeRequest {
            start_date: Some("2024-02-01".to_string()),
            ..DateRangeRequest::new("custom_range")
        };
        let err = format_date_range(anchor(), &request).unwrap_err();
        assert!(matches!(err, DateError::MissingRequiredField(_)));
    }

    #[test]
    fn test_custom_range_blank_counts_as_missing() {
        let request = DateRangeRequest {
            start_date: Some(String::new()),
            end_date: Some("2024-02-14".to_string()),
            ..DateRangeRequest::new("custom_range")
        };
        let err = format_date_range(anchor(), &request).unwrap_err();
        assert!(matches!(err, DateError::MissingRequiredField(_)));
    }

    #[test]
    fn test_custom_range_rejects_unparseable_date() {
        let request = DateRangeRequest {
            start_date: Some("someday".to_string()),
            end_date: Some("2024-02-14".to_string()),
            ..DateRangeRequest::new("custom_range")
        };
        let err = format_date_range(anchor(), &request).unwrap_err();
        assert!(matches!(err, DateError::InvalidDate(_)));
    }

    #[test]
    fn test_custom_range_rejects_reversed_bounds() {
        let request = DateRangeRequest {
            start_date: Some("2024-02-14".to_string()),
            end_date: Some("2024-02-01".to_string()),
            ..DateRangeRequest::new("custom_range")
        };
        let err = format_date_range(anchor(), &request).unwrap_err();
        assert!(matches!(err, DateError::InvalidRange(_)));
    }

    // ── custom_week ─────────────────────────────────────────────────────

    #[test]
    fn test_custom_week_monday_and_friday() {
        let request =
            custom_week_request("2024-01-15", &[WeekdayName::Monday, WeekdayName::Friday]);
        let r = format_date_range(anchor(), &request).unwrap();
        assert_eq!(r.dates.unwrap(), vec!["2024-01-15", "2024-01-19"]);
        assert_eq!(r.start_date, "2024-01-15");
        assert_eq!(r.end_date, "2024-01-21");
    }

    #[test]
    fn test_custom_week_without_days_has_no_list() {
        let request = DateRangeRequest {
            week_start_date: Some("2024-01-15".to_string()),
            ..DateRangeRequest::new("custom_week")
        };
        let r = format_date_range(anchor(), &request).unwrap();
        assert_eq!(r.end_date, "2024-01-21");
        assert!(r.dates.is_none());
    }

    #[test]
    fn test_custom_week_empty_days_has_no_list() {
        let r = format_date_range(anchor(), &custom_week_request("2024-01-15", &[])).unwrap();
        assert!(r.dates.is_none());
    }

    #[test]
    fn test_custom_week_sorts_requested_days() {
        let request = custom_week_request(
            "2024-01-15",
            &[WeekdayName::Sunday, WeekdayName::Wednesday, WeekdayName::Monday],
        );
        let r = format_date_range(anchor(), &request).unwrap();
        assert_eq!(r.dates.unwrap(), vec!["2024-01-15", "2024-01-17", "2024-01-21"]);
    }

    #[test]
    fn test_custom_week_keeps_duplicates() {
        let request =
            custom_week_request("2024-01-15", &[WeekdayName::Tuesday, WeekdayName::Tuesday]);
        let r = format_date_range(anchor(), &request).unwrap();
        assert_eq!(r.dates.unwrap(), vec!["2024-01-16", "2024-01-16"]);
    }

    #[test]
    fn test_custom_week_offsets_follow_start_not_calendar() {
        // Wednesday start: "monday" resolves to the start itself.
        let request =
            custom_week_request("2024-01-17", &[WeekdayName::Monday, WeekdayName::Tuesday]);
        let r = format_date_range(anchor(), &request).unwrap();
        assert_eq!(r.dates.unwrap(), vec!["2024-01-17", "2024-01-18"]);
        assert_eq!(r.end_date, "2024-01-23");
    }

    #[test]
    fn test_custom_week_spans_month_end() {
        let request = custom_week_request("2024-01-29", &[WeekdayName::Sunday]);
        let r = format_date_range(anchor(), &request).unwrap();
        assert_eq!(r.end_date, "2024-02-04");
        assert_eq!(r.dates.unwrap(), vec!["2024-02-04"]);
    }

    #[test]
    fn test_custom_week_missing_start() {
        let err = format_date_range(anchor(), &DateRangeRequest::new("custom_week")).unwrap_err();
        assert_eq!(
            err,
            DateError::MissingRequiredField("week_start_date is required for custom_week".into())
        );
    }

    #[test]
    fn test_custom_week_invalid_start() {
        let request = DateRangeRequest {
            week_start_date: Some("2024-13-01".to_string()),
            ..DateRangeRequest::new("custom_week")
        };
        let err = format_date_range(anchor(), &request).unwrap_err();
        assert!(matches!(err, DateError::InvalidDate(_)));
    }

    #[test]
    fn test_custom_week_at_calendar_end_is_error() {
        let request = DateRangeRequest {
            week_start_date: Some(format_date(NaiveDate::MAX)),
            ..DateRangeRequest::new("custom_week")
        };
        let err = format_date_range(anchor(), &request).unwrap_err();
        assert!(matches!(err, DateError::OutOfRange(_)));
    }

    #[test]
    fn test_custom_week_days_past_calendar_end_is_error() {
        let start = add_days(NaiveDate::MAX, -2).unwrap();
        let request = custom_week_request(&format_date(start), &[WeekdayName::Sunday]);
        let err = format_date_range(anchor(), &request).unwrap_err();
        assert!(matches!(err, DateError::OutOfRange(_)));
    }

    // ── calendar edges ──────────────────────────────────────────────────

    #[test]
    fn test_symbolic_ranges_at_calendar_edges_do_not_panic() {
        let last = NaiveDate::MAX.and_hms_opt(12, 0, 0).unwrap().and_utc();
        let first = NaiveDate::MIN.and_hms_opt(12, 0, 0).unwrap().and_utc();
        for rt in RangeType::ALL {
            // Only the outcome matters here: an error, never a panic.
            let _ = format_date_range(last, &DateRangeRequest::new(rt.as_str()));
            let _ = format_date_range(first, &DateRangeRequest::new(rt.as_str()));
        }
        assert!(matches!(
            format_date_range(last, &DateRangeRequest::new("next_week")),
            Err(DateError::OutOfRange(_))
        ));
        assert!(matches!(
            format_date_range(first, &DateRangeRequest::new("last_month")),
            Err(DateError::OutOfRange(_))
        ));
    }

    // ── serialization ───────────────────────────────────────────────────

    #[test]
    fn test_serialized_span_omits_dates() {
        let json = serde_json::to_value(resolve("this_month")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "start_date": "2024-01-01", "end_date": "2024-01-31" })
        );
    }

    #[test]
    fn test_request_deserializes_from_tool_arguments() {
        let request: DateRangeRequest = serde_json::from_value(serde_json::json!({
            "range_type": "custom_week",
            "week_start_date": "2024-01-15",
            "days_of_week": ["Monday", "FRIDAY"]
        }))
        .unwrap();
        assert_eq!(request.range_type, "custom_week");
        assert_eq!(
            request.days_of_week.unwrap(),
            vec![WeekdayName::Monday, WeekdayName::Friday]
        );
    }
}
