//! Relative date expressions ("yesterday", "next Monday", "this week").
//!
//! Matching is shallow: the lowercased expression is tested for a
//! handful of phrases by substring containment, in a fixed priority order, and
//! the first hit wins. Phrases that do not match produce a
//! [`ParseOutcome::Unrecognized`] result carrying suggestions instead of an
//! error, so an agent can retry with a supported phrase.
//!
//! The suggestion list is wider than the matcher. "last week", "next week",
//! "next Friday", "this month" and "last month" are suggested but currently
//! come back unrecognized; use [`crate::range::format_date_range`] for those.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::calendar::{add_days, format_date, monday_of, parse_date, weekday_index};
use crate::error::DateError;
use crate::range::DateRange;

type Rule = fn(&str, NaiveDate) -> Result<Option<ParseOutcome>, DateError>;

/// Matchers in priority order; the first that fires decides the outcome.
const RULES: [Rule; 3] = [try_anchored, try_monday, try_this_week];

/// Phrases offered back to the caller when an expression is not recognized.
pub const SUGGESTIONS: [&str; 10] = [
    "today",
    "yesterday",
    "tomorrow",
    "this week",
    "last week",
    "next week",
    "last Monday",
    "next Friday",
    "this month",
    "last month",
];

/// What an expression resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParseOutcome {
    SingleDate {
        parsed_date: String,
    },
    DateRange(DateRange),
    Unrecognized {
        error: String,
        suggestions: Vec<String>,
    },
}

/// A parse outcome together with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelativeDate {
    #[serde(flatten)]
    pub outcome: ParseOutcome,
    /// The expression exactly as the caller sent it.
    pub original_expression: String,
    /// The caller's reference date, or the anchor's date when none was given.
    pub reference_date: String,
}

/// Parse a natural-language date expression against a reference date.
///
/// The reference is `reference_date` when supplied, otherwise the UTC date of
/// `anchor`.
///
/// # Errors
///
/// Returns [`DateError::InvalidDate`] if `reference_date` is supplied but
/// cannot be parsed, and [`DateError::OutOfRange`] if the matched phrase would
/// step past the representable calendar. An unrecognized expression is
/// **not** an error.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use tick_dates::relative::{parse_relative_date, ParseOutcome};
///
/// let result = parse_relative_date(Utc::now(), "Next Monday", Some("2024-01-15")).unwrap();
/// assert_eq!(
///     result.outcome,
///     ParseOutcome::SingleDate { parsed_date: "2024-01-22".to_string() }
/// );
/// ```
pub fn parse_relative_date(
    anchor: DateTime<Utc>,
    expression: &str,
    reference_date: Option<&str>,
) -> Result<RelativeDate, DateError> {
    let supplied = reference_date.filter(|r| !r.trim().is_empty());
    let reference = match supplied {
        Some(raw) => parse_date(raw)?,
        None => anchor.date_naive(),
    };

    let normalized = expression.trim().to_lowercase();
    let outcome = RULES
        .iter()
        .find_map(|rule| rule(&normalized, reference).transpose())
        .transpose()?
        .unwrap_or_else(|| unrecognized(expression));

    Ok(RelativeDate {
        outcome,
        original_expression: expression.to_string(),
        reference_date: supplied
            .map(str::to_string)
            .unwrap_or_else(|| format_date(reference)),
    })
}

fn single(date: NaiveDate) -> ParseOutcome {
    ParseOutcome::SingleDate {
        parsed_date: format_date(date),
    }
}

/// "today", "yesterday", "tomorrow", checked in that order.
fn try_anchored(s: &str, reference: NaiveDate) -> Result<Option<ParseOutcome>, DateError> {
    let offset = if s.contains("today") {
        0
    } else if s.contains("yesterday") {
        -1
    } else if s.contains("tomorrow") {
        1
    } else {
        return Ok(None);
    };
    Ok(Some(single(add_days(reference, offset)?)))
}

/// "last Monday" / "previous Monday" and "next Monday".
///
/// "last Monday" always skips back past the Monday of the reference's own
/// week, landing on the Monday of the week before it, even when the reference
/// is itself a Monday. "next Monday" is always strictly in the future.
fn try_monday(s: &str, reference: NaiveDate) -> Result<Option<ParseOutcome>, DateError> {
    let wd = weekday_index(reference) as i64;
    if s.contains("last monday") || s.contains("previous monday") {
        let back = (wd + 6) % 7 + 7;
        return Ok(Some(single(add_days(reference, -back)?)));
    }
    if s.contains("next monday") {
        let ahead = match (8 - wd) % 7 {
            0 => 7,
            n => n,
        };
        return Ok(Some(single(add_days(reference, ahead)?)));
    }
    Ok(None)
}

fn try_this_week(s: &str, reference: NaiveDate) -> Result<Option<ParseOutcome>, DateError> {
    if !s.contains("this week") {
        return Ok(None);
    }
    let monday = monday_of(reference)?;
    Ok(Some(ParseOutcome::DateRange(DateRange::span(
        monday,
        add_days(monday, 6)?,
    ))))
}

fn unrecognized(expression: &str) -> ParseOutcome {
    ParseOutcome::Unrecognized {
        error: format!(
            "Could not parse \"{expression}\". Try using more specific expressions like \
             \"today\", \"yesterday\", \"this week\", \"last Monday\", etc."
        ),
        suggestions: SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
