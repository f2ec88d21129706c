//! # tick-dates
//!
//! Deterministic date helpers for time-tracking agents.
//!
//! Agents logging hours against a time-tracking service need concrete
//! `YYYY-MM-DD` dates, but users speak in "this week", "last month" or "next
//! Monday". This crate turns those into dates with plain calendar arithmetic,
//! so the answer never depends on model inference or on the host's locale.
//!
//! Nothing here reads the clock. Every entry point takes the caller's "now"
//! as an explicit [`chrono::DateTime<Utc>`](chrono::DateTime) anchor.
//!
//! ## Modules
//!
//! - [`calendar`] — canonical date formatting, Monday-first weeks, month bounds
//! - [`range`] — symbolic ranges (`this_week`, `last_month`, `custom_week`, …)
//! - [`relative`] — natural-language expressions ("yesterday", "next Monday")
//! - [`current`] — the current instant broken into calendar fields
//! - [`error`] — error types

pub mod calendar;
pub mod current;
pub mod error;
pub mod range;
pub mod relative;

pub use calendar::{format_date, monday_of, parse_date, WeekdayName};
pub use current::{current_date, CurrentDate};
pub use error::DateError;
pub use range::{format_date_range, DateRange, DateRangeRequest, RangeType};
pub use relative::{parse_relative_date, ParseOutcome, RelativeDate, SUGGESTIONS};
