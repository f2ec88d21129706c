//! Error types for tick-dates operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("{0}")]
    MissingRequiredField(String),

    #[error("Unsupported range_type: {0}")]
    UnsupportedRangeType(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("Date out of range: {0}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, DateError>;
