use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while paging through the upstream history endpoint.
///
/// Every variant aborts the fetch; callers treat the result as empty.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Data source returned HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("Request to data source failed: {0}")]
    Request(#[from] reqwest_middleware::Error),

    #[error("Failed to decode data source response: {0}")]
    Decode(#[from] reqwest::Error),

    #[error("Pagination cursor did not move backward: {previous} -> {next}")]
    NonProgressingCursor { previous: i64, next: i64 },

    #[error("Data source unavailable: {reason}")]
    Unavailable { reason: String },
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors related to metric window parameters
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricsError {
    #[error("{window} window must be at least 1 day")]
    ZeroWindow { window: &'static str },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Start date {start} is after end date {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },
}
