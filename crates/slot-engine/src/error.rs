//! Error types for slot-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

/// Failure reported by a busy-interval source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// The source could not be reached or refused the query.
    #[error("busy source unavailable: {0}")]
    Unavailable(String),

    /// The source answered with intervals that break the free/busy contract.
    #[error("malformed busy data: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The walk was aborted because the busy source failed for `date`.
    #[error("Busy source failed for {date}: {source}")]
    Provider {
        date: NaiveDate,
        #[source]
        source: ProviderError,
    },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The calendar export could not be parsed.
    #[error("Calendar error: {0}")]
    Calendar(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
