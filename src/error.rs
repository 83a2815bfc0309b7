//! Error types for the load boundary, record validation and filter input.
//!
//! The filter and aggregation engines never fail on validated trips; every
//! fallible path lives here.

use thiserror::Error;

/// The trip source did not produce a usable collection.
///
/// Terminal for the load attempt that produced it. Callers decide how to
/// surface it, nothing retries automatically.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("trip source returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid source url: {0}")]
    Url(String),

    #[error("malformed payload: {0}")]
    Payload(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(err.to_string())
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        Self::Payload(err.to_string())
    }
}

/// A single wire record failed validation and was quarantined.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TripError {
    #[error("record has an empty id")]
    EmptyId,

    #[error("pickup time '{0}' is not a valid RFC 3339 timestamp")]
    InvalidPickupTime(String),

    #[error("{field} must be a finite non-negative number, got {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("hour {0} is outside 0-23")]
    HourOutOfRange(i64),

    #[error("duplicate trip id '{0}'")]
    DuplicateId(String),

    #[error("record does not match the trip schema: {0}")]
    Schema(String),
}

/// User-supplied filter input that cannot be turned into criteria.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CriteriaError {
    #[error("{field} must be a non-negative number, got {value}")]
    InvalidBound { field: &'static str, value: f64 },

    #[error("invalid date '{0}': expected RFC 3339 or YYYY-MM-DD")]
    InvalidDate(String),
}
