//! Error types for the aggregation engine.

use thiserror::Error;

/// Result type alias for aggregation operations.
pub type InsightsResult<T> = Result<T, InsightsError>;

/// Input validation errors. Aggregation itself never fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InsightsError {
    /// A date did not parse as `YYYY-MM-DD`
    #[error("{field}: invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate {
        /// Parameter name
        field: &'static str,
        /// The rejected input
        value: String,
    },

    /// A month did not parse as `YYYY-MM`
    #[error("invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    /// End of the range precedes its start
    #[error("until_date {until} is before since_date {since}")]
    InvalidRange {
        /// Range start
        since: String,
        /// Range end
        until: String,
    },

    /// Range spans more days than allowed
    #[error("date range of {days} days is too large (max {max} days)")]
    RangeTooLarge {
        /// Requested span
        days: i64,
        /// Allowed span
        max: i64,
    },
}

impl InsightsError {
    /// Returns a user-friendly suggestion for recovering from this error.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::InvalidDate { .. } => "Use dates in YYYY-MM-DD format, e.g. 2024-01-31",
            Self::InvalidMonth(_) => "Use months in YYYY-MM format, e.g. 2024-01",
            Self::InvalidRange { .. } => "Swap the dates so until_date is on or after since_date",
            Self::RangeTooLarge { .. } => "Split the request into ranges of at most two years",
        }
    }
}
