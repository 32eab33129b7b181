use thiserror::Error;

use crate::upstream::UpstreamError;

use super::types::SectionError;

/// Errors that abort an availability query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    /// The initiating fetch (clubs of the place, or courts of the club) failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    /// A section failed while the aggregator runs with the `abort` policy.
    #[error("Availability incomplete, {section} failed: {}", .error.message)]
    Incomplete {
        section: String,
        error: SectionError,
    },
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

/// Result type for availability queries.
pub type Result<T> = std::result::Result<T, AvailabilityError>;
