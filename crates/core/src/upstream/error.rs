use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by the upstream facility-data provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// Transport failure, timeout, or a 5xx from the upstream.
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),
    /// Unexpected status or a payload that does not decode.
    #[error("Upstream returned an invalid response: {0}")]
    InvalidResponse(String),
    /// The upstream has no data for the place, club or court.
    #[error("Upstream has no {resource}")]
    NotFound { resource: String },
}

/// Stable, serializable classification of an [`UpstreamError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpstreamErrorKind {
    #[serde(rename = "upstream_unavailable")]
    Unavailable,
    #[serde(rename = "upstream_invalid_response")]
    InvalidResponse,
    #[serde(rename = "not_found")]
    NotFound,
}

impl UpstreamError {
    pub fn kind(&self) -> UpstreamErrorKind {
        match self {
            Self::Unavailable(_) => UpstreamErrorKind::Unavailable,
            Self::InvalidResponse(_) => UpstreamErrorKind::InvalidResponse,
            Self::NotFound { .. } => UpstreamErrorKind::NotFound,
        }
    }
}

/// Result type for upstream operations.
pub type Result<T> = std::result::Result<T, UpstreamError>;
