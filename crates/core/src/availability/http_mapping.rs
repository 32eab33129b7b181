//! Pure functions mapping availability and cache errors to HTTP status codes.

use crate::cache::CacheError;
use crate::upstream::upstream_error_to_status_code;

use super::AvailabilityError;

/// Maps an [`AvailabilityError`] to an HTTP status code.
///
/// - `Upstream` -> see [`upstream_error_to_status_code`]
/// - `Incomplete` -> 502 (Bad Gateway)
/// - `InvalidQuery` -> 400 (Bad Request)
pub fn availability_error_to_status_code(error: &AvailabilityError) -> u16 {
    match error {
        AvailabilityError::Upstream(err) => upstream_error_to_status_code(err),
        AvailabilityError::Incomplete { .. } => 502,
        AvailabilityError::InvalidQuery(_) => 400,
    }
}

/// Maps a [`CacheError`] to an HTTP status code.
///
/// Only the invalidation path surfaces cache errors, and every one of them
/// means the cache could not be brought up to date: 503 (Service Unavailable).
pub fn cache_error_to_status_code(error: &CacheError) -> u16 {
    match error {
        CacheError::ConnectionFailed(_)
        | CacheError::OperationFailed(_)
        | CacheError::Serialization(_) => 503,
    }
}
