use super::UpstreamError;

/// Maps an [`UpstreamError`] to the HTTP status this service answers with.
///
/// - `NotFound` -> 404 (Not Found)
/// - `Unavailable` -> 503 (Service Unavailable)
/// - `InvalidResponse` -> 502 (Bad Gateway)
///
/// # Examples
///
/// ```
/// use courtsync_core::upstream::{upstream_error_to_status_code, UpstreamError};
///
/// let error = UpstreamError::Unavailable("timeout".to_string());
/// assert_eq!(upstream_error_to_status_code(&error), 503);
/// ```
pub fn upstream_error_to_status_code(error: &UpstreamError) -> u16 {
    match error {
        UpstreamError::NotFound { .. } => 404,
        UpstreamError::Unavailable(_) => 503,
        UpstreamError::InvalidResponse(_) => 502,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = UpstreamError::NotFound {
            resource: "clubs".to_string(),
        };
        assert_eq!(upstream_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_invalid_response_maps_to_502() {
        let error = UpstreamError::InvalidResponse("not json".to_string());
        assert_eq!(upstream_error_to_status_code(&error), 502);
    }
}
