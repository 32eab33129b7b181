use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use courtsync_core::availability::{
    availability_error_to_status_code, cache_error_to_status_code, AvailabilityError,
};
use courtsync_core::cache::CacheError;
use courtsync_core::upstream::{upstream_error_to_status_code, UpstreamError, UpstreamErrorKind};

/// Handler error rendered as `{ "error": kind, "message": text }`.
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_and_kind(&self) -> (u16, &'static str) {
        if let Some(err) = self.0.downcast_ref::<AvailabilityError>() {
            let kind = match err {
                AvailabilityError::Upstream(upstream) => upstream_kind(upstream),
                AvailabilityError::Incomplete { .. } => "incomplete",
                AvailabilityError::InvalidQuery(_) => "invalid_query",
            };
            (availability_error_to_status_code(err), kind)
        } else if let Some(err) = self.0.downcast_ref::<UpstreamError>() {
            (upstream_error_to_status_code(err), upstream_kind(err))
        } else if let Some(err) = self.0.downcast_ref::<CacheError>() {
            (cache_error_to_status_code(err), "cache_unavailable")
        } else {
            (500, "internal")
        }
    }
}

fn upstream_kind(error: &UpstreamError) -> &'static str {
    match error.kind() {
        UpstreamErrorKind::Unavailable => "upstream_unavailable",
        UpstreamErrorKind::InvalidResponse => "upstream_invalid_response",
        UpstreamErrorKind::NotFound => "not_found",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, kind) = self.status_and_kind();
        let status_code = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status_code.is_server_error() {
            tracing::warn!(status = code, error = %self.0, "Request failed");
        }

        (
            status_code,
            Json(json!({ "error": kind, "message": self.0.to_string() })),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
