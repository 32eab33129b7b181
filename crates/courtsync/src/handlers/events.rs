use axum::{extract::State, http::StatusCode, Json};

use courtsync_core::availability::AvailabilityEvent;

use crate::{handlers::AppError, state::AppState};

/// Ingress for upstream change notifications (POST /events).
///
/// Answers 204 once the affected cache entries are evicted.
pub async fn receive_event(
    State(state): State<AppState>,
    Json(event): Json<AvailabilityEvent>,
) -> Result<StatusCode, AppError> {
    state.events.handle(&event).await?;

    Ok(StatusCode::NO_CONTENT)
}
