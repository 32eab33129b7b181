use axum::{
    extract::{Path, Query, State},
    Json,
};

use courtsync_core::availability::{
    parse_query_date, ClubAvailability, ClubAvailabilityQuery, ClubId, PlaceAvailability,
    SearchQuery,
};

use crate::{handlers::AppError, state::AppState};

/// Availability of every club of a place (GET /search?placeId=&date=).
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<PlaceAvailability>, AppError> {
    let date = parse_query_date(&query.date)?;

    tracing::debug!(place_id = %query.place_id, %date, "Searching availability");

    let availability = state.aggregator.for_place(&query.place_id, date).await?;

    Ok(Json(availability))
}

/// Availability of one club (GET /clubs/{club_id}/availability?date=).
pub async fn club_availability(
    State(state): State<AppState>,
    Path(club_id): Path<ClubId>,
    Query(query): Query<ClubAvailabilityQuery>,
) -> Result<Json<ClubAvailability>, AppError> {
    let date = parse_query_date(&query.date)?;

    let availability = state.aggregator.for_club(club_id, date).await?;

    Ok(Json(availability))
}
