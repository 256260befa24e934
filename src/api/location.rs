//! Geolocation endpoint

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::services::location::ResolvedMap;

/// Map URL request; accuracy defaults to the configured preference
#[derive(Deserialize, ToSchema)]
pub struct MapUrlRequest {
    pub high_accuracy: Option<bool>,
}

/// Resolve a map URL for the customer's position
///
/// Never fails: provider errors and timeouts degrade to the generic
/// area map with a transient notice.
#[utoipa::path(
    post,
    path = "/location/map-url",
    tag = "location",
    request_body = MapUrlRequest,
    responses(
        (status = 200, description = "Map URL, live or fallback", body = ResolvedMap)
    )
)]
pub async fn map_url(
    State(state): State<crate::AppState>,
    Json(request): Json<MapUrlRequest>,
) -> Json<ResolvedMap> {
    Json(state.services.location.map_url(request.high_accuracy).await)
}
