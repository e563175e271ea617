//! Proximity playlist handler.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use geoplay_core::Playlist;
use geoplay_search::ProximityQuery;

use crate::{ApiError, AppState};

/// Raw playlist query parameters. Kept as strings so that missing and
/// non-numeric values are reported by `ProximityQuery::from_params`
/// instead of a generic deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct PlaylistParams {
    pub lat: Option<String>,
    pub long: Option<String>,
    pub radius: Option<String>,
}

/// Videos within `radius` miles of (`lat`, `long`), nearest first.
///
/// # Query Parameters
/// - `lat`, `long`: origin in decimal degrees
/// - `radius`: inclusive radius in miles
///
/// # Returns
/// - 200 OK with `{"Playlist": [...]}`
/// - 400 Bad Request if any parameter is missing or not numeric
pub async fn get_playlist(
    State(state): State<AppState>,
    Query(params): Query<PlaylistParams>,
) -> Result<Json<Playlist>, ApiError> {
    let query = ProximityQuery::from_params(
        params.lat.as_deref(),
        params.long.as_deref(),
        params.radius.as_deref(),
    )?;
    let videos = state.proximity.playlist(&query).await?;
    Ok(Json(Playlist::from(videos)))
}
