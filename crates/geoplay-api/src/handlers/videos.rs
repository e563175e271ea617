//! Video CRUD handlers.
//!
//! Bodies are extracted as `Result<Json<_>, JsonRejection>` so malformed or
//! non-JSON input is reported as 400 with the rejection text.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use geoplay_core::{VideoEnvelope, VideoList, VideoRequest};

use crate::{ApiError, AppState};

/// List every stored video.
///
/// # Returns
/// - 200 OK with `{"Videos": [...]}`
pub async fn list_videos(State(state): State<AppState>) -> Result<Json<VideoList>, ApiError> {
    let videos = state.catalog.list().await?;
    Ok(Json(VideoList::from(videos)))
}

/// Get one video by id.
///
/// # Returns
/// - 200 OK with `{"Video": {...}}`
/// - 404 Not Found if no video has this id
pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VideoEnvelope>, ApiError> {
    let video = state.catalog.get(&id).await?;
    Ok(Json(video.into()))
}

/// Create a video. Any `Id` in the body is ignored.
///
/// # Returns
/// - 201 Created with the stored video, including its generated `Id`
/// - 400 Bad Request if the body fails validation
pub async fn create_video(
    State(state): State<AppState>,
    body: Result<Json<VideoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VideoEnvelope>), ApiError> {
    let Json(request) = body?;
    let video = state.catalog.create(request).await?;
    Ok((StatusCode::CREATED, Json(video.into())))
}

/// Replace a video with a full record.
///
/// # Returns
/// - 200 OK with the stored video
/// - 400 Bad Request if the body fails validation or its `Id` differs from the path
/// - 404 Not Found if no video has this id
pub async fn replace_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<VideoRequest>, JsonRejection>,
) -> Result<Json<VideoEnvelope>, ApiError> {
    let Json(request) = body?;
    let video = state.catalog.replace(&id, request).await?;
    Ok(Json(video.into()))
}

/// Update the supplied fields of a video.
///
/// # Returns
/// - 200 OK with the merged video
/// - 400 Bad Request if a supplied field has the wrong type
/// - 404 Not Found if no video has this id
pub async fn patch_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<VideoRequest>, JsonRejection>,
) -> Result<Json<VideoEnvelope>, ApiError> {
    let Json(request) = body?;
    let video = state.catalog.patch(&id, request).await?;
    Ok(Json(video.into()))
}

/// Delete a video.
///
/// # Returns
/// - 200 OK with `{"success": "Deleted id: <id>"}`
/// - 404 Not Found if no video has this id
pub async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.catalog.delete(&id).await?;
    Ok(Json(serde_json::json!({
        "success": format!("Deleted id: {}", id),
    })))
}
