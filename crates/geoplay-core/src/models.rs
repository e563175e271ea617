//! Core data models for geoplay.
//!
//! These types are shared across all geoplay crates. Wire names follow the
//! service's PascalCase JSON schema (`Video`, `Id`, `Name`, `Location`, `Lat`,
//! `Long`).

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// =============================================================================
// VIDEO TYPES
// =============================================================================

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "Lat")]
    pub lat: f64,
    #[serde(rename = "Long")]
    pub long: f64,
}

impl Location {
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }
}

/// A persisted, fully populated video record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Location")]
    pub location: Location,
}

/// Single-record wire envelope: `{"Video": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoEnvelope {
    #[serde(rename = "Video")]
    pub video: Video,
}

impl From<Video> for VideoEnvelope {
    fn from(video: Video) -> Self {
        Self { video }
    }
}

/// Response for listing every stored video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoList {
    #[serde(rename = "Videos")]
    pub videos: Vec<VideoEnvelope>,
}

impl From<Vec<Video>> for VideoList {
    fn from(videos: Vec<Video>) -> Self {
        Self {
            videos: videos.into_iter().map(VideoEnvelope::from).collect(),
        }
    }
}

/// Response for a proximity query, nearest video first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(rename = "Playlist")]
    pub playlist: Vec<VideoEnvelope>,
}

impl From<Vec<Video>> for Playlist {
    fn from(videos: Vec<Video>) -> Self {
        Self {
            playlist: videos.into_iter().map(VideoEnvelope::from).collect(),
        }
    }
}

// =============================================================================
// INBOUND PAYLOADS
// =============================================================================

/// Inbound request envelope. `Video` is optional so that a missing envelope is
/// reported as a validation failure instead of a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoRequest {
    #[serde(rename = "Video", default)]
    pub video: Option<VideoPayload>,
}

/// Untyped candidate record. Each slot holds the raw JSON value, if present,
/// so the validator can check types instead of serde rejecting the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoPayload {
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonValue>,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<JsonValue>,
    #[serde(rename = "Location", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationPayload>,
}

/// Untyped candidate location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationPayload {
    #[serde(rename = "Lat", default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<JsonValue>,
    #[serde(rename = "Long", default, skip_serializing_if = "Option::is_none")]
    pub long: Option<JsonValue>,
}

impl VideoPayload {
    /// Pin `id` into the payload, overwriting whatever the caller sent.
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(JsonValue::String(id.to_string()));
        self
    }

    pub fn lat(&self) -> Option<&JsonValue> {
        self.location.as_ref().and_then(|l| l.lat.as_ref())
    }

    pub fn long(&self) -> Option<&JsonValue> {
        self.location.as_ref().and_then(|l| l.long.as_ref())
    }
}

/// Typed partial update. Built only from a payload that passed patch
/// validation; `None` means "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoPatch {
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
}

impl VideoPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.lat.is_none() && self.long.is_none()
    }
}

/// Typed fields of a create request (id is generated by the service).
#[derive(Debug, Clone, PartialEq)]
pub struct NewVideo {
    pub name: String,
    pub location: Location,
}

impl NewVideo {
    pub fn into_video(self, id: String) -> Video {
        Video {
            id,
            name: self.name,
            location: self.location,
        }
    }
}

// =============================================================================
// STORE OUTCOMES
// =============================================================================

/// Result of a replace-by-id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub matched: bool,
}

/// Result of a delete-by-id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub count_removed: u64,
}
