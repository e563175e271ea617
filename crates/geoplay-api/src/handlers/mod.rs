//! HTTP handlers for geoplay-api.

pub mod playlists;
pub mod system;
pub mod videos;
