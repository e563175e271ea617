//! Radius queries ranked by great-circle distance.
//!
//! The store has no spatial index, so every query scans the full record set,
//! computes one distance per record, and sorts the survivors. Distances are
//! carried alongside each video in [`RankedVideo`] and dropped before the
//! playlist is returned.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, trace};

use geoplay_core::{distance_miles, Error, Location, Result, Video, VideoRepository};

/// A validated proximity query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityQuery {
    pub origin: Location,
    pub radius_miles: f64,
}

impl ProximityQuery {
    pub fn new(origin: Location, radius_miles: f64) -> Self {
        Self {
            origin,
            radius_miles,
        }
    }

    /// Parse raw query-string values.
    ///
    /// Absent or empty values are missing. Every problem is collected into a
    /// single [`Error::InvalidInput`] so the caller sees them all at once.
    pub fn from_params(lat: Option<&str>, long: Option<&str>, radius: Option<&str>) -> Result<Self> {
        let mut problems = Vec::new();
        let lat = parse_param("lat", lat, &mut problems);
        let long = parse_param("long", long, &mut problems);
        let radius = parse_param("radius", radius, &mut problems);

        match (lat, long, radius) {
            (Some(lat), Some(long), Some(radius)) if problems.is_empty() => {
                Ok(Self::new(Location::new(lat, long), radius))
            }
            _ => Err(Error::InvalidInput(problems.join("; "))),
        }
    }
}

fn parse_param(name: &str, raw: Option<&str>, problems: &mut Vec<String>) -> Option<f64> {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => {
            problems.push(format!("{} is required", name));
            return None;
        }
    };
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => {
            problems.push(format!("{} must be numeric", name));
            None
        }
    }
}

/// A video paired with its distance from the query origin.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedVideo {
    pub video: Video,
    pub distance_miles: f64,
}

/// Keep videos within `query.radius_miles` (inclusive), nearest first.
///
/// The sort is stable, so equal distances keep their input order.
pub fn rank_by_distance(query: &ProximityQuery, videos: Vec<Video>) -> Vec<RankedVideo> {
    let mut ranked: Vec<RankedVideo> = videos
        .into_iter()
        .filter_map(|video| {
            let distance = distance_miles(&query.origin, &video.location);
            trace!(video_id = %video.id, distance_miles = distance, "Scanned video");
            (distance <= query.radius_miles).then_some(RankedVideo {
                video,
                distance_miles: distance,
            })
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    ranked
}

/// Proximity engine over a record store.
#[derive(Clone)]
pub struct ProximitySearchEngine {
    store: Arc<dyn VideoRepository>,
}

impl ProximitySearchEngine {
    pub fn new(store: Arc<dyn VideoRepository>) -> Self {
        Self { store }
    }

    /// Videos within the query radius, nearest first, distances stripped.
    pub async fn playlist(&self, query: &ProximityQuery) -> Result<Vec<Video>> {
        let start = Instant::now();
        let videos = self.store.find_all().await?;
        let scanned = videos.len();

        let playlist: Vec<Video> = rank_by_distance(query, videos)
            .into_iter()
            .map(|ranked| ranked.video)
            .collect();

        debug!(
            subsystem = "search",
            component = "proximity",
            op = "playlist",
            radius_miles = query.radius_miles,
            scanned,
            result_count = playlist.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Proximity query complete"
        );
        Ok(playlist)
    }
}
