//! # geoplay-search
//!
//! Proximity queries over the video store.
//!
//! This crate provides:
//! - Query parameter parsing with all-at-once error reporting
//! - Pure distance ranking (`rank_by_distance`)
//! - A store-backed engine that produces nearest-first playlists
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use geoplay_search::{ProximityQuery, ProximitySearchEngine};
//!
//! let engine = ProximitySearchEngine::new(Arc::new(store));
//! let query = ProximityQuery::from_params(Some("36.12"), Some("-86.67"), Some("50"))?;
//! let playlist = engine.playlist(&query).await?;
//! ```

pub mod proximity;

// Re-export core types
pub use geoplay_core::*;

pub use proximity::{rank_by_distance, ProximityQuery, ProximitySearchEngine, RankedVideo};
