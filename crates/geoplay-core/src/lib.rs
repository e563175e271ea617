//! # geoplay-core
//!
//! Core types, traits, and abstractions for the geoplay video store.
//!
//! This crate provides the foundational data structures, the record store
//! interface, and the pure building blocks (great-circle distance, payload
//! validation, patch merging) that the other geoplay crates depend on.
//!
//! ## Logging
//!
//! Every crate logs through `tracing` with the same field names:
//! `subsystem` (`api`, `search`, `database`, `store`), `component`, `op`,
//! `video_id`, `duration_ms`, `result_count`, `scanned` and `radius_miles`.
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Masked 500s and other failures needing an operator |
//! | WARN  | Recoverable trouble such as a saturated pool |
//! | INFO  | Startup and completed writes |
//! | DEBUG | Query summaries and config choices |
//! | TRACE | Per-record work in the distance scan |

pub mod error;
pub mod geo;
pub mod merge;
pub mod models;
pub mod traits;
pub mod uuid_utils;
pub mod validation;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use geo::{distance_miles, haversine_miles, EARTH_RADIUS_MILES};
pub use merge::merge;
pub use models::*;
pub use traits::*;
pub use uuid_utils::new_video_id;
pub use validation::{
    parse_number, validate_for_create, validate_for_patch, validate_for_replace,
    CoordinateBounds, ValidationReport, Violation, ViolationKind,
};
