//! # geoplay-api
//!
//! HTTP surface for the geoplay video store: CRUD on `/videos`, proximity
//! playlists on `/playlists`, and a health probe. The binary in `main.rs`
//! wires configuration, logging and the record store into [`build_router`].

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod services;
pub mod telemetry;

pub use app::{build_router, AppState, HttpSettings, MakeRequestUuidV7};
pub use config::{ApiConfig, LogConfig, StoreBackend};
pub use error::ApiError;
pub use services::VideoCatalog;
