//! Router and shared state.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use geoplay_core::{CoordinateBounds, VideoRepository};
use geoplay_search::ProximitySearchEngine;

use crate::config::{ApiConfig, DEFAULT_MAX_BODY_BYTES};
use crate::handlers::{playlists, system, videos};
use crate::services::VideoCatalog;

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Transport settings applied as router layers.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub max_body_bytes: usize,
    pub allowed_origins: Vec<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            allowed_origins: Vec::new(),
        }
    }
}

impl From<&ApiConfig> for HttpSettings {
    fn from(config: &ApiConfig) -> Self {
        Self {
            max_body_bytes: config.max_body_bytes,
            allowed_origins: config.allowed_origins.clone(),
        }
    }
}

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: VideoCatalog,
    pub proximity: ProximitySearchEngine,
    pub http: HttpSettings,
}

impl AppState {
    pub fn new(store: Arc<dyn VideoRepository>, bounds: CoordinateBounds) -> Self {
        Self {
            catalog: VideoCatalog::new(store.clone(), bounds),
            proximity: ProximitySearchEngine::new(store),
            http: HttpSettings::default(),
        }
    }

    pub fn with_http(mut self, http: HttpSettings) -> Self {
        self.http = http;
        self
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(std::time::Duration::from_secs(3600))
}

pub fn build_router(state: AppState) -> Router {
    let http = state.http.clone();

    Router::new()
        .route("/", get(system::root_redirect))
        .route("/health", get(system::health_check))
        .route(
            "/videos",
            get(videos::list_videos).post(videos::create_video),
        )
        .route(
            "/videos/:id",
            get(videos::get_video)
                .put(videos::replace_video)
                .patch(videos::patch_video)
                .delete(videos::delete_video),
        )
        .route("/playlists", get(playlists::get_playlist))
        .route("/playlist", get(playlists::get_playlist))
        .fallback(system::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors_layer(&http.allowed_origins))
        .layer(RequestBodyLimitLayer::new(http.max_body_bytes))
        .with_state(state)
}
