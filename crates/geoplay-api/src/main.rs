use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use geoplay_api::{build_router, telemetry, ApiConfig, AppState, HttpSettings, StoreBackend};
use geoplay_core::VideoRepository;
use geoplay_db::{log_pool_metrics, Database, MemoryVideoRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env()?;
    let _file_guard = telemetry::init_tracing(&config.log);

    info!(
        log_format = %config.log.format,
        log_file = config.log.file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    let store: Arc<dyn VideoRepository> = match config.store_backend {
        StoreBackend::Postgres => {
            info!("Connecting to database...");
            let db = Database::connect_with_config(&config.database_url, &config.db_pool).await?;
            log_pool_metrics(db.pool());
            info!("Database connected");

            if config.run_migrations {
                info!("Running database migrations...");
                db.migrate().await?;
                info!("Database migrations complete");
            }
            Arc::new(db.videos)
        }
        StoreBackend::Memory => {
            info!("Using in-memory video store; data is lost on restart");
            Arc::new(MemoryVideoRepository::new())
        }
    };

    info!(
        strict_coordinates = config.strict_coordinates,
        max_body_bytes = config.max_body_bytes,
        "Coordinate and body limits configured"
    );

    let state = AppState::new(store, config.coordinate_bounds())
        .with_http(HttpSettings::from(&config));
    let app = build_router(state);

    let addr: SocketAddr = config.bind_addr().parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
