//! # geoplay-db
//!
//! Record store implementations for geoplay.
//!
//! This crate provides:
//! - Connection pool management
//! - [`PgVideoRepository`], the PostgreSQL store
//! - [`MemoryVideoRepository`], an in-process store for development and tests
//!
//! ## Example
//!
//! ```rust,ignore
//! use geoplay_db::{Database, VideoRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/geoplay").await?;
//!     db.migrate().await?;
//!     let videos = db.videos.find_all().await?;
//!     println!("{} videos", videos.len());
//!     Ok(())
//! }
//! ```
pub mod memory;
pub mod pool;
pub mod videos;

// Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

// Re-export core types
pub use geoplay_core::*;

pub use memory::MemoryVideoRepository;
pub use pool::{log_pool_metrics, PoolConfig};
pub use videos::PgVideoRepository;

/// Combined database context.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Video repository.
    pub videos: PgVideoRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            videos: PgVideoRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect with the default pool settings.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_config(url, &PoolConfig::default()).await
    }

    /// Connect with explicit pool settings.
    pub async fn connect_with_config(url: &str, config: &PoolConfig) -> Result<Self> {
        let pool = config.connect(url).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}
