//! PostgreSQL video repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::{debug, info};

use geoplay_core::{
    DeleteOutcome, Error, Location, ReplaceOutcome, Result, Video, VideoRepository,
};

/// PostgreSQL implementation of [`VideoRepository`].
///
/// Rows are read back in `seq` order, which is insertion order. `seq` and
/// the audit timestamps never leave this module.
pub struct PgVideoRepository {
    pool: Pool<Postgres>,
}

impl PgVideoRepository {
    /// Create a new PgVideoRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn video_from_row(row: &PgRow) -> Video {
    Video {
        id: row.get("id"),
        name: row.get("name"),
        location: Location {
            lat: row.get("latitude"),
            long: row.get("longitude"),
        },
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    async fn insert(&self, video: &Video) -> Result<()> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO video (id, name, latitude, longitude, created_at_utc, updated_at_utc)
            VALUES ($1, $2, $3, $4, $5, $5)
            "#,
        )
        .bind(&video.id)
        .bind(&video.name)
        .bind(video.location.lat)
        .bind(video.location.long)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        info!(
            subsystem = "database",
            component = "pg_videos",
            op = "insert",
            video_id = %video.id,
            "Video inserted"
        );
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Video>> {
        let rows = sqlx::query("SELECT id, name, latitude, longitude FROM video ORDER BY seq")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "pg_videos",
            op = "find_all",
            result_count = rows.len(),
            "Loaded videos"
        );
        Ok(rows.iter().map(video_from_row).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Video>> {
        let row = sqlx::query(
            "SELECT id, name, latitude, longitude FROM video WHERE id = $1 ORDER BY seq LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.as_ref().map(video_from_row))
    }

    async fn replace_where_id_equals(&self, id: &str, video: &Video) -> Result<ReplaceOutcome> {
        let result = sqlx::query(
            r#"
            UPDATE video
            SET id = $2, name = $3, latitude = $4, longitude = $5, updated_at_utc = $6
            WHERE seq = (SELECT seq FROM video WHERE id = $1 ORDER BY seq LIMIT 1)
            "#,
        )
        .bind(id)
        .bind(&video.id)
        .bind(&video.name)
        .bind(video.location.lat)
        .bind(video.location.long)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        let matched = result.rows_affected() > 0;
        debug!(
            subsystem = "database",
            component = "pg_videos",
            op = "replace",
            video_id = %id,
            matched,
            "Replace by id"
        );
        Ok(ReplaceOutcome { matched })
    }

    async fn delete_where_id_equals(&self, id: &str) -> Result<DeleteOutcome> {
        let result = sqlx::query("DELETE FROM video WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        let count_removed = result.rows_affected();
        debug!(
            subsystem = "database",
            component = "pg_videos",
            op = "delete",
            video_id = %id,
            count_removed,
            "Delete by id"
        );
        Ok(DeleteOutcome { count_removed })
    }
}
