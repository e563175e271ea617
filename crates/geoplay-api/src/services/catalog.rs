//! Video CRUD over a record store.
//!
//! Each operation validates its input before touching the store, so a
//! rejected request never causes a write. Partial updates are a plain
//! read-merge-write: two concurrent patches of the same id can lose one of
//! the two changes, whichever replace lands first.

use std::sync::Arc;

use tracing::{debug, info};

use geoplay_core::{
    merge, new_video_id, CoordinateBounds, Error, Result, Video, VideoRepository, VideoRequest,
};

/// CRUD operations on videos.
#[derive(Clone)]
pub struct VideoCatalog {
    store: Arc<dyn VideoRepository>,
    bounds: CoordinateBounds,
}

impl VideoCatalog {
    pub fn new(store: Arc<dyn VideoRepository>, bounds: CoordinateBounds) -> Self {
        Self { store, bounds }
    }

    /// Every video, in store order.
    pub async fn list(&self) -> Result<Vec<Video>> {
        self.store.find_all().await
    }

    pub async fn get(&self, id: &str) -> Result<Video> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::video_not_found(id))
    }

    /// Store a new video under a generated id.
    pub async fn create(&self, request: VideoRequest) -> Result<Video> {
        let video = request.into_new_video(self.bounds)?.into_video(new_video_id());
        self.store.insert(&video).await?;
        info!(
            subsystem = "api",
            component = "catalog",
            op = "create",
            video_id = %video.id,
            "Video created"
        );
        Ok(video)
    }

    /// Replace the video at `id` with a full record.
    pub async fn replace(&self, id: &str, request: VideoRequest) -> Result<Video> {
        let video = request.into_replacement(id, self.bounds)?;
        let outcome = self.store.replace_where_id_equals(id, &video).await?;
        if !outcome.matched {
            return Err(Error::video_not_found(id));
        }
        info!(
            subsystem = "api",
            component = "catalog",
            op = "replace",
            video_id = %id,
            "Video replaced"
        );
        Ok(video)
    }

    /// Overlay the supplied fields onto the stored video.
    pub async fn patch(&self, id: &str, request: VideoRequest) -> Result<Video> {
        let patch = request.into_patch(self.bounds)?;
        let existing = self.get(id).await?;
        let merged = merge(&existing, &patch);

        debug!(
            subsystem = "api",
            component = "catalog",
            op = "patch",
            video_id = %id,
            empty_patch = patch.is_empty(),
            "Merged patch"
        );

        let outcome = self.store.replace_where_id_equals(id, &merged).await?;
        if !outcome.matched {
            // Deleted between the read and the write.
            return Err(Error::video_not_found(id));
        }
        info!(
            subsystem = "api",
            component = "catalog",
            op = "patch",
            video_id = %id,
            "Video patched"
        );
        Ok(merged)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let outcome = self.store.delete_where_id_equals(id).await?;
        if outcome.count_removed == 0 {
            return Err(Error::video_not_found(id));
        }
        info!(
            subsystem = "api",
            component = "catalog",
            op = "delete",
            video_id = %id,
            count_removed = outcome.count_removed,
            "Video deleted"
        );
        Ok(())
    }
}
