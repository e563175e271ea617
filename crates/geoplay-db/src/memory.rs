//! In-process video repository.
//!
//! Backs `STORE_BACKEND=memory` and most tests. Records live in a `Vec` so
//! store order is insertion order, the same order Postgres reports via `seq`.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use geoplay_core::{DeleteOutcome, ReplaceOutcome, Result, Video, VideoRepository};

/// [`VideoRepository`] held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryVideoRepository {
    videos: RwLock<Vec<Video>>,
}

impl MemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `videos`, in order.
    pub fn with_videos(videos: Vec<Video>) -> Self {
        Self {
            videos: RwLock::new(videos),
        }
    }

    pub async fn len(&self) -> usize {
        self.videos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.videos.read().await.is_empty()
    }
}

#[async_trait]
impl VideoRepository for MemoryVideoRepository {
    async fn insert(&self, video: &Video) -> Result<()> {
        self.videos.write().await.push(video.clone());
        debug!(
            subsystem = "store",
            component = "memory_videos",
            op = "insert",
            video_id = %video.id,
            "Video inserted"
        );
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Video>> {
        Ok(self.videos.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Video>> {
        Ok(self
            .videos
            .read()
            .await
            .iter()
            .find(|v| v.id == id)
            .cloned())
    }

    async fn replace_where_id_equals(&self, id: &str, video: &Video) -> Result<ReplaceOutcome> {
        let mut videos = self.videos.write().await;
        let matched = match videos.iter_mut().find(|v| v.id == id) {
            Some(slot) => {
                *slot = video.clone();
                true
            }
            None => false,
        };
        Ok(ReplaceOutcome { matched })
    }

    async fn delete_where_id_equals(&self, id: &str) -> Result<DeleteOutcome> {
        let mut videos = self.videos.write().await;
        let before = videos.len();
        videos.retain(|v| v.id != id);
        Ok(DeleteOutcome {
            count_removed: (before - videos.len()) as u64,
        })
    }
}
