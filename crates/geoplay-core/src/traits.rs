//! Core traits for geoplay abstractions.
//!
//! The record store is the only pluggable backend. The service layer talks
//! to it through [`VideoRepository`] so Postgres and in-memory stores are
//! interchangeable in production and tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{DeleteOutcome, ReplaceOutcome, Video};

/// Durable collection of video records keyed by their `Id` string.
///
/// Every method is a single store operation. Sequences of calls (read then
/// write) are not atomic with respect to other callers.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Insert a new record.
    async fn insert(&self, video: &Video) -> Result<()>;

    /// Every stored record, in store order.
    async fn find_all(&self) -> Result<Vec<Video>>;

    /// The first record whose id equals `id`.
    async fn find_by_id(&self, id: &str) -> Result<Option<Video>>;

    /// Replace the first record whose id equals `id` with `video`.
    async fn replace_where_id_equals(&self, id: &str, video: &Video) -> Result<ReplaceOutcome>;

    /// Remove every record whose id equals `id`.
    async fn delete_where_id_equals(&self, id: &str) -> Result<DeleteOutcome>;
}
