//! UUIDv7 ids for new videos.
//!
//! Ids are rendered as hyphenated lowercase strings. The leading 48 bits hold
//! a millisecond timestamp, so later ids sort after earlier ones. Ids supplied
//! by clients on replace are stored verbatim and need not be UUIDs at all.

use uuid::Uuid;

/// Generate the string id for a newly created video.
pub fn new_video_id() -> String {
    Uuid::now_v7().hyphenated().to_string()
}
