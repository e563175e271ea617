//! Field-level merge for partial updates.

use crate::models::{Location, Video, VideoPatch};

/// Overlay the supplied fields of `patch` onto `existing`.
///
/// The id always comes from `existing`. Each coordinate is merged on its
/// own, so a patch carrying only `Lat` keeps the stored `Long`.
pub fn merge(existing: &Video, patch: &VideoPatch) -> Video {
    Video {
        id: existing.id.clone(),
        name: patch.name.clone().unwrap_or_else(|| existing.name.clone()),
        location: Location {
            lat: patch.lat.unwrap_or(existing.location.lat),
            long: patch.long.unwrap_or(existing.location.long),
        },
    }
}
