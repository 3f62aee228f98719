//! URL Cache Entry Module
//!
//! Defines the record stored for a resolved camera stream URL.

use std::time::Duration;

use chrono::{DateTime, Utc};

// == URL Cache Entry ==
/// A resolved, playable stream URL for one camera.
///
/// Entries are never mutated once built; a re-resolution produces a new entry
/// that replaces the old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlCacheEntry {
    /// Camera the URL belongs to
    pub camera_id: String,
    /// Playable stream address
    pub url: String,
    /// When the URL was resolved
    pub created_at: DateTime<Utc>,
}

impl UrlCacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current time.
    pub fn new(camera_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self::resolved_at(camera_id, url, Utc::now())
    }

    /// Creates an entry stamped with an explicit resolution time.
    pub fn resolved_at(
        camera_id: impl Into<String>,
        url: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            camera_id: camera_id.into(),
            url: url.into(),
            created_at,
        }
    }

    // == Freshness ==
    /// Checks whether the entry is still inside its validity window at `now`.
    ///
    /// Boundary condition: an entry whose age equals the TTL is stale. An entry
    /// stamped in the future (clock skew) counts as age zero.
    pub fn is_fresh_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match (now - self.created_at).to_std() {
            Ok(age) => age < ttl,
            Err(_) => true,
        }
    }
}
