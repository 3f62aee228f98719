//! Request Cache Module
//!
//! Scoped storage for one inbound request: resolved stream URLs and captured
//! screenshot references, kept in two independent maps.

use std::collections::HashMap;

use crate::cache::UrlCacheEntry;

// == Request Cache ==
/// Per-request memo of stream URLs and screenshot file references.
///
/// Built when a request starts and dropped when it ends. The cache applies no
/// expiry policy; `get_url` hands back the raw entry with its timestamp.
#[derive(Debug, Default)]
pub struct RequestCache {
    /// camera id -> resolved stream URL
    urls: HashMap<String, UrlCacheEntry>,
    /// camera id -> screenshot file reference
    screenshots: HashMap<String, String>,
}

impl RequestCache {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // == URL Namespace ==
    /// Returns the stored URL entry for a camera, if any.
    pub fn get_url(&self, camera_id: &str) -> Option<&UrlCacheEntry> {
        self.urls.get(camera_id)
    }

    /// Stores a URL entry, replacing any prior one for the same camera.
    pub fn put_url(&mut self, camera_id: impl Into<String>, entry: UrlCacheEntry) {
        self.urls.insert(camera_id.into(), entry);
    }

    pub fn has_url(&self, camera_id: &str) -> bool {
        self.urls.contains_key(camera_id)
    }

    // == Screenshot Namespace ==
    /// Returns the stored screenshot reference for a camera, if any.
    pub fn get_screenshot(&self, camera_id: &str) -> Option<&str> {
        self.screenshots.get(camera_id).map(String::as_str)
    }

    /// Stores a screenshot reference, replacing any prior one.
    pub fn put_screenshot(&mut self, camera_id: impl Into<String>, file_reference: impl Into<String>) {
        self.screenshots.insert(camera_id.into(), file_reference.into());
    }

    pub fn has_screenshot(&self, camera_id: &str) -> bool {
        self.screenshots.contains_key(camera_id)
    }

    // == Sizes ==
    pub fn url_count(&self) -> usize {
        self.urls.len()
    }

    pub fn screenshot_count(&self) -> usize {
        self.screenshots.len()
    }

    /// Returns true if neither namespace holds anything.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty() && self.screenshots.is_empty()
    }
}
