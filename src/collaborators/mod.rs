//! Collaborators Module
//!
//! The two external capabilities the screenshot coordinator consumes, plus
//! their HTTP-backed implementations.

mod http;

use async_trait::async_trait;

use crate::error::Result;

#[cfg(test)]
use mockall::automock;

pub use http::{HttpScreenshotCapturer, HttpStreamingUrlResolver};

/// Transport protocol requested from the streaming backend
pub const STREAM_PROTOCOL: &str = "rtsp";

/// Longest camera id accepted
pub const MAX_CAMERA_ID_LENGTH: usize = 128;

/// Checks that a camera id is safe to embed in a file name.
///
/// Allowed: ASCII letters, digits, `-`, `_` and `.`, without `..`.
pub fn is_valid_camera_id(camera_id: &str) -> bool {
    !camera_id.is_empty()
        && camera_id.len() <= MAX_CAMERA_ID_LENGTH
        && !camera_id.contains("..")
        && camera_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}


/// Hands out playable stream URLs for cameras.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StreamingUrlResolver: Send + Sync {
    /// Returns a playable URL, or `None` when the backend has nothing usable.
    async fn resolve_streaming_url(&self, camera_id: &str, protocol: &str) -> Result<Option<String>>;
}

/// Grabs a still frame from a stream and stores it somewhere.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ScreenshotCapturer: Send + Sync {
    /// Returns a reference to the saved image, or `None` on capture failure.
    async fn capture_screenshot(&self, camera_id: &str, url: &str) -> Result<Option<String>>;
}
