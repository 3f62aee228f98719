//! Request DTOs for the screenshot API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Largest batch accepted by `POST /screenshots`
pub const MAX_BATCH_SIZE: usize = 64;

/// Request body for a batch of screenshots (POST /screenshots)
///
/// # Fields
/// - `camera_ids`: cameras to capture; repeats are allowed and share one capture
#[derive(Debug, Clone, Deserialize)]
pub struct BatchScreenshotRequest {
    pub camera_ids: Vec<String>,
}

impl BatchScreenshotRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.camera_ids.is_empty() {
            return Some("camera_ids cannot be empty".to_string());
        }
        if self.camera_ids.len() > MAX_BATCH_SIZE {
            return Some(format!(
                "camera_ids exceeds maximum batch size of {}",
                MAX_BATCH_SIZE
            ));
        }
        None
    }
}
