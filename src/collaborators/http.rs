//! HTTP Collaborators
//!
//! reqwest-backed clients for the streaming backend (stream URL lookup) and
//! the imaging service (frame capture).

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{is_valid_camera_id, ScreenshotCapturer, StreamingUrlResolver};
use crate::error::Result;

// == Streaming URL Resolver ==

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StreamingUrlRequest<'a> {
    camera_index_code: &'a str,
    protocol: &'a str,
}

#[derive(Debug, Deserialize)]
struct StreamingUrlResponse {
    #[serde(default)]
    data: Option<String>,
}

/// Looks up stream URLs by POSTing the camera id to the streaming backend.
#[derive(Debug, Clone)]
pub struct HttpStreamingUrlResolver {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpStreamingUrlResolver {
    /// Creates a resolver posting to `endpoint`, with a per-call deadline.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl StreamingUrlResolver for HttpStreamingUrlResolver {
    async fn resolve_streaming_url(&self, camera_id: &str, protocol: &str) -> Result<Option<String>> {
        let request = StreamingUrlRequest {
            camera_index_code: camera_id,
            protocol,
        };

        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(camera_id = %camera_id, status = %status, "Streaming backend rejected URL lookup");
            return Ok(None);
        }

        match response.json::<StreamingUrlResponse>().await {
            Ok(body) => Ok(body.data.filter(|url| !url.trim().is_empty())),
            Err(e) => {
                debug!(camera_id = %camera_id, error = %e, "Unreadable streaming backend response");
                Ok(None)
            }
        }
    }
}

// == Screenshot Capturer ==

/// Asks the imaging service to grab a frame and write it under `screenshot_dir`.
#[derive(Debug, Clone)]
pub struct HttpScreenshotCapturer {
    client: reqwest::Client,
    base_url: String,
    screenshot_dir: String,
}

impl HttpScreenshotCapturer {
    pub fn new(
        base_url: impl Into<String>,
        screenshot_dir: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            screenshot_dir: screenshot_dir.into(),
        })
    }

    /// File the imaging service is told to write: `<dir>/<camera>-<yyyyMMddHHmmss>.jpg`.
    pub fn file_reference(&self, camera_id: &str, at: DateTime<Utc>) -> String {
        format!(
            "{}/{}-{}.jpg",
            self.screenshot_dir.trim_end_matches('/'),
            camera_id,
            at.format("%Y%m%d%H%M%S")
        )
    }
}

#[async_trait]
impl ScreenshotCapturer for HttpScreenshotCapturer {
    async fn capture_screenshot(&self, camera_id: &str, url: &str) -> Result<Option<String>> {
        if !is_valid_camera_id(camera_id) {
            warn!(camera_id = %camera_id, "Refusing capture for unsafe camera id");
            return Ok(None);
        }

        let file = self.file_reference(camera_id, Utc::now());
        let endpoint = format!("{}/screenshot", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&endpoint)
            .query(&[("name", file.as_str()), ("url", url)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(camera_id = %camera_id, status = %status, "Imaging service refused capture");
            return Ok(None);
        }

        // Any JSON body means the frame was written.
        match response.json::<serde_json::Value>().await {
            Ok(_) => {
                debug!(camera_id = %camera_id, file = %file, "Screenshot captured");
                Ok(Some(file))
            }
            Err(e) => {
                debug!(camera_id = %camera_id, url = %url, error = %e, "Screenshot capture failed");
                Ok(None)
            }
        }
    }
}
