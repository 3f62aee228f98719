//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::time::Duration;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Endpoint that hands out playable stream URLs for a camera
    pub streaming_service_url: String,
    /// Base URL of the imaging service exposing `/screenshot`
    pub imaging_service_url: String,
    /// Directory the imaging service writes captured frames into
    pub screenshot_dir: String,
    /// Validity window of a resolved stream URL, in seconds
    pub url_ttl: u64,
    /// Deadline for a single backend call, in seconds
    pub collaborator_timeout: u64,
    /// Failed attempts allowed per camera and backend within one request
    pub max_attempts_per_camera: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STREAMING_SERVICE_URL` - stream URL endpoint
    /// - `IMAGING_SERVICE_URL` - imaging service base URL
    /// - `SCREENSHOT_DIR` - capture directory (default: /data/camera/screenshot)
    /// - `URL_TTL_SECS` - stream URL TTL in seconds (default: 240)
    /// - `COLLABORATOR_TIMEOUT_SECS` - backend call deadline (default: 10)
    /// - `MAX_ATTEMPTS_PER_CAMERA` - failed attempts per request (default: 3)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            streaming_service_url: env::var("STREAMING_SERVICE_URL")
                .unwrap_or(defaults.streaming_service_url),
            imaging_service_url: env::var("IMAGING_SERVICE_URL")
                .unwrap_or(defaults.imaging_service_url),
            screenshot_dir: env::var("SCREENSHOT_DIR").unwrap_or(defaults.screenshot_dir),
            url_ttl: parse_var("URL_TTL_SECS").unwrap_or(defaults.url_ttl),
            collaborator_timeout: parse_var("COLLABORATOR_TIMEOUT_SECS")
                .unwrap_or(defaults.collaborator_timeout),
            max_attempts_per_camera: parse_var("MAX_ATTEMPTS_PER_CAMERA")
                .unwrap_or(defaults.max_attempts_per_camera),
        }
    }

    /// Stream URL TTL as a `Duration`.
    pub fn url_ttl(&self) -> Duration {
        Duration::from_secs(self.url_ttl)
    }

    /// Backend call deadline as a `Duration`.
    pub fn collaborator_timeout(&self) -> Duration {
        Duration::from_secs(self.collaborator_timeout)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            streaming_service_url: "http://127.0.0.1:8081/api/video/streaming-url".to_string(),
            imaging_service_url: "http://127.0.0.1:8082".to_string(),
            screenshot_dir: "/data/camera/screenshot".to_string(),
            url_ttl: crate::cache::DEFAULT_URL_TTL_SECS,
            collaborator_timeout: 10,
            max_attempts_per_camera: 3,
        }
    }
}
