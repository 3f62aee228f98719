//! Response DTOs for the screenshot API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::ScopeStats;

/// Outcome for one camera.
///
/// `file` is the empty string when no screenshot could be produced; that is a
/// normal answer, not an error.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenshotResponse {
    pub camera_id: String,
    pub file: String,
    pub available: bool,
}

impl ScreenshotResponse {
    /// Creates a ScreenshotResponse from a coordinator result
    pub fn new(camera_id: impl Into<String>, file: Option<String>) -> Self {
        Self {
            camera_id: camera_id.into(),
            available: file.is_some(),
            file: file.unwrap_or_default(),
        }
    }
}

/// Response body for POST /screenshots
#[derive(Debug, Clone, Serialize)]
pub struct BatchScreenshotResponse {
    /// One entry per requested id, in request order
    pub results: Vec<ScreenshotResponse>,
    /// What the request scope did to produce them
    pub stats: ScopeStats,
    /// Share of screenshot requests answered from the request cache
    pub screenshot_hit_rate: f64,
}

impl BatchScreenshotResponse {
    /// Creates a BatchScreenshotResponse, deriving the hit rate from `stats`
    pub fn new(results: Vec<ScreenshotResponse>, stats: ScopeStats) -> Self {
        Self {
            screenshot_hit_rate: stats.screenshot_hit_rate(),
            results,
            stats,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_screenshot_serialize() {
        let resp = ScreenshotResponse::new("cam01", Some("/tmp/cam01.jpg".to_string()));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["camera_id"], "cam01");
        assert_eq!(json["file"], "/tmp/cam01.jpg");
        assert_eq!(json["available"], true);
    }

    #[test]
    fn test_unavailable_screenshot_has_empty_file() {
        let resp = ScreenshotResponse::new("cam02", None);
        assert_eq!(resp.file, "");
        assert!(!resp.available);
    }

    #[test]
    fn test_batch_response_includes_stats() {
        let mut stats = ScopeStats::new();
        stats.record_capture_call();
        stats.record_screenshot_hit();
        let resp = BatchScreenshotResponse::new(vec![ScreenshotResponse::new("cam01", None)], stats);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["stats"]["resolver_calls"], 0);
        assert_eq!(json["results"][0]["camera_id"], "cam01");
        assert_eq!(json["screenshot_hit_rate"], 0.5);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
