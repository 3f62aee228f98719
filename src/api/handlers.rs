//! API Handlers
//!
//! HTTP request handlers. Each handler opens its own request scope (a fresh
//! cache and coordinator) and drops it on return.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::RequestCache;
use crate::collaborators::{
    HttpScreenshotCapturer, HttpStreamingUrlResolver, ScreenshotCapturer, StreamingUrlResolver,
};
use crate::config::Config;
use crate::coordinator::{CoordinatorSettings, ScreenshotCoordinator};
use crate::error::{Result, ServiceError};
use crate::models::{
    BatchScreenshotRequest, BatchScreenshotResponse, HealthResponse, ScreenshotResponse,
};

/// Application state shared across all handlers.
///
/// Holds only long-lived backend clients; nothing cached here outlives a
/// request.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn StreamingUrlResolver>,
    pub capturer: Arc<dyn ScreenshotCapturer>,
    pub settings: CoordinatorSettings,
}

impl AppState {
    /// Creates a new AppState with the given backends.
    pub fn new(
        resolver: Arc<dyn StreamingUrlResolver>,
        capturer: Arc<dyn ScreenshotCapturer>,
        settings: CoordinatorSettings,
    ) -> Self {
        Self {
            resolver,
            capturer,
            settings,
        }
    }

    /// Creates a new AppState from configuration, wiring the HTTP backends.
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = config.collaborator_timeout();
        let resolver = HttpStreamingUrlResolver::new(config.streaming_service_url.clone(), timeout)?;
        let capturer = HttpScreenshotCapturer::new(
            config.imaging_service_url.clone(),
            config.screenshot_dir.clone(),
            timeout,
        )?;

        Ok(Self::new(
            Arc::new(resolver),
            Arc::new(capturer),
            CoordinatorSettings::from_config(config),
        ))
    }

    /// Opens a new request scope.
    pub fn request_scope(&self) -> ScreenshotCoordinator {
        ScreenshotCoordinator::new(
            RequestCache::new(),
            self.resolver.clone(),
            self.capturer.clone(),
            self.settings,
        )
    }
}

/// Handler for GET /cameras/:camera_id/screenshot
pub async fn screenshot_handler(
    State(state): State<AppState>,
    Path(camera_id): Path<String>,
) -> Json<ScreenshotResponse> {
    let scope = state.request_scope();
    let file = scope.screenshot(&camera_id).await;

    Json(ScreenshotResponse::new(camera_id, file))
}

/// Handler for POST /screenshots
///
/// All ids share one request scope, so duplicates cost a single capture.
pub async fn batch_screenshot_handler(
    State(state): State<AppState>,
    Json(req): Json<BatchScreenshotRequest>,
) -> Result<Json<BatchScreenshotResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ServiceError::InvalidRequest(error_msg));
    }

    let scope = state.request_scope();
    let results = scope
        .screenshots(&req.camera_ids)
        .await
        .into_iter()
        .map(|(camera_id, file)| ScreenshotResponse::new(camera_id, file))
        .collect();

    Ok(Json(BatchScreenshotResponse::new(results, scope.stats().await)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
