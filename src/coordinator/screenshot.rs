//! Screenshot Coordinator
//!
//! Owns one request's `RequestCache` and answers screenshot requests from it,
//! falling back to the streaming backend (stream URL) and the imaging service
//! (frame capture) only when the memo cannot answer.
//!
//! Only successes are memoized. A failed URL lookup or capture leaves the memo
//! untouched, so the next call in the same scope tries again, up to
//! `max_attempts_per_camera` failures per camera and backend.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::KeyLocks;
use crate::cache::{RequestCache, ScopeStats, UrlCacheEntry};
use crate::collaborators::{
    is_valid_camera_id, ScreenshotCapturer, StreamingUrlResolver, STREAM_PROTOCOL,
};
use crate::config::Config;
use crate::error::{Result, ServiceError};

// == Settings ==
/// Tuning knobs for a coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorSettings {
    /// How long a resolved stream URL stays usable
    pub url_ttl: Duration,
    /// Deadline for one backend call; exceeding it counts as "nothing usable"
    pub call_timeout: Duration,
    /// Failed attempts per camera and backend before giving up for the scope.
    /// Zero disables the cap.
    pub max_attempts_per_camera: u32,
}

impl CoordinatorSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            url_ttl: config.url_ttl(),
            call_timeout: config.collaborator_timeout(),
            max_attempts_per_camera: config.max_attempts_per_camera,
        }
    }
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Backend {
    Streaming,
    Imaging,
}

impl Backend {
    fn as_str(&self) -> &'static str {
        match self {
            Backend::Streaming => "streaming",
            Backend::Imaging => "imaging",
        }
    }
}

// == Scope State ==
#[derive(Debug, Default)]
struct ScopeState {
    cache: RequestCache,
    stats: ScopeStats,
    failures: HashMap<(Backend, String), u32>,
}

impl ScopeState {
    fn note_failure(&mut self, backend: Backend, camera_id: &str) {
        self.stats.record_failure();
        *self
            .failures
            .entry((backend, camera_id.to_string()))
            .or_insert(0) += 1;
    }

    fn exhausted(&self, backend: Backend, camera_id: &str, max_attempts: u32) -> bool {
        if max_attempts == 0 {
            return false;
        }
        self.failures
            .get(&(backend, camera_id.to_string()))
            .is_some_and(|count| *count >= max_attempts)
    }
}

// == Screenshot Coordinator ==
/// Request-scoped screenshot orchestration.
///
/// Build one per inbound request and drop it when the request is done; the
/// cache it owns goes with it.
pub struct ScreenshotCoordinator {
    state: Mutex<ScopeState>,
    resolver: Arc<dyn StreamingUrlResolver>,
    capturer: Arc<dyn ScreenshotCapturer>,
    settings: CoordinatorSettings,
    url_locks: KeyLocks,
    screenshot_locks: KeyLocks,
}

impl ScreenshotCoordinator {
    // == Constructor ==
    /// Creates a coordinator that takes ownership of `cache` for the scope.
    pub fn new(
        cache: RequestCache,
        resolver: Arc<dyn StreamingUrlResolver>,
        capturer: Arc<dyn ScreenshotCapturer>,
        settings: CoordinatorSettings,
    ) -> Self {
        Self {
            state: Mutex::new(ScopeState {
                cache,
                ..ScopeState::default()
            }),
            resolver,
            capturer,
            settings,
            url_locks: KeyLocks::new(),
            screenshot_locks: KeyLocks::new(),
        }
    }

    // == Screenshot ==
    /// Returns a screenshot file reference for the camera, or `None` if none
    /// could be produced.
    ///
    /// A memoized screenshot is returned without any backend call. Concurrent
    /// calls for the same camera wait for the first one and share its result.
    pub async fn screenshot(&self, camera_id: &str) -> Option<String> {
        if !is_valid_camera_id(camera_id) {
            debug!(camera_id = %camera_id, "Screenshot requested for invalid camera id");
            return None;
        }

        if let Some(file) = self.memoized_screenshot(camera_id).await {
            return Some(file);
        }

        let _key_guard = self.screenshot_locks.acquire(camera_id).await;

        // Another task may have captured while we waited.
        if let Some(file) = self.memoized_screenshot(camera_id).await {
            return Some(file);
        }

        {
            let mut state = self.state.lock().await;
            if state.exhausted(Backend::Imaging, camera_id, self.settings.max_attempts_per_camera) {
                debug!(camera_id = %camera_id, "Capture attempts exhausted for this request");
                state.stats.record_failure();
                return None;
            }
        }

        let url = self.get_valid_camera_url(camera_id).await?;
        self.state.lock().await.stats.record_capture_call();

        let captured = self
            .call_backend(
                Backend::Imaging,
                camera_id,
                self.capturer.capture_screenshot(camera_id, &url),
            )
            .await;

        let mut state = self.state.lock().await;
        match captured {
            Some(file) => {
                state.cache.put_screenshot(camera_id, file.clone());
                Some(file)
            }
            None => {
                state.note_failure(Backend::Imaging, camera_id);
                None
            }
        }
    }

    /// Screenshots for several cameras, e.g. every tile of a dashboard.
    ///
    /// Requests run concurrently inside this scope; repeated ids share one
    /// capture. Results keep the order of `camera_ids`.
    pub async fn screenshots<S: AsRef<str>>(&self, camera_ids: &[S]) -> Vec<(String, Option<String>)> {
        join_all(camera_ids.iter().map(|id| async move {
            let id = id.as_ref();
            (id.to_string(), self.screenshot(id).await)
        }))
        .await
    }

    // == Stream URL ==
    /// Returns a playable stream URL for the camera, or `None`.
    ///
    /// A memoized URL younger than the TTL is returned as is. A stale one is
    /// replaced by a fresh lookup; a failed lookup is not remembered.
    pub async fn get_valid_camera_url(&self, camera_id: &str) -> Option<String> {
        if !is_valid_camera_id(camera_id) {
            return None;
        }

        let _key_guard = self.url_locks.acquire(camera_id).await;

        {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;
            match state.cache.get_url(camera_id) {
                Some(entry) if entry.is_fresh_at(Utc::now(), self.settings.url_ttl) => {
                    debug!(camera_id = %camera_id, url = %entry.url, "Stream URL served from request cache");
                    let url = entry.url.clone();
                    state.stats.record_url_hit();
                    return Some(url);
                }
                Some(_) => {
                    debug!(camera_id = %camera_id, "Cached stream URL expired");
                    state.stats.record_url_expired();
                }
                None => state.stats.record_url_miss(),
            }

            if state.exhausted(Backend::Streaming, camera_id, self.settings.max_attempts_per_camera) {
                debug!(camera_id = %camera_id, "Stream URL attempts exhausted for this request");
                state.stats.record_failure();
                return None;
            }
            state.stats.record_resolver_call();
        }

        let resolved = self
            .call_backend(
                Backend::Streaming,
                camera_id,
                self.resolver.resolve_streaming_url(camera_id, STREAM_PROTOCOL),
            )
            .await;

        let mut state = self.state.lock().await;
        match resolved {
            Some(url) => {
                debug!(camera_id = %camera_id, url = %url, "Stream URL resolved");
                state
                    .cache
                    .put_url(camera_id, UrlCacheEntry::new(camera_id, url.clone()));
                Some(url)
            }
            None => {
                state.note_failure(Backend::Streaming, camera_id);
                None
            }
        }
    }

    // == Accessors ==
    /// Runs `f` against the scope's cache.
    pub async fn with_cache<R>(&self, f: impl FnOnce(&RequestCache) -> R) -> R {
        let state = self.state.lock().await;
        f(&state.cache)
    }

    /// Snapshot of this scope's counters.
    pub async fn stats(&self) -> ScopeStats {
        self.state.lock().await.stats.clone()
    }

    async fn memoized_screenshot(&self, camera_id: &str) -> Option<String> {
        let mut state = self.state.lock().await;
        let file = state.cache.get_screenshot(camera_id).map(str::to_string)?;
        state.stats.record_screenshot_hit();
        debug!(camera_id = %camera_id, file = %file, "Screenshot served from request cache");
        Some(file)
    }

    /// Awaits a backend call under the deadline, folding errors, timeouts and
    /// blank answers into `None`.
    async fn call_backend<F>(&self, backend: Backend, camera_id: &str, call: F) -> Option<String>
    where
        F: Future<Output = Result<Option<String>>>,
    {
        let outcome = match tokio::time::timeout(self.settings.call_timeout, call).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ServiceError::Timeout(self.settings.call_timeout.as_millis() as u64)),
        };

        match outcome {
            Ok(Some(value)) if !value.trim().is_empty() => Some(value),
            Ok(_) => {
                debug!(camera_id = %camera_id, backend = backend.as_str(), "Backend returned nothing usable");
                None
            }
            Err(e) => {
                warn!(camera_id = %camera_id, backend = backend.as_str(), error = %e, "Backend call failed");
                None
            }
        }
    }
}

impl Drop for ScreenshotCoordinator {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        debug!(
            urls = state.cache.url_count(),
            screenshots = state.cache.screenshot_count(),
            resolver_calls = state.stats.resolver_calls,
            capture_calls = state.stats.capture_calls,
            failures = state.stats.failures,
            "Request scope closed"
        );
    }
}
