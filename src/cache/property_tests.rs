//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the request cache against a plain map model and the
//! memoization guarantees of the coordinator built on top of it.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::cache::{RequestCache, UrlCacheEntry};
use crate::collaborators::{ScreenshotCapturer, StreamingUrlResolver};
use crate::coordinator::{CoordinatorSettings, ScreenshotCoordinator};
use crate::error::Result;

// == Strategies ==
/// Small id alphabet so sequences revisit the same cameras
fn camera_id_strategy() -> impl Strategy<Value = String> {
    "cam0[0-7]"
}

fn reference_strategy() -> impl Strategy<Value = String> {
    "/[a-z0-9/]{1,32}\\.jpg"
}

#[derive(Debug, Clone)]
enum CacheOp {
    PutUrl { id: String, url: String },
    PutScreenshot { id: String, file: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (camera_id_strategy(), "rtsp://[a-z0-9]{1,16}")
            .prop_map(|(id, url)| CacheOp::PutUrl { id, url }),
        (camera_id_strategy(), reference_strategy())
            .prop_map(|(id, file)| CacheOp::PutScreenshot { id, file }),
    ]
}

// == Stub Backends ==
struct CountingResolver {
    calls: AtomicUsize,
}

#[async_trait]
impl StreamingUrlResolver for CountingResolver {
    async fn resolve_streaming_url(&self, camera_id: &str, _protocol: &str) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(format!("rtsp://backend/{}", camera_id)))
    }
}

/// Succeeds on the first call per camera, fails on every later one.
struct OneShotCapturer {
    calls: AtomicUsize,
    seen: std::sync::Mutex<HashSet<String>>,
}

#[async_trait]
impl ScreenshotCapturer for OneShotCapturer {
    async fn capture_screenshot(&self, camera_id: &str, _url: &str) -> Result<Option<String>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let first = self
            .seen
            .lock()
            .map(|mut seen| seen.insert(camera_id.to_string()))
            .unwrap_or(false);
        Ok(first.then(|| format!("/data/camera/screenshot/{}-{}.jpg", camera_id, n)))
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // After any sequence of puts, each namespace holds exactly the last value
    // written per key, and the two namespaces never leak into each other.
    #[test]
    fn prop_last_write_wins_per_namespace(ops in prop::collection::vec(cache_op_strategy(), 1..40)) {
        let mut cache = RequestCache::new();
        let mut urls: HashMap<String, String> = HashMap::new();
        let mut files: HashMap<String, String> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::PutUrl { id, url } => {
                    cache.put_url(id.clone(), UrlCacheEntry::new(id.clone(), url.clone()));
                    urls.insert(id, url);
                }
                CacheOp::PutScreenshot { id, file } => {
                    cache.put_screenshot(id.clone(), file.clone());
                    files.insert(id, file);
                }
            }
        }

        prop_assert_eq!(cache.url_count(), urls.len());
        prop_assert_eq!(cache.screenshot_count(), files.len());

        for i in 0..8 {
            let id = format!("cam0{}", i);
            prop_assert_eq!(cache.has_url(&id), urls.contains_key(&id));
            prop_assert_eq!(cache.get_url(&id).map(|e| e.url.as_str()), urls.get(&id).map(String::as_str));
            prop_assert_eq!(cache.has_screenshot(&id), files.contains_key(&id));
            prop_assert_eq!(cache.get_screenshot(&id), files.get(&id).map(String::as_str));
        }
    }

    // However often a camera is asked for within one scope, the backends are
    // hit once per distinct camera and every answer for it is identical.
    #[test]
    fn prop_screenshot_is_idempotent_within_scope(ids in prop::collection::vec(camera_id_strategy(), 1..30)) {
        let resolver = Arc::new(CountingResolver { calls: AtomicUsize::new(0) });
        let capturer = Arc::new(OneShotCapturer {
            calls: AtomicUsize::new(0),
            seen: std::sync::Mutex::new(HashSet::new()),
        });
        let settings = CoordinatorSettings {
            url_ttl: Duration::from_secs(240),
            call_timeout: Duration::from_secs(5),
            max_attempts_per_camera: 3,
        };
        let coordinator = ScreenshotCoordinator::new(
            RequestCache::new(),
            resolver.clone(),
            capturer.clone(),
            settings,
        );

        let mut first_answer: HashMap<String, String> = HashMap::new();
        for id in &ids {
            let file = tokio_test::block_on(coordinator.screenshot(id));
            prop_assert!(file.is_some());
            let file = file.unwrap_or_default();
            let expected = first_answer.entry(id.clone()).or_insert_with(|| file.clone());
            prop_assert_eq!(&file, &*expected);
        }

        let distinct: HashSet<&String> = ids.iter().collect();
        prop_assert_eq!(resolver.calls.load(Ordering::SeqCst), distinct.len());
        prop_assert_eq!(capturer.calls.load(Ordering::SeqCst), distinct.len());
    }
}
