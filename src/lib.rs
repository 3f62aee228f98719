//! camshot - Request-scoped camera screenshot cache
//!
//! Memoizes camera stream URLs (with a TTL) and screenshot captures for the
//! lifetime of one inbound request, so the streaming and imaging backends are
//! called as little as possible.

pub mod api;
pub mod cache;
pub mod collaborators;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{RequestCache, UrlCacheEntry};
pub use config::Config;
pub use coordinator::{CoordinatorSettings, ScreenshotCoordinator};
