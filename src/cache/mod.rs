//! Cache Module
//!
//! Request-scoped memo storage for camera stream URLs and screenshots.

mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::UrlCacheEntry;
pub use stats::ScopeStats;
pub use store::RequestCache;

// == Public Constants ==
/// Default validity window of a resolved stream URL
pub const DEFAULT_URL_TTL_SECS: u64 = 4 * 60;
