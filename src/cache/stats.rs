//! Scope Statistics Module
//!
//! Tracks what one request scope did: memo hits, expirations, and how often
//! the external backends were actually called.

use serde::Serialize;

// == Scope Stats ==
/// Counters for a single request scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScopeStats {
    /// Stream URLs served from the memo
    pub url_hits: u64,
    /// Stream URL lookups with no memo entry
    pub url_misses: u64,
    /// Stream URL lookups that found a stale entry
    pub url_expired: u64,
    /// Screenshots served from the memo
    pub screenshot_hits: u64,
    /// Calls made to the streaming URL backend
    pub resolver_calls: u64,
    /// Calls made to the imaging backend
    pub capture_calls: u64,
    /// Attempts that ended unavailable (empty, error, timeout or capped)
    pub failures: u64,
}

impl ScopeStats {
    // == Constructor ==
    /// Creates a new ScopeStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Fraction of screenshot requests answered without touching a backend.
    ///
    /// Returns 0.0 if nothing was requested yet.
    pub fn screenshot_hit_rate(&self) -> f64 {
        let total = self.screenshot_hits + self.capture_calls;
        if total == 0 {
            0.0
        } else {
            self.screenshot_hits as f64 / total as f64
        }
    }

    pub fn record_url_hit(&mut self) {
        self.url_hits += 1;
    }

    pub fn record_url_miss(&mut self) {
        self.url_misses += 1;
    }

    pub fn record_url_expired(&mut self) {
        self.url_expired += 1;
    }

    pub fn record_screenshot_hit(&mut self) {
        self.screenshot_hits += 1;
    }

    pub fn record_resolver_call(&mut self) {
        self.resolver_calls += 1;
    }

    pub fn record_capture_call(&mut self) {
        self.capture_calls += 1;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = ScopeStats::new();
        assert_eq!(stats, ScopeStats::default());
        assert_eq!(stats.resolver_calls, 0);
        assert_eq!(stats.capture_calls, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        assert_eq!(ScopeStats::new().screenshot_hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = ScopeStats::new();
        stats.record_capture_call();
        stats.record_screenshot_hit();
        stats.record_screenshot_hit();
        stats.record_screenshot_hit();
        assert_eq!(stats.screenshot_hit_rate(), 0.75);
    }

    #[test]
    fn test_counters() {
        let mut stats = ScopeStats::new();
        stats.record_url_miss();
        stats.record_resolver_call();
        stats.record_url_hit();
        stats.record_url_expired();
        stats.record_failure();

        assert_eq!(stats.url_misses, 1);
        assert_eq!(stats.resolver_calls, 1);
        assert_eq!(stats.url_hits, 1);
        assert_eq!(stats.url_expired, 1);
        assert_eq!(stats.failures, 1);
    }
}
