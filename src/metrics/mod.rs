//! Cache Metrics System
//!
//! Every memoized wrapper counts what happens to its calls and reports the
//! counters through the [`CacheMetrics`] trait as a `BTreeMap<String, f64>`.
//!
//! # Why BTreeMap over HashMap?
//!
//! BTreeMap keeps metric names in a fixed, sorted order:
//! - **Deterministic ordering**: Metrics always appear in consistent order
//! - **Reproducible output**: Two runs of a workload print identical reports
//! - **Stable serialization**: exported reports have predictable key ordering
//!
//! The performance difference is negligible with a dozen metric keys.

use std::collections::BTreeMap;
use std::string::{String, ToString};

/// Counters shared by every memoized wrapper.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of calls made through the wrapper
    pub requests: u64,

    /// Number of calls answered from the store
    pub cache_hits: u64,

    /// Number of computed results stored
    pub insertions: u64,

    /// Number of entries removed by the eviction policy
    pub evictions: u64,

    /// Number of calls whose computation returned an error
    pub failures: u64,
}

impl CoreCacheMetrics {
    /// Creates a zeroed set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a call answered from the store.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a call that had to run the computation.
    ///
    /// Cache misses are derived as `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a stored result and the evictions its insertion caused.
    pub fn record_insertion(&mut self, evicted: usize) {
        self.insertions += 1;
        self.evictions += evicted as u64;
    }

    /// Records a computation that failed and stored nothing.
    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    /// Number of calls that were not answered from the store.
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Calculates the cache hit rate
    ///
    /// # Returns
    /// A value between 0.0 and 1.0, or 0.0 if no requests have been made
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Calculates the cache miss rate
    ///
    /// # Returns
    /// A value between 0.0 and 1.0, or 0.0 if no requests have been made
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Evictions per request, or 0.0 if no requests have been made.
    pub fn eviction_rate(&self) -> f64 {
        if self.requests > 0 {
            self.evictions as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Convert core metrics to BTreeMap for reporting
    ///
    /// # Returns
    /// A BTreeMap containing all core metrics with consistent key ordering
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        // Basic counters
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("failures".to_string(), self.failures as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("requests".to_string(), self.requests as f64);

        // Calculated metrics
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);

        // Rates (0.0 to 1.0)
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());
        metrics.insert("eviction_rate".to_string(), self.eviction_rate());

        metrics
    }
}

/// Trait that all memoized wrappers implement for metrics reporting
///
/// The trait uses BTreeMap to ensure deterministic ordering of metrics, which
/// is essential for reproducible benchmarks and consistent test results.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order
    ///
    /// Besides the core counters the map carries `len` (resident entries) and,
    /// for bounded policies, `capacity`.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification
    ///
    /// # Returns
    /// The eviction policy's name, e.g. "LRU", "LFU" or "NONE"
    fn algorithm_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_metrics_rates_are_zero() {
        let metrics = CoreCacheMetrics::new();
        assert_eq!(metrics.hit_rate(), 0.0);
        assert_eq!(metrics.miss_rate(), 0.0);
        assert_eq!(metrics.eviction_rate(), 0.0);
    }

    #[test]
    fn test_metrics_counting() {
        let mut metrics = CoreCacheMetrics::new();
        metrics.record_miss();
        metrics.record_insertion(0);
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_miss();
        metrics.record_insertion(1);
        metrics.record_miss();
        metrics.record_failure();

        assert_eq!(metrics.requests, 5);
        assert_eq!(metrics.cache_hits, 2);
        assert_eq!(metrics.cache_misses(), 3);
        assert_eq!(metrics.insertions, 2);
        assert_eq!(metrics.evictions, 1);
        assert_eq!(metrics.failures, 1);
        assert!((metrics.hit_rate() - 0.4).abs() < f64::EPSILON);
        assert!((metrics.miss_rate() - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_btreemap_is_sorted_and_complete() {
        let mut metrics = CoreCacheMetrics::new();
        metrics.record_miss();
        metrics.record_insertion(2);
        let map = metrics.to_btreemap();
        let keys: std::vec::Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "cache_hits",
                "cache_misses",
                "eviction_rate",
                "evictions",
                "failures",
                "hit_rate",
                "insertions",
                "miss_rate",
                "requests",
            ]
        );
        assert_eq!(map["evictions"], 2.0);
        assert_eq!(map["eviction_rate"], 2.0);
    }
}
