//! Clear-on-full policy.

use crate::config::ClearPolicyConfig;
use crate::policy::CachePolicy;
use crate::store::CacheStore;
use crate::trace::memo_trace;
use core::hash::Hash;
use std::sync::Arc;

/// Wipes the whole store when a new key arrives and the store is full.
///
/// # Examples
///
/// ```
/// use memo_cache::policy::{CachePolicy, ClearPolicy};
/// use memo_cache::store::CacheStore;
/// use std::sync::Arc;
///
/// let mut policy = ClearPolicy::new(2);
/// let mut store = CacheStore::new();
///
/// policy.insert(&mut store, 1, Arc::new("one"));
/// policy.insert(&mut store, 2, Arc::new("two"));
/// assert_eq!(policy.insert(&mut store, 3, Arc::new("three")), 2);
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClearPolicy {
    config: ClearPolicyConfig,
}

impl ClearPolicy {
    /// Creates a clear-on-full policy.
    pub fn new(capacity: usize) -> Self {
        Self::init(ClearPolicyConfig { capacity })
    }

    /// Creates a clear-on-full policy from a configuration.
    pub fn init(config: ClearPolicyConfig) -> Self {
        ClearPolicy { config }
    }

    /// Returns the configured capacity.
    #[inline]
    pub fn cap(&self) -> usize {
        self.config.capacity
    }
}

impl<K: Hash + Eq, V> CachePolicy<K, V> for ClearPolicy {
    fn insert(&mut self, store: &mut CacheStore<K, V>, key: K, value: Arc<V>) -> usize {
        let mut evicted = 0;
        if !store.contains(&key) && store.len() >= self.config.capacity {
            evicted = store.len();
            store.clear();
            memo_trace!(policy = "CLEAR", evicted, len = store.len(), "cleared full store");
        }
        store.put(key, value);
        evicted
    }

    fn name(&self) -> &'static str {
        "CLEAR"
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.config.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_wipes_when_full() {
        let mut policy = ClearPolicy::new(3);
        let mut store = CacheStore::new();
        for i in 0..3 {
            assert_eq!(policy.insert(&mut store, i, Arc::new(i)), 0);
        }
        assert_eq!(policy.insert(&mut store, 3, Arc::new(3)), 3);
        assert_eq!(store.len(), 1);
        assert!(store.contains(&3));
    }

    #[test]
    fn test_clear_hit_keeps_store() {
        let mut policy = ClearPolicy::new(2);
        let mut store = CacheStore::new();
        policy.insert(&mut store, "a", Arc::new(1));
        policy.insert(&mut store, "b", Arc::new(2));
        assert_eq!(policy.insert(&mut store, "a", Arc::new(1)), 0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_clear_zero_capacity() {
        let mut policy = ClearPolicy::new(0);
        let mut store = CacheStore::new();
        assert_eq!(policy.insert(&mut store, 1, Arc::new(1)), 0);
        assert_eq!(policy.insert(&mut store, 2, Arc::new(2)), 1);
        assert_eq!(store.len(), 1);
    }
}
