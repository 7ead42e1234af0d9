//! First In, First Out (FIFO) Policy
//!
//! FIFO evicts results in the order they were first stored. Requests for a
//! resident result do not change its position, so a popular entry is evicted
//! just as early as one that was never requested again.
//!
//! # Performance Characteristics
//!
//! - Insert (hit or miss): O(1)
//! - Memory: one queued key per resident entry

use crate::config::FifoPolicyConfig;
use crate::policy::CachePolicy;
use crate::store::CacheStore;
use crate::trace::memo_trace;
use core::hash::Hash;
use std::collections::VecDeque;
use std::sync::Arc;

/// Evicts the oldest inserted key once the store is full.
///
/// # Examples
///
/// ```
/// use memo_cache::policy::{CachePolicy, FifoPolicy};
/// use memo_cache::store::CacheStore;
/// use std::sync::Arc;
///
/// let mut policy = FifoPolicy::new(2);
/// let mut store = CacheStore::new();
///
/// policy.insert(&mut store, "apple", Arc::new(1));
/// policy.insert(&mut store, "banana", Arc::new(2));
/// // A hit does not re-queue "apple"
/// policy.insert(&mut store, "apple", Arc::new(1));
/// policy.insert(&mut store, "cherry", Arc::new(3));
///
/// assert!(!store.contains(&"apple"));
/// assert!(store.contains(&"banana"));
/// assert!(store.contains(&"cherry"));
/// ```
#[derive(Debug)]
pub struct FifoPolicy<K> {
    config: FifoPolicyConfig,
    order: VecDeque<K>,
}

impl<K> FifoPolicy<K> {
    /// Creates a FIFO policy holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self::init(FifoPolicyConfig { capacity })
    }

    /// Creates a FIFO policy from a configuration.
    pub fn init(config: FifoPolicyConfig) -> Self {
        FifoPolicy {
            config,
            order: VecDeque::with_capacity(config.capacity.min(1024)),
        }
    }

    /// Returns the configured capacity.
    #[inline]
    pub fn cap(&self) -> usize {
        self.config.capacity
    }

    /// Keys in eviction order, next victim first.
    pub fn queue_order(&self) -> impl Iterator<Item = &K> + '_ {
        self.order.iter()
    }
}

impl<K: Hash + Eq + Clone, V> CachePolicy<K, V> for FifoPolicy<K> {
    fn insert(&mut self, store: &mut CacheStore<K, V>, key: K, value: Arc<V>) -> usize {
        if store.contains(&key) {
            store.put(key, value);
            return 0;
        }

        let mut evicted = 0;
        if store.len() >= self.config.capacity {
            if let Some(victim) = self.order.pop_front() {
                store.remove(&victim);
                evicted = 1;
                memo_trace!(
                    policy = "FIFO",
                    evicted = 1,
                    len = store.len(),
                    "evicted oldest entry"
                );
            }
        }

        self.order.push_back(key.clone());
        store.put(key, value);
        evicted
    }

    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.config.capacity)
    }
}
