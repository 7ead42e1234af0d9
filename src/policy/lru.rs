//! Least Recently Used (LRU) Policy
//!
//! This module provides an LRU eviction policy with O(1) bookkeeping for both
//! hits and misses. LRU is the usual choice for memoization workloads with
//! temporal locality: arguments requested recently are likely to be
//! requested again soon.
//!
//! # Algorithm
//!
//! The policy keeps resident keys in a doubly linked recency list, most
//! recently requested at the front, plus a `key -> node` index. A hit moves
//! the key's node to the front. A miss on a full store evicts the key at the
//! back of the list.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - Hit: O(1)
//!   - Miss: O(1)
//!
//! - **Space Complexity**:
//!   - O(n) where n is the number of resident entries
//!   - Two copies of each key (list node and index) plus two pointers
//!
//! # Thread Safety
//!
//! The policy is not synchronized on its own. The memoized wrapper serializes
//! access to it with its mutex.

use crate::config::LruPolicyConfig;
use crate::list::{Entry, List};
use crate::policy::CachePolicy;
use crate::store::{CacheStore, DefaultHashBuilder, HashMap};
use crate::trace::memo_trace;
use core::fmt;
use core::hash::Hash;
use std::sync::Arc;

/// Evicts the least recently requested key once the store is full.
///
/// # Safety
///
/// The `index` map holds raw pointers into `list`. They stay valid as long
/// as:
/// - the pointer was returned by `list.push_front()`
/// - the node has not been removed from the list
/// - the policy has not been dropped
///
/// # Examples
///
/// ```
/// use memo_cache::policy::{CachePolicy, LruPolicy};
/// use memo_cache::store::CacheStore;
/// use std::sync::Arc;
///
/// let mut policy = LruPolicy::new(2);
/// let mut store = CacheStore::new();
///
/// policy.insert(&mut store, "apple", Arc::new(1));
/// policy.insert(&mut store, "banana", Arc::new(2));
/// // Requesting "apple" again makes "banana" the least recent
/// policy.insert(&mut store, "apple", Arc::new(1));
/// policy.insert(&mut store, "cherry", Arc::new(3));
///
/// assert!(store.contains(&"apple"));
/// assert!(!store.contains(&"banana"));
/// assert!(store.contains(&"cherry"));
/// ```
pub struct LruPolicy<K> {
    config: LruPolicyConfig,
    list: List<K>,
    index: HashMap<K, *mut Entry<K>, DefaultHashBuilder>,
}

// SAFETY: LruPolicy owns all data and raw pointers point only to nodes owned by `list`.
// Concurrent access is safe when wrapped in proper synchronization primitives.
unsafe impl<K: Send> Send for LruPolicy<K> {}

// SAFETY: All mutation requires &mut self; shared references cannot cause data races.
unsafe impl<K: Sync> Sync for LruPolicy<K> {}

impl<K> LruPolicy<K> {
    /// Creates an LRU policy holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self::init(LruPolicyConfig { capacity })
    }

    /// Creates an LRU policy from a configuration.
    pub fn init(config: LruPolicyConfig) -> Self {
        let map_capacity = config.capacity.min(1024).next_power_of_two();
        LruPolicy {
            config,
            list: List::new(),
            index: HashMap::with_capacity_and_hasher(map_capacity, DefaultHashBuilder::default()),
        }
    }

    /// Returns the configured capacity.
    #[inline]
    pub fn cap(&self) -> usize {
        self.config.capacity
    }

    /// Keys ordered from most to least recently requested.
    pub fn recency_order(&self) -> impl Iterator<Item = &K> + '_ {
        self.list.iter()
    }
}

impl<K: Hash + Eq + Clone> LruPolicy<K> {
    fn evict<V>(&mut self, store: &mut CacheStore<K, V>) -> usize {
        match self.list.pop_back() {
            Some(victim) => {
                self.index.remove(&victim);
                store.remove(&victim);
                memo_trace!(
                    policy = "LRU",
                    evicted = 1,
                    len = store.len(),
                    "evicted least recent entry"
                );
                1
            }
            None => 0,
        }
    }
}

impl<K: Hash + Eq + Clone, V> CachePolicy<K, V> for LruPolicy<K> {
    fn insert(&mut self, store: &mut CacheStore<K, V>, key: K, value: Arc<V>) -> usize {
        if let Some(&node) = self.index.get(&key) {
            unsafe {
                // SAFETY: node comes from our index
                self.list.move_to_front(node);
            }
            store.put(key, value);
            return 0;
        }

        let evicted = if store.len() >= self.config.capacity {
            self.evict(store)
        } else {
            0
        };

        let node = self.list.push_front(key.clone());
        self.index.insert(key.clone(), node);
        store.put(key, value);
        evicted
    }

    fn name(&self) -> &'static str {
        "LRU"
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.config.capacity)
    }
}

impl<K> fmt::Debug for LruPolicy<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruPolicy")
            .field("capacity", &self.config.capacity)
            .field("len", &self.list.len())
            .finish()
    }
}
