//! Least Frequently Used (LFU) Policy
//!
//! The LFU policy counts how many times each memoized result has been
//! requested and evicts the result with the lowest count when room is needed.
//! This protects expensive results that are requested over and over from
//! being pushed out by one-off calls.
//!
//! Keys are grouped into per-frequency lists. Within one frequency, keys are
//! ordered by when they entered it, so ties at the minimum frequency are
//! broken in favour of evicting the key that was inserted or touched longest
//! ago.

use crate::config::LfuPolicyConfig;
use crate::list::{Entry, List};
use crate::policy::CachePolicy;
use crate::store::{CacheStore, DefaultHashBuilder, HashMap};
use crate::trace::memo_trace;
use core::fmt;
use core::hash::Hash;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Type alias for the frequency metadata stored in the index
type FrequencyMetadata<K> = (usize, *mut Entry<K>);

/// Evicts the least frequently requested key once the store is full.
///
/// # Safety
///
/// The `index` map holds raw pointers into the `buckets` lists. A pointer is
/// valid as long as its node has not been removed from every list and the
/// policy has not been dropped. Moving a node between buckets keeps its
/// address.
///
/// # Examples
///
/// ```
/// use memo_cache::policy::{CachePolicy, LfuPolicy};
/// use memo_cache::store::CacheStore;
/// use std::sync::Arc;
///
/// let mut policy = LfuPolicy::new(2);
/// let mut store = CacheStore::new();
///
/// policy.insert(&mut store, "a", Arc::new(1));
/// policy.insert(&mut store, "b", Arc::new(2));
/// policy.insert(&mut store, "a", Arc::new(1)); // "a" now has frequency 2
/// policy.insert(&mut store, "c", Arc::new(3)); // evicts "b"
///
/// assert_eq!(policy.frequency(&"a"), Some(2));
/// assert_eq!(policy.frequency(&"b"), None);
/// assert!(store.contains(&"c"));
/// ```
pub struct LfuPolicy<K> {
    config: LfuPolicyConfig,

    /// Map from keys to their frequency and list node
    index: HashMap<K, FrequencyMetadata<K>, DefaultHashBuilder>,

    /// Map from frequency to the keys at that frequency, newest at the front.
    /// Empty lists are removed, so the first bucket is always the minimum.
    buckets: BTreeMap<usize, List<K>>,
}

// SAFETY: LfuPolicy owns all data and raw pointers point only to nodes owned by
// `buckets`. Concurrent access is safe when wrapped in proper synchronization primitives.
unsafe impl<K: Send> Send for LfuPolicy<K> {}

// SAFETY: All mutation requires &mut self; shared references cannot cause data races.
unsafe impl<K: Sync> Sync for LfuPolicy<K> {}

impl<K> LfuPolicy<K> {
    /// Creates an LFU policy holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self::init(LfuPolicyConfig { capacity })
    }

    /// Creates an LFU policy from a configuration.
    pub fn init(config: LfuPolicyConfig) -> Self {
        let map_capacity = config.capacity.min(1024).next_power_of_two();
        LfuPolicy {
            config,
            index: HashMap::with_capacity_and_hasher(map_capacity, DefaultHashBuilder::default()),
            buckets: BTreeMap::new(),
        }
    }

    /// Returns the configured capacity.
    #[inline]
    pub fn cap(&self) -> usize {
        self.config.capacity
    }

    /// Lowest request count among resident keys.
    pub fn min_frequency(&self) -> Option<usize> {
        self.buckets.keys().next().copied()
    }
}

impl<K: Hash + Eq + Clone> LfuPolicy<K> {
    /// Number of times `key` has been inserted or touched while resident.
    pub fn frequency(&self, key: &K) -> Option<usize> {
        self.index.get(key).map(|&(frequency, _)| frequency)
    }

    /// Moves a resident key to the next frequency bucket.
    fn touch(&mut self, key: &K) {
        let Some(meta) = self.index.get_mut(key) else {
            return;
        };
        let (old_frequency, node) = *meta;
        let new_frequency = old_frequency + 1;

        if let Some(bucket) = self.buckets.get_mut(&old_frequency) {
            unsafe {
                // SAFETY: node comes from our index and lives in the old bucket
                bucket.unlink(node);
            }
            if bucket.is_empty() {
                self.buckets.remove(&old_frequency);
            }
        }

        let bucket = self.buckets.entry(new_frequency).or_insert_with(List::new);
        unsafe {
            // SAFETY: node was unlinked above and is not in any list
            bucket.link_front(node);
        }
        meta.0 = new_frequency;
    }

    /// Evicts the oldest key at the minimum frequency.
    fn evict<V>(&mut self, store: &mut CacheStore<K, V>) -> usize {
        let Some(mut bucket) = self.buckets.first_entry() else {
            return 0;
        };
        let victim = bucket.get_mut().pop_back();
        if bucket.get().is_empty() {
            bucket.remove();
        }
        match victim {
            Some(victim) => {
                self.index.remove(&victim);
                store.remove(&victim);
                memo_trace!(
                    policy = "LFU",
                    evicted = 1,
                    len = store.len(),
                    "evicted least frequent entry"
                );
                1
            }
            None => 0,
        }
    }
}

impl<K: Hash + Eq + Clone, V> CachePolicy<K, V> for LfuPolicy<K> {
    fn insert(&mut self, store: &mut CacheStore<K, V>, key: K, value: Arc<V>) -> usize {
        if self.index.contains_key(&key) {
            self.touch(&key);
            store.put(key, value);
            return 0;
        }

        let evicted = if store.len() >= self.config.capacity {
            self.evict(store)
        } else {
            0
        };

        let node = self
            .buckets
            .entry(1)
            .or_insert_with(List::new)
            .push_front(key.clone());
        self.index.insert(key.clone(), (1, node));
        store.put(key, value);
        evicted
    }

    fn name(&self) -> &'static str {
        "LFU"
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.config.capacity)
    }
}

impl<K> fmt::Debug for LfuPolicy<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuPolicy")
            .field("capacity", &self.config.capacity)
            .field("len", &self.index.len())
            .field("min_frequency", &self.min_frequency())
            .finish()
    }
}
