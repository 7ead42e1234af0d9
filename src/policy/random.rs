//! Random Replacement (RR) Policy
//!
//! When the store is full, RR evicts a resident key chosen uniformly at
//! random. It keeps no ranking state beyond a dense key array, which makes it
//! a cheap baseline that cannot be driven into pathological eviction by an
//! adversarial access pattern.
//!
//! The selector is seeded from OS entropy unless a seed is configured.

use crate::config::RandomPolicyConfig;
use crate::policy::CachePolicy;
use crate::store::{CacheStore, DefaultHashBuilder, HashMap};
use crate::trace::memo_trace;
use core::fmt;
use core::hash::Hash;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::vec::Vec;

/// Evicts a uniformly random resident key once the store is full.
///
/// # Examples
///
/// ```
/// use memo_cache::policy::{CachePolicy, RandomPolicy};
/// use memo_cache::store::CacheStore;
/// use std::sync::Arc;
///
/// let mut policy = RandomPolicy::with_seed(3, 42);
/// let mut store = CacheStore::new();
///
/// for i in 0..10 {
///     policy.insert(&mut store, i, Arc::new(i * i));
/// }
///
/// assert_eq!(store.len(), 3);
/// assert!(store.contains(&9));
/// ```
pub struct RandomPolicy<K> {
    config: RandomPolicyConfig,
    /// Resident keys in arbitrary order
    keys: Vec<K>,
    /// Position of each resident key in `keys`
    positions: HashMap<K, usize, DefaultHashBuilder>,
    rng: StdRng,
}

/// The "round robin" name some callers know this policy by.
pub type RoundRobinPolicy<K> = RandomPolicy<K>;

impl<K> RandomPolicy<K> {
    /// Creates a random replacement policy seeded from OS entropy.
    pub fn new(capacity: usize) -> Self {
        Self::init(RandomPolicyConfig {
            capacity,
            seed: None,
        })
    }

    /// Creates a random replacement policy with a fixed seed.
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        Self::init(RandomPolicyConfig {
            capacity,
            seed: Some(seed),
        })
    }

    /// Creates a random replacement policy from a configuration.
    pub fn init(config: RandomPolicyConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let map_capacity = config.capacity.min(1024);
        RandomPolicy {
            config,
            keys: Vec::with_capacity(map_capacity),
            positions: HashMap::with_capacity_and_hasher(
                map_capacity,
                DefaultHashBuilder::default(),
            ),
            rng,
        }
    }

    /// Returns the configured capacity.
    #[inline]
    pub fn cap(&self) -> usize {
        self.config.capacity
    }

    /// Number of keys the policy is tracking.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if no keys are tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K: Hash + Eq + Clone> RandomPolicy<K> {
    fn evict<V>(&mut self, store: &mut CacheStore<K, V>) -> usize {
        if self.keys.is_empty() {
            return 0;
        }
        let slot = self.rng.gen_range(0..self.keys.len());
        let victim = self.keys.swap_remove(slot);
        self.positions.remove(&victim);
        if let Some(moved) = self.keys.get(slot) {
            if let Some(position) = self.positions.get_mut(moved) {
                *position = slot;
            }
        }
        store.remove(&victim);
        memo_trace!(
            policy = "RR",
            evicted = 1,
            len = store.len(),
            slot,
            "evicted random entry"
        );
        1
    }
}

impl<K: Hash + Eq + Clone, V> CachePolicy<K, V> for RandomPolicy<K> {
    fn insert(&mut self, store: &mut CacheStore<K, V>, key: K, value: Arc<V>) -> usize {
        if self.positions.contains_key(&key) {
            store.put(key, value);
            return 0;
        }

        let evicted = if store.len() >= self.config.capacity {
            self.evict(store)
        } else {
            0
        };

        self.positions.insert(key.clone(), self.keys.len());
        self.keys.push(key.clone());
        store.put(key, value);
        evicted
    }

    fn name(&self) -> &'static str {
        "RR"
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.config.capacity)
    }
}

impl<K> fmt::Debug for RandomPolicy<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomPolicy")
            .field("capacity", &self.config.capacity)
            .field("seed", &self.config.seed)
            .field("len", &self.keys.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bounds_store() {
        let mut policy = RandomPolicy::new(4);
        let mut store = CacheStore::new();
        for i in 0..100 {
            policy.insert(&mut store, i, Arc::new(i));
            assert!(store.len() <= 4);
            assert_eq!(policy.len(), store.len());
        }
        // The latest key is always resident
        assert!(store.contains(&99));
    }

    #[test]
    fn test_random_positions_track_keys() {
        let mut policy = RandomPolicy::with_seed(5, 7);
        let mut store = CacheStore::new();
        for i in 0..50 {
            policy.insert(&mut store, i % 11, Arc::new(i));
            for (slot, key) in policy.keys.iter().enumerate() {
                assert_eq!(policy.positions.get(key), Some(&slot));
                assert!(store.contains(key));
            }
        }
    }

    #[test]
    fn test_random_same_seed_same_victims() {
        let run = |seed| {
            let mut policy = RandomPolicy::with_seed(3, seed);
            let mut store = CacheStore::new();
            for i in 0..20 {
                policy.insert(&mut store, i, Arc::new(i));
            }
            let mut resident: Vec<_> = store.keys().copied().collect();
            resident.sort_unstable();
            resident
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn test_random_hit_does_not_evict() {
        let mut policy = RandomPolicy::with_seed(2, 1);
        let mut store = CacheStore::new();
        policy.insert(&mut store, "a", Arc::new(1));
        policy.insert(&mut store, "b", Arc::new(2));
        for _ in 0..10 {
            assert_eq!(policy.insert(&mut store, "a", Arc::new(1)), 0);
        }
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_random_zero_capacity() {
        let mut policy = RoundRobinPolicy::with_seed(0, 9);
        let mut store = CacheStore::new();
        assert_eq!(policy.insert(&mut store, 1, Arc::new(1)), 0);
        assert_eq!(policy.insert(&mut store, 2, Arc::new(2)), 1);
        assert_eq!(store.len(), 1);
        assert!(store.contains(&2));
    }
}
