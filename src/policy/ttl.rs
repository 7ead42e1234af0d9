//! Time To Live (TTL) Policy
//!
//! TTL bounds how old a memoized result may get rather than how many results
//! are kept. Every insert, hit or miss, stores the value and stamps its key
//! with the current time, then sweeps out all other entries whose age exceeds
//! the TTL.
//!
//! Expiry is lazy: between inserts an expired entry is still served. Because
//! hits re-stamp, an entry expires once it has gone a full TTL without being
//! requested.

use crate::config::TtlPolicyConfig;
use crate::policy::CachePolicy;
use crate::store::{CacheStore, DefaultHashBuilder, HashMap};
use crate::trace::memo_trace;
use core::fmt;
use core::hash::Hash;
use core::time::Duration;
use std::sync::Arc;
use std::time::Instant;
use std::vec::Vec;

/// Evicts every entry older than the configured time to live.
///
/// # Examples
///
/// ```
/// use memo_cache::policy::{CachePolicy, TtlPolicy};
/// use memo_cache::store::CacheStore;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let mut policy = TtlPolicy::new(Duration::from_secs(60));
/// let mut store = CacheStore::new();
///
/// policy.insert(&mut store, "report", Arc::new(1));
/// assert!(store.contains(&"report"));
/// assert_eq!(CachePolicy::<&str, i32>::capacity(&policy), None);
/// ```
pub struct TtlPolicy<K> {
    config: TtlPolicyConfig,
    inserted_at: HashMap<K, Instant, DefaultHashBuilder>,
}

impl<K> TtlPolicy<K> {
    /// Creates a TTL policy.
    pub fn new(ttl: Duration) -> Self {
        Self::init(TtlPolicyConfig { ttl })
    }

    /// Creates a TTL policy from a configuration.
    pub fn init(config: TtlPolicyConfig) -> Self {
        TtlPolicy {
            config,
            inserted_at: HashMap::with_hasher(DefaultHashBuilder::default()),
        }
    }

    /// Returns the configured time to live.
    #[inline]
    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }
}

impl<K: Hash + Eq + Clone> TtlPolicy<K> {
    /// Time since `key` was last stored or touched, if it is tracked.
    pub fn age(&self, key: &K) -> Option<Duration> {
        self.inserted_at.get(key).map(Instant::elapsed)
    }

    /// Removes every entry older than the TTL as of `now`.
    fn sweep<V>(&mut self, store: &mut CacheStore<K, V>, now: Instant) -> usize {
        let ttl = self.config.ttl;
        let expired: Vec<K> = self
            .inserted_at
            .iter()
            .filter(|&(_, &stamp)| now.saturating_duration_since(stamp) > ttl)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.inserted_at.remove(key);
            store.remove(key);
        }
        if !expired.is_empty() {
            memo_trace!(
                policy = "TTL",
                evicted = expired.len(),
                len = store.len(),
                "swept expired entries"
            );
        }
        expired.len()
    }
}

impl<K: Hash + Eq + Clone, V> CachePolicy<K, V> for TtlPolicy<K> {
    fn insert(&mut self, store: &mut CacheStore<K, V>, key: K, value: Arc<V>) -> usize {
        let now = Instant::now();
        self.inserted_at.insert(key.clone(), now);
        store.put(key, value);
        // The key just stamped has age zero and survives the sweep
        self.sweep(store, now)
    }

    fn name(&self) -> &'static str {
        "TTL"
    }

    fn capacity(&self) -> Option<usize> {
        None
    }
}

impl<K> fmt::Debug for TtlPolicy<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlPolicy")
            .field("ttl", &self.config.ttl)
            .field("len", &self.inserted_at.len())
            .finish()
    }
}
