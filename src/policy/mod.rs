//! Eviction Policies
//!
//! A policy decides what stays in a memoization store and what is evicted as
//! the store grows. Every policy exposes the same single capability,
//! [`CachePolicy::insert`], which the memoized wrapper calls after every
//! successful call:
//!
//! - on a **miss** with the freshly computed value, and
//! - on a **hit** with the value already resident, so ranking policies can
//!   record the access ("touch") without replacing the value.
//!
//! A policy owns all of its ranking state; the store itself is an unordered
//! map. Bounded policies evict at most one entry per insert, and only when the
//! inserted key is not already resident.
//!
//! # Available Policies
//!
//! | Type | Name | Victim |
//! |------|------|--------|
//! | [`NoPolicy`] | `NONE` | never evicts |
//! | [`FifoPolicy`] | `FIFO` | oldest inserted key |
//! | [`LruPolicy`] | `LRU` | least recently requested key |
//! | [`LfuPolicy`] | `LFU` | least frequently requested key, oldest touch on ties |
//! | [`RandomPolicy`] | `RR` | uniformly random resident key |
//! | [`TtlPolicy`] | `TTL` | every entry not requested within the TTL, swept on each insert |
//! | [`ClearPolicy`] | `CLEAR` | the whole store |
//!
//! # Capacity Zero
//!
//! A capacity of zero is accepted. Each miss then evicts the previously
//! resident entry before storing the new one, so the store never holds more
//! than the latest result.

use crate::store::CacheStore;
use std::sync::Arc;

mod clear;
mod fifo;
mod lfu;
mod lru;
mod random;
mod ttl;

pub use self::clear::ClearPolicy;
pub use self::fifo::FifoPolicy;
pub use self::lfu::LfuPolicy;
pub use self::lru::LruPolicy;
pub use self::random::{RandomPolicy, RoundRobinPolicy};
pub use self::ttl::TtlPolicy;

/// The single capability shared by every eviction policy.
///
/// `K` is the key type of the store and `V` the (unshared) value type; the
/// store holds `Arc<V>`.
pub trait CachePolicy<K, V> {
    /// Records `key -> value` in `store`, evicting other entries if needed.
    ///
    /// Afterwards `store.get(&key)` returns `value`. Bounded policies leave
    /// `store.len() <= max(capacity, 1)`.
    ///
    /// Returns the number of entries evicted by this call.
    fn insert(&mut self, store: &mut CacheStore<K, V>, key: K, value: Arc<V>) -> usize;

    /// Short algorithm name used for metrics and diagnostics.
    fn name(&self) -> &'static str;

    /// Maximum number of entries, or `None` if the policy has no count bound.
    fn capacity(&self) -> Option<usize>;
}

/// A policy chosen at runtime, see [`PolicyConfig`](crate::config::PolicyConfig).
pub type BoxedPolicy<K, V> = Box<dyn CachePolicy<K, V> + Send>;

impl<K, V, P> CachePolicy<K, V> for Box<P>
where
    P: CachePolicy<K, V> + ?Sized,
{
    #[inline]
    fn insert(&mut self, store: &mut CacheStore<K, V>, key: K, value: Arc<V>) -> usize {
        (**self).insert(store, key, value)
    }

    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }

    #[inline]
    fn capacity(&self) -> Option<usize> {
        (**self).capacity()
    }
}

/// Unbounded policy: every result is kept forever.
///
/// This is the default policy of [`memoize`](crate::memoize).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoPolicy;

impl<K: core::hash::Hash + Eq, V> CachePolicy<K, V> for NoPolicy {
    #[inline]
    fn insert(&mut self, store: &mut CacheStore<K, V>, key: K, value: Arc<V>) -> usize {
        store.put(key, value);
        0
    }

    fn name(&self) -> &'static str {
        "NONE"
    }

    fn capacity(&self) -> Option<usize> {
        None
    }
}
