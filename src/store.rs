//! Cache Store
//!
//! The store is a plain map from key to a shared, reference-counted result.
//! It carries no ordering or ranking state of its own; that belongs to the
//! eviction policy driving it. Values are handed out as `Arc<V>` so a result
//! returned to a caller and the copy resident in the store share one
//! allocation.

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::sync::Arc;

#[cfg(feature = "hashbrown")]
pub(crate) use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
pub(crate) use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
pub(crate) use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
pub(crate) use std::collections::HashMap;

/// Mapping from key to shared result value.
///
/// All single-key operations are O(1) amortized. The store never evicts on
/// its own; it is bounded only by the policy that inserts into it.
///
/// # Examples
///
/// ```
/// use memo_cache::store::CacheStore;
/// use std::sync::Arc;
///
/// let mut store = CacheStore::new();
/// store.put("apple", Arc::new(1));
/// assert_eq!(store.get(&"apple").as_deref(), Some(&1));
/// assert_eq!(store.len(), 1);
/// ```
pub struct CacheStore<K, V> {
    map: HashMap<K, Arc<V>, DefaultHashBuilder>,
}

impl<K, V> CacheStore<K, V> {
    /// Creates an empty store.
    pub fn new() -> Self {
        CacheStore {
            map: HashMap::with_hasher(DefaultHashBuilder::default()),
        }
    }

    /// Returns the number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the store holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterates over the resident keys in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.map.keys()
    }
}

impl<K: Hash + Eq, V> CacheStore<K, V> {
    /// Returns the shared value stored under `key`.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).cloned()
    }

    /// Returns `true` if `key` is resident.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Stores `value` under `key`, returning the value it replaced.
    #[inline]
    pub fn put(&mut self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        self.map.insert(key, value)
    }

    /// Removes `key`, returning its value if it was resident.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.remove(key)
    }

    /// Hashes `key` with this store's hash builder.
    #[inline]
    pub fn fingerprint<Q>(&self, key: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.map.hasher().hash_one(key)
    }
}

impl<K, V> Default for CacheStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for CacheStore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheStore")
            .field("len", &self.map.len())
            .finish()
    }
}
