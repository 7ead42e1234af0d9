//! Configuration for the Least Recently Used (LRU) policy.
//!
//! # Examples
//!
//! ```
//! use memo_cache::config::LruPolicyConfig;
//! use memo_cache::policy::LruPolicy;
//!
//! // Keep the 1000 most recently requested results
//! let config = LruPolicyConfig { capacity: 1000 };
//! let policy: LruPolicy<String> = LruPolicy::init(config);
//! assert_eq!(policy.cap(), 1000);
//! ```

use core::fmt;

/// Configuration for an LRU (Least Recently Used) eviction policy.
///
/// LRU evicts the result that was requested least recently when the store is
/// full and a new result must be admitted.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruPolicyConfig {
    /// Maximum number of entries the store may hold.
    pub capacity: usize,
}

impl fmt::Debug for LruPolicyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruPolicyConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
