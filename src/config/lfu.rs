//! Configuration for the Least Frequently Used (LFU) policy.

use core::fmt;

/// Configuration for an LFU (Least Frequently Used) eviction policy.
///
/// LFU counts how often each memoized result is requested and evicts the one
/// with the lowest count. Among equally frequent results the one requested
/// least recently goes first.
///
/// # Examples
///
/// ```
/// use memo_cache::config::LfuPolicyConfig;
/// use memo_cache::policy::LfuPolicy;
///
/// let config = LfuPolicyConfig { capacity: 4 };
/// let policy: LfuPolicy<(u32,)> = LfuPolicy::init(config);
/// assert_eq!(policy.cap(), 4);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LfuPolicyConfig {
    /// Maximum number of entries the store may hold.
    pub capacity: usize,
}

impl fmt::Debug for LfuPolicyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuPolicyConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
