//! Configuration for the clear-on-full policy.

use core::fmt;

/// Configuration for a policy that wipes the whole store once it is full.
///
/// Inserting a new result into a store holding `capacity` entries first
/// removes every entry. There is no per-key bookkeeping, so hits are free.
///
/// # Examples
///
/// ```
/// use memo_cache::config::ClearPolicyConfig;
/// use memo_cache::policy::ClearPolicy;
///
/// let policy = ClearPolicy::init(ClearPolicyConfig { capacity: 256 });
/// assert_eq!(policy.cap(), 256);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ClearPolicyConfig {
    /// Number of entries at which the store is wiped.
    pub capacity: usize,
}

impl fmt::Debug for ClearPolicyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClearPolicyConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_config_creation() {
        let config = ClearPolicyConfig { capacity: 2 };
        assert_eq!(config.capacity, 2);
    }
}
