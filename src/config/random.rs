//! Configuration for the random replacement (RR) policy.
//!
//! Victims are drawn uniformly from the resident keys. By default the random
//! source is seeded from OS entropy, which makes eviction order differ between
//! runs; set `seed` to make it reproducible.
//!
//! # Examples
//!
//! ```
//! use memo_cache::config::RandomPolicyConfig;
//! use memo_cache::policy::RandomPolicy;
//!
//! // Reproducible eviction order for tests and simulations
//! let config = RandomPolicyConfig { capacity: 64, seed: Some(42) };
//! let policy: RandomPolicy<u64> = RandomPolicy::init(config);
//! assert_eq!(policy.cap(), 64);
//!
//! // Entropy seeded
//! let config = RandomPolicyConfig { capacity: 64, seed: None };
//! let policy: RandomPolicy<u64> = RandomPolicy::init(config);
//! ```

use core::fmt;

/// Configuration for a random replacement eviction policy.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the store may hold.
/// - `seed`: Seed for the victim selector. `None` seeds from OS entropy.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RandomPolicyConfig {
    /// Maximum number of entries the store may hold.
    pub capacity: usize,
    /// Optional fixed seed for reproducible eviction order.
    pub seed: Option<u64>,
}

impl fmt::Debug for RandomPolicyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomPolicyConfig")
            .field("capacity", &self.capacity)
            .field("seed", &self.seed)
            .finish()
    }
}
