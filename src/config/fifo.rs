//! Configuration for the First In, First Out (FIFO) policy.
//!
//! FIFO bounds the cache by entry count and evicts in insertion order. Hits do
//! not change an entry's position, so `capacity` is the only knob.
//!
//! # Examples
//!
//! ```
//! use memo_cache::config::FifoPolicyConfig;
//! use memo_cache::policy::FifoPolicy;
//!
//! let config = FifoPolicyConfig { capacity: 128 };
//! let policy: FifoPolicy<u64> = FifoPolicy::init(config);
//! assert_eq!(policy.cap(), 128);
//! ```

use core::fmt;

/// Configuration for a FIFO eviction policy.
///
/// # Fields
///
/// - `capacity`: Maximum number of memoized results kept. Zero is allowed and
///   keeps only the most recent result.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FifoPolicyConfig {
    /// Maximum number of entries the store may hold.
    pub capacity: usize,
}

impl fmt::Debug for FifoPolicyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FifoPolicyConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
