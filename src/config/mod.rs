//! Policy Configuration Module
//!
//! This module provides configuration structures for every eviction policy.
//! Each policy has its own dedicated configuration struct with public fields.
//!
//! # Design Philosophy
//!
//! Configuration structs have all public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: All parameters must be provided at construction
//! - **No boilerplate**: No constructors or builder methods needed
//!
//! Capacities are plain `usize` values. Zero is a legal capacity: it produces
//! maximal eviction pressure rather than an error.
//!
//! # Policy Configs
//!
//! | Config | Policy | Description |
//! |--------|--------|-------------|
//! | `FifoPolicyConfig` | [`FifoPolicy`](crate::policy::FifoPolicy) | First In, First Out |
//! | `LruPolicyConfig` | [`LruPolicy`](crate::policy::LruPolicy) | Least Recently Used |
//! | `LfuPolicyConfig` | [`LfuPolicy`](crate::policy::LfuPolicy) | Least Frequently Used |
//! | `RandomPolicyConfig` | [`RandomPolicy`](crate::policy::RandomPolicy) | Random replacement |
//! | `TtlPolicyConfig` | [`TtlPolicy`](crate::policy::TtlPolicy) | Time to live |
//! | `ClearPolicyConfig` | [`ClearPolicy`](crate::policy::ClearPolicy) | Wipe when full |
//!
//! # Runtime Selection
//!
//! [`PolicyConfig`] wraps any of the above so the policy can be chosen at
//! runtime, e.g. from application settings:
//!
//! ```
//! use memo_cache::config::{LfuPolicyConfig, PolicyConfig};
//! use memo_cache::key::CompositeKey;
//! use memo_cache::memoize_with;
//! use memo_cache::policy::BoxedPolicy;
//!
//! let config = PolicyConfig::Lfu(LfuPolicyConfig { capacity: 4 });
//! let policy: BoxedPolicy<CompositeKey<(u64,)>, u64> = config.build();
//! let square = memoize_with(|n: u64| n * n, policy);
//! assert_eq!(square.call((12,)), 144);
//! ```

pub mod clear;
pub mod fifo;
pub mod lfu;
pub mod lru;
pub mod random;
pub mod ttl;

pub use clear::ClearPolicyConfig;
pub use fifo::FifoPolicyConfig;
pub use lfu::LfuPolicyConfig;
pub use lru::LruPolicyConfig;
pub use random::RandomPolicyConfig;
pub use ttl::TtlPolicyConfig;

use crate::policy::{
    BoxedPolicy, ClearPolicy, FifoPolicy, LfuPolicy, LruPolicy, NoPolicy, RandomPolicy, TtlPolicy,
};
use core::hash::Hash;

/// Any policy configuration, for choosing the eviction policy at runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PolicyConfig {
    /// No eviction; the store grows without limit.
    #[default]
    Unbounded,
    /// First In, First Out.
    Fifo(FifoPolicyConfig),
    /// Least Recently Used.
    Lru(LruPolicyConfig),
    /// Least Frequently Used.
    Lfu(LfuPolicyConfig),
    /// Random replacement.
    Random(RandomPolicyConfig),
    /// Time to live.
    Ttl(TtlPolicyConfig),
    /// Wipe the store when full.
    Clear(ClearPolicyConfig),
}

impl PolicyConfig {
    /// Builds the configured policy behind a trait object.
    pub fn build<K, V>(self) -> BoxedPolicy<K, V>
    where
        K: Hash + Eq + Clone + Send + 'static,
    {
        match self {
            PolicyConfig::Unbounded => Box::new(NoPolicy),
            PolicyConfig::Fifo(config) => Box::new(FifoPolicy::<K>::init(config)),
            PolicyConfig::Lru(config) => Box::new(LruPolicy::<K>::init(config)),
            PolicyConfig::Lfu(config) => Box::new(LfuPolicy::<K>::init(config)),
            PolicyConfig::Random(config) => Box::new(RandomPolicy::<K>::init(config)),
            PolicyConfig::Ttl(config) => Box::new(TtlPolicy::<K>::init(config)),
            PolicyConfig::Clear(config) => Box::new(ClearPolicy::init(config)),
        }
    }
}
