#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! This section provides quick code examples and API references for each
//! part of the crate.
//!
//! ## Policy Selection Guide
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                    Which Eviction Policy Should I Use?                       │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │                                                                              │
//! │  Is the set of distinct arguments small and bounded?                         │
//! │        │                                                                     │
//! │       Yes ──▶ ┌──────────┐                                                   │
//! │        │      │ NoPolicy │                                                   │
//! │       No      └──────────┘                                                   │
//! │        ▼                                                                     │
//! │  ┌─────────────────┐                                                         │
//! │  │ Do results go   │──Yes──▶ ┌──────────┐                                    │
//! │  │ stale with time?│         │   TTL    │                                    │
//! │  └────────┬────────┘         └──────────┘                                    │
//! │          No                                                                  │
//! │           ▼                                                                  │
//! │  ┌─────────────────┐                                                         │
//! │  │ Recency-based?  │──Yes──▶ ┌──────────┐                                    │
//! │  │ (recent = hot)  │         │   LRU    │                                    │
//! │  └────────┬────────┘         └──────────┘                                    │
//! │          No                                                                  │
//! │           ▼                                                                  │
//! │  ┌─────────────────┐                                                         │
//! │  │ Frequency-based?│──Yes──▶ ┌──────────┐                                    │
//! │  │ (popular = hot) │         │   LFU    │                                    │
//! │  └────────┬────────┘         └──────────┘                                    │
//! │          No ──▶ FIFO, RR or CLEAR (cheapest bookkeeping)                     │
//! │                                                                              │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Reference
//!
//! | Policy | Description | Best Use Case |
//! |--------|-------------|---------------|
//! | [`NoPolicy`] | Keep everything | Small, bounded argument domains |
//! | [`FifoPolicy`](policy::FifoPolicy) | First In, First Out | Streams where old inputs never return |
//! | [`LruPolicy`](policy::LruPolicy) | Least Recently Used | General purpose, recency-based access |
//! | [`LfuPolicy`](policy::LfuPolicy) | Least Frequently Used | Stable popularity patterns |
//! | [`RandomPolicy`](policy::RandomPolicy) | Random replacement | Adversarial or unknown access patterns |
//! | [`TtlPolicy`](policy::TtlPolicy) | Time to live | Results that go stale |
//! | [`ClearPolicy`](policy::ClearPolicy) | Wipe when full | Phased workloads |
//!
//! ## Code Examples
//!
//! ### Unbounded memoization
//!
//! ```rust
//! use memo_cache::memoize;
//!
//! let slow_square = memoize(|n: u64| n * n);
//! assert_eq!(slow_square.call((9,)), 81);
//! assert!(slow_square.contains(&(9,)));
//! ```
//!
//! ### Bounded by a policy
//!
//! ```rust
//! use memo_cache::memoize_with;
//! use memo_cache::policy::LfuPolicy;
//!
//! fn fibonacci(n: u64) -> u64 {
//!     let (mut a, mut b) = (0, 1);
//!     for _ in 0..n {
//!         (a, b) = (b, a + b);
//!     }
//!     a
//! }
//!
//! let fib = memoize_with(fibonacci, LfuPolicy::new(4));
//! for n in [10, 11, 12, 13, 10, 12, 13, 14, 13] {
//!     fib.call((n,));
//! }
//! assert_eq!(fib.len(), 4);
//! assert!(!fib.contains(&(11,)));
//! ```
//!
//! ### Fallible functions
//!
//! ```rust
//! use memo_cache::try_memoize;
//!
//! let read_port = try_memoize(|raw: &'static str| raw.parse::<u16>());
//! assert_eq!(read_port.try_call(("8080",)), Ok(8080));
//! assert!(read_port.try_call(("http",)).is_err());
//! // Errors are never stored
//! assert_eq!(read_port.len(), 1);
//! ```
//!
//! ### Metrics
//!
//! ```rust
//! use memo_cache::metrics::CacheMetrics;
//! use memo_cache::memoize_with;
//! use memo_cache::policy::FifoPolicy;
//!
//! let double = memoize_with(|n: i32| n * 2, FifoPolicy::new(8));
//! double.call((1,));
//! double.call((1,));
//!
//! let metrics = double.metrics();
//! assert_eq!(double.algorithm_name(), "FIFO");
//! assert_eq!(metrics["cache_hits"], 1.0);
//! assert_eq!(metrics["hit_rate"], 0.5);
//! ```
//!
//! ## Thread Safety
//!
//! Every wrapper holds one [`parking_lot::Mutex`] around its store, policy
//! and counters. Share a wrapper between threads with `Arc`:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 Memoized                     │
//! │                                              │
//! │  thread 1 ─┐                                 │
//! │  thread 2 ─┼──▶ [Mutex] ──▶ store + policy   │
//! │  thread N ─┘                                 │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Diagnostics
//!
//! With the `tracing` feature enabled, hits, misses and failed computations
//! are emitted as `debug` events and evictions as `trace` events. Install any
//! `tracing` subscriber to see them.
//!
//! ## Modules
//!
//! - [`key`]: Composite keys built from argument tuples
//! - [`store`]: The key to shared result map
//! - [`policy`]: Eviction policies
//! - [`config`]: Configuration structures for all policies
//! - [`function`]: Tuple calling convention for functions and methods
//! - [`metrics`]: Metrics collection for memoized wrappers

#[cfg(test)]
extern crate scoped_threadpool;

/// Internal diagnostic macros.
///
/// Expand to `tracing` events when the `tracing` feature is enabled and to
/// nothing otherwise.
mod trace;

/// Composite keys.
///
/// Provides the argument-tuple key type and receiver identity for methods.
pub mod key;

/// Cache store.
///
/// Maps keys to shared, reference-counted results. Carries no eviction logic.
pub mod store;

/// Doubly linked list implementation with in-place editing capabilities.
///
/// Backs the recency and frequency orderings of the LRU and LFU policies.
///
/// **Note**: This module is internal infrastructure. It exposes unsafe raw
/// pointer operations that require careful invariant maintenance.
pub(crate) mod list;

/// Policy configuration structures.
///
/// Provides configuration structures for all eviction policies and runtime
/// policy selection.
pub mod config;

/// Eviction policies.
///
/// Provides the [`CachePolicy`](policy::CachePolicy) trait and its
/// implementations.
pub mod policy;

/// Function adaptors.
pub mod function;

/// Cache metrics system.
///
/// Provides counters and deterministic reporting for every memoized wrapper.
pub mod metrics;

mod memoize;

pub use memoize::{
    memoize, memoize_method, memoize_method_with, memoize_with, try_memoize, try_memoize_with,
    MethodKey, MethodMemoized, Memoized, TryMemoized,
};

pub use key::CompositeKey;
pub use policy::{BoxedPolicy, CachePolicy, NoPolicy};
