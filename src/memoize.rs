//! Memoized Callables
//!
//! This module wraps a function so that each distinct argument list is
//! computed once and the result is served from a store afterwards, with an
//! eviction policy bounding how many results are kept.
//!
//! # How It Works
//!
//! ```text
//! call(args)
//!     │
//!     ▼
//! CompositeKey::encode(&args) ──▶ lock ──▶ store.get(&key)
//!                                            │
//!                          ┌─────── hit ─────┴───── miss ───────┐
//!                          ▼                                    ▼
//!        policy.insert(key, existing)              value = f(args)
//!                          │                   policy.insert(key, value)
//!                          └──────────────▶ unlock ◀────────────┘
//! ```
//!
//! The whole probe, compute and insert sequence runs under one
//! `parking_lot::Mutex` per wrapper. At most one computation runs per wrapper
//! at a time, and each key is computed at most once while it stays resident.
//! Separate wrappers share nothing.
//!
//! # Failure
//!
//! [`TryMemoized`] wraps functions returning `Result`. An `Err` is handed
//! back to the caller and nothing is stored, so the next call with the same
//! arguments runs the function again. A panic in the wrapped function unwinds
//! through the call with nothing stored; the mutex does not poison, so the
//! wrapper keeps working.
//!
//! # Reentrancy
//!
//! The lock is not reentrant. A wrapped function must not call back into the
//! wrapper that is running it.

use crate::function::{Function, Method};
use crate::key::{CompositeKey, ReceiverId};
use crate::metrics::{CacheMetrics, CoreCacheMetrics};
use crate::policy::{CachePolicy, NoPolicy};
use crate::store::CacheStore;
use crate::trace::memo_debug;
use core::convert::Infallible;
use core::fmt;
use core::hash::Hash;
use core::marker::PhantomData;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::string::{String, ToString};
use std::sync::Arc;

/// Store, policy and counters of one wrapper; always accessed under its lock.
struct MemoTable<K, V, P> {
    store: CacheStore<K, V>,
    policy: P,
    metrics: CoreCacheMetrics,
}

impl<K, V, P> MemoTable<K, V, P> {
    fn new(policy: P) -> Self {
        MemoTable {
            store: CacheStore::new(),
            policy,
            metrics: CoreCacheMetrics::new(),
        }
    }
}

impl<K, V, P> MemoTable<K, V, P>
where
    K: Hash + Eq + Clone,
    P: CachePolicy<K, V>,
{
    /// Returns the stored value for `key`, or runs `compute` and stores its
    /// `Ok` result. An `Err` leaves store and policy untouched.
    fn lookup_or_try_insert<E, C>(&mut self, key: K, compute: C) -> Result<Arc<V>, E>
    where
        C: FnOnce() -> Result<V, E>,
    {
        if let Some(existing) = self.store.get(&key) {
            self.metrics.record_hit();
            // Touch so ranking policies see the access
            let evicted = self.policy.insert(&mut self.store, key, Arc::clone(&existing));
            self.metrics.evictions += evicted as u64;
            memo_debug!(policy = self.policy.name(), len = self.store.len(), "cache hit");
            return Ok(existing);
        }

        self.metrics.record_miss();
        memo_debug!(policy = self.policy.name(), len = self.store.len(), "cache miss");

        match compute() {
            Ok(value) => {
                let value = Arc::new(value);
                let evicted = self.policy.insert(&mut self.store, key, Arc::clone(&value));
                self.metrics.record_insertion(evicted);
                Ok(value)
            }
            Err(err) => {
                self.metrics.record_failure();
                memo_debug!(
                    policy = self.policy.name(),
                    len = self.store.len(),
                    "computation failed"
                );
                Err(err)
            }
        }
    }

    fn report(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.metrics.to_btreemap();
        metrics.insert("len".to_string(), self.store.len() as f64);
        if let Some(capacity) = self.policy.capacity() {
            metrics.insert("capacity".to_string(), capacity as f64);
        }
        metrics
    }
}

fn into_ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// A memoized function of a tuple of arguments.
///
/// Created by [`memoize`] or [`memoize_with`].
///
/// # Examples
///
/// ```
/// use memo_cache::memoize_with;
/// use memo_cache::policy::LruPolicy;
///
/// let area = memoize_with(|w: u32, h: u32| w * h, LruPolicy::new(128));
///
/// assert_eq!(area.call((3, 4)), 12);
/// assert_eq!(area.call((3, 4)), 12); // served from the store
/// assert_eq!(area.len(), 1);
/// assert_eq!(area.policy_name(), "LRU");
/// ```
pub struct Memoized<A, V, F, P = NoPolicy> {
    func: F,
    table: Mutex<MemoTable<CompositeKey<A>, V, P>>,
}

impl<A, V, F, P> Memoized<A, V, F, P> {
    /// Wraps `func`, bounding its results with `policy`.
    pub fn new(func: F, policy: P) -> Self {
        Memoized {
            func,
            table: Mutex::new(MemoTable::new(policy)),
        }
    }

    /// Number of results currently stored.
    pub fn len(&self) -> usize {
        self.table.lock().store.len()
    }

    /// Returns `true` if no results are stored.
    pub fn is_empty(&self) -> bool {
        self.table.lock().store.is_empty()
    }

    /// Consumes the wrapper and returns the wrapped function.
    pub fn into_inner(self) -> F {
        self.func
    }
}

impl<A, V, F, P> Memoized<A, V, F, P>
where
    A: Clone + Hash + Eq,
    F: Function<A, Output = V>,
    P: CachePolicy<CompositeKey<A>, V>,
{
    /// Returns the result for `args`, computing it on the first call.
    ///
    /// The returned `Arc` aliases the stored value.
    pub fn call_shared(&self, args: A) -> Arc<V> {
        let key = CompositeKey::encode(&args);
        let mut table = self.table.lock();
        into_ok(table.lookup_or_try_insert(key, || Ok(Function::invoke(&self.func, args))))
    }

    /// Returns a clone of the result for `args`, computing it on the first call.
    pub fn call(&self, args: A) -> V
    where
        V: Clone,
    {
        V::clone(&self.call_shared(args))
    }
}

impl<A, V, F, P> Memoized<A, V, F, P>
where
    A: Clone + Hash + Eq,
    P: CachePolicy<CompositeKey<A>, V>,
{
    /// Returns `true` if a result for `args` is stored.
    ///
    /// This is a plain probe: it neither touches the policy nor counts as a
    /// request.
    pub fn contains(&self, args: &A) -> bool {
        self.table.lock().store.contains(&CompositeKey::encode(args))
    }

    /// Name of the eviction policy in use.
    pub fn policy_name(&self) -> &'static str {
        self.table.lock().policy.name()
    }
}

impl<A, V, F, P> CacheMetrics for Memoized<A, V, F, P>
where
    A: Clone + Hash + Eq,
    P: CachePolicy<CompositeKey<A>, V>,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.table.lock().report()
    }

    fn algorithm_name(&self) -> &'static str {
        self.policy_name()
    }
}

impl<A, V, F, P> fmt::Debug for Memoized<A, V, F, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Memoized");
        match self.table.try_lock() {
            Some(table) => debug.field("len", &table.store.len()),
            None => debug.field("len", &format_args!("<locked>")),
        };
        debug.finish_non_exhaustive()
    }
}

/// A memoized function that may fail.
///
/// Created by [`try_memoize`] or [`try_memoize_with`]. Only `Ok` results are
/// stored.
///
/// # Examples
///
/// ```
/// use memo_cache::try_memoize;
///
/// let parse = try_memoize(|text: String| text.parse::<u32>());
///
/// assert_eq!(parse.try_call((String::from("42"),)), Ok(42));
/// assert!(parse.try_call((String::from("forty-two"),)).is_err());
/// assert_eq!(parse.len(), 1);
/// ```
pub struct TryMemoized<A, V, F, P = NoPolicy> {
    func: F,
    table: Mutex<MemoTable<CompositeKey<A>, V, P>>,
}

impl<A, V, F, P> TryMemoized<A, V, F, P> {
    /// Wraps the fallible `func`, bounding its results with `policy`.
    pub fn new(func: F, policy: P) -> Self {
        TryMemoized {
            func,
            table: Mutex::new(MemoTable::new(policy)),
        }
    }

    /// Number of results currently stored.
    pub fn len(&self) -> usize {
        self.table.lock().store.len()
    }

    /// Returns `true` if no results are stored.
    pub fn is_empty(&self) -> bool {
        self.table.lock().store.is_empty()
    }

    /// Consumes the wrapper and returns the wrapped function.
    pub fn into_inner(self) -> F {
        self.func
    }
}

impl<A, V, F, P> TryMemoized<A, V, F, P>
where
    A: Clone + Hash + Eq,
    P: CachePolicy<CompositeKey<A>, V>,
{
    /// Returns the result for `args`, computing it if it is not stored.
    ///
    /// An error is returned unchanged and nothing is stored.
    pub fn try_call_shared<E>(&self, args: A) -> Result<Arc<V>, E>
    where
        F: Function<A, Output = Result<V, E>>,
    {
        let key = CompositeKey::encode(&args);
        let mut table = self.table.lock();
        table.lookup_or_try_insert(key, || Function::invoke(&self.func, args))
    }

    /// Like [`try_call_shared`](Self::try_call_shared), returning a clone.
    pub fn try_call<E>(&self, args: A) -> Result<V, E>
    where
        F: Function<A, Output = Result<V, E>>,
        V: Clone,
    {
        self.try_call_shared(args).map(|value| V::clone(&value))
    }

    /// Returns `true` if a result for `args` is stored.
    pub fn contains(&self, args: &A) -> bool {
        self.table.lock().store.contains(&CompositeKey::encode(args))
    }

    /// Name of the eviction policy in use.
    pub fn policy_name(&self) -> &'static str {
        self.table.lock().policy.name()
    }
}

impl<A, V, F, P> CacheMetrics for TryMemoized<A, V, F, P>
where
    A: Clone + Hash + Eq,
    P: CachePolicy<CompositeKey<A>, V>,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.table.lock().report()
    }

    fn algorithm_name(&self) -> &'static str {
        self.policy_name()
    }
}

impl<A, V, F, P> fmt::Debug for TryMemoized<A, V, F, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("TryMemoized");
        match self.table.try_lock() {
            Some(table) => debug.field("len", &table.store.len()),
            None => debug.field("len", &format_args!("<locked>")),
        };
        debug.finish_non_exhaustive()
    }
}

/// Key of a memoized method call: receiver identity, then the arguments.
pub type MethodKey<A> = CompositeKey<(ReceiverId, A)>;

/// A memoized method: results are stored per receiver and argument list.
///
/// Created by [`memoize_method`] or [`memoize_method_with`]. The receiver is
/// identified by its address, so two equal but distinct receivers get
/// separate results.
///
/// Receivers passed to [`call`](Self::call) must outlive the wrapper's use
/// (`'r`). A receiver can therefore not be freed while its results are still
/// reachable, and its address can not be reused by another receiver:
///
/// ```compile_fail
/// use memo_cache::memoize_method;
///
/// struct Scale {
///     k: u32,
/// }
///
/// let scaled = memoize_method(|s: &Scale, x: u32| s.k * x);
/// for k in 1..=3 {
///     let scale = Box::new(Scale { k });
///     scaled.call(&*scale, (10,));
/// }
/// ```
///
/// # Examples
///
/// ```
/// use memo_cache::memoize_method;
///
/// struct Grid {
///     width: usize,
/// }
///
/// let small = Grid { width: 4 };
/// let large = Grid { width: 100 };
/// let index = memoize_method(|grid: &Grid, x: usize, y: usize| y * grid.width + x);
///
/// assert_eq!(index.call(&small, (1, 2)), 9);
/// assert_eq!(index.call(&large, (1, 2)), 201);
/// assert_eq!(index.len(), 2);
/// ```
pub struct MethodMemoized<'r, R: ?Sized, A, V, F, P = NoPolicy> {
    func: F,
    table: Mutex<MemoTable<MethodKey<A>, V, P>>,
    _receiver: PhantomData<fn(&'r R)>,
}

impl<R: ?Sized, A, V, F, P> MethodMemoized<'_, R, A, V, F, P> {
    /// Wraps the method `func`, bounding its results with `policy`.
    pub fn new(func: F, policy: P) -> Self {
        MethodMemoized {
            func,
            table: Mutex::new(MemoTable::new(policy)),
            _receiver: PhantomData,
        }
    }

    /// Number of results currently stored, across all receivers.
    pub fn len(&self) -> usize {
        self.table.lock().store.len()
    }

    /// Returns `true` if no results are stored.
    pub fn is_empty(&self) -> bool {
        self.table.lock().store.is_empty()
    }

    /// Consumes the wrapper and returns the wrapped function.
    pub fn into_inner(self) -> F {
        self.func
    }
}

impl<'r, R, A, V, F, P> MethodMemoized<'r, R, A, V, F, P>
where
    R: ?Sized,
    A: Clone + Hash + Eq,
    F: Method<R, A, Output = V>,
    P: CachePolicy<MethodKey<A>, V>,
{
    /// Returns the result for `receiver` and `args`, computing it on the
    /// first call.
    pub fn call_shared(&self, receiver: &'r R, args: A) -> Arc<V> {
        let key = CompositeKey::encode(&(ReceiverId::of(receiver), args.clone()));
        let mut table = self.table.lock();
        into_ok(table.lookup_or_try_insert(key, || {
            Ok(Method::invoke(&self.func, receiver, args))
        }))
    }

    /// Returns a clone of the result for `receiver` and `args`.
    pub fn call(&self, receiver: &'r R, args: A) -> V
    where
        V: Clone,
    {
        V::clone(&self.call_shared(receiver, args))
    }
}

impl<R, A, V, F, P> MethodMemoized<'_, R, A, V, F, P>
where
    R: ?Sized,
    A: Clone + Hash + Eq,
    P: CachePolicy<MethodKey<A>, V>,
{
    /// Returns `true` if a result for `receiver` and `args` is stored.
    pub fn contains(&self, receiver: &R, args: &A) -> bool {
        let key = CompositeKey::encode(&(ReceiverId::of(receiver), args.clone()));
        self.table.lock().store.contains(&key)
    }

    /// Name of the eviction policy in use.
    pub fn policy_name(&self) -> &'static str {
        self.table.lock().policy.name()
    }
}

impl<R, A, V, F, P> CacheMetrics for MethodMemoized<'_, R, A, V, F, P>
where
    R: ?Sized,
    A: Clone + Hash + Eq,
    P: CachePolicy<MethodKey<A>, V>,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.table.lock().report()
    }

    fn algorithm_name(&self) -> &'static str {
        self.policy_name()
    }
}

impl<R: ?Sized, A, V, F, P> fmt::Debug for MethodMemoized<'_, R, A, V, F, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("MethodMemoized");
        match self.table.try_lock() {
            Some(table) => debug.field("len", &table.store.len()),
            None => debug.field("len", &format_args!("<locked>")),
        };
        debug.finish_non_exhaustive()
    }
}

/// Memoizes `func` without any eviction.
///
/// ```
/// use memo_cache::memoize;
///
/// let shout = memoize(|word: &'static str| word.to_uppercase());
/// assert_eq!(shout.call(("hello",)), "HELLO");
/// assert_eq!(shout.policy_name(), "NONE");
/// ```
pub fn memoize<A, V, F>(func: F) -> Memoized<A, V, F>
where
    A: Clone + Hash + Eq,
    F: Function<A, Output = V>,
{
    Memoized::new(func, NoPolicy)
}

/// Memoizes `func`, keeping results according to `policy`.
pub fn memoize_with<A, V, F, P>(func: F, policy: P) -> Memoized<A, V, F, P>
where
    A: Clone + Hash + Eq,
    F: Function<A, Output = V>,
    P: CachePolicy<CompositeKey<A>, V>,
{
    Memoized::new(func, policy)
}

/// Memoizes the fallible `func` without any eviction.
pub fn try_memoize<A, V, E, F>(func: F) -> TryMemoized<A, V, F>
where
    A: Clone + Hash + Eq,
    F: Function<A, Output = Result<V, E>>,
{
    TryMemoized::new(func, NoPolicy)
}

/// Memoizes the fallible `func`, keeping results according to `policy`.
pub fn try_memoize_with<A, V, E, F, P>(func: F, policy: P) -> TryMemoized<A, V, F, P>
where
    A: Clone + Hash + Eq,
    F: Function<A, Output = Result<V, E>>,
    P: CachePolicy<CompositeKey<A>, V>,
{
    TryMemoized::new(func, policy)
}

/// Memoizes the method `func` per receiver, without any eviction.
pub fn memoize_method<'r, R, A, V, F>(func: F) -> MethodMemoized<'r, R, A, V, F>
where
    R: ?Sized,
    A: Clone + Hash + Eq,
    F: Method<R, A, Output = V>,
{
    MethodMemoized::new(func, NoPolicy)
}

/// Memoizes the method `func` per receiver, keeping results according to
/// `policy`.
pub fn memoize_method_with<'r, R, A, V, F, P>(
    func: F,
    policy: P,
) -> MethodMemoized<'r, R, A, V, F, P>
where
    R: ?Sized,
    A: Clone + Hash + Eq,
    F: Method<R, A, Output = V>,
    P: CachePolicy<MethodKey<A>, V>,
{
    MethodMemoized::new(func, policy)
}
