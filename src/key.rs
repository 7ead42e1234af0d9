//! Composite Cache Keys
//!
//! A memoized call is identified by the full, ordered list of its arguments.
//! [`CompositeKey`] wraps that argument tuple and derives structural equality
//! and hashing from it, so two calls share a cache slot exactly when every
//! positional argument compares equal.
//!
//! ```
//! use memo_cache::key::CompositeKey;
//!
//! let a = CompositeKey::encode(&(3_u32, "x"));
//! let b = CompositeKey::encode(&(3_u32, "x"));
//! let c = CompositeKey::encode(&("x", 3_u32));
//!
//! assert_eq!(a, b);
//! assert_eq!(a.arity(), 2);
//! assert_eq!(c.arity(), 2);
//! ```
//!
//! Methods are keyed on the receiver as well: the factory prepends a
//! [`ReceiverId`] to the argument tuple so memoization is per
//! `(receiver, arguments)` pair.

use core::fmt;
use core::hash::{BuildHasher, Hash};

/// An ordered, fixed-arity argument list usable as a cache key.
///
/// Implemented for tuples of up to eight elements whose members are all
/// `Clone + Hash + Eq`.
pub trait ArgList: Clone + Hash + Eq {
    /// Number of positional arguments in the list.
    const ARITY: usize;
}

macro_rules! impl_arg_list {
    ($arity:expr; $($ty:ident),*) => {
        impl<$($ty: Clone + Hash + Eq),*> ArgList for ($($ty,)*) {
            const ARITY: usize = $arity;
        }
    };
}

impl_arg_list!(0;);
impl_arg_list!(1; A1);
impl_arg_list!(2; A1, A2);
impl_arg_list!(3; A1, A2, A3);
impl_arg_list!(4; A1, A2, A3, A4);
impl_arg_list!(5; A1, A2, A3, A4, A5);
impl_arg_list!(6; A1, A2, A3, A4, A5, A6);
impl_arg_list!(7; A1, A2, A3, A4, A5, A6, A7);
impl_arg_list!(8; A1, A2, A3, A4, A5, A6, A7, A8);

/// The key under which one memoized result is stored.
///
/// Built from the argument tuple of a call. Equality and hashing are the
/// element-wise equality and hashing of the tuple.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey<A>(A);

impl<A: Clone> CompositeKey<A> {
    /// Builds a key from the arguments of a call.
    ///
    /// Encoding is total and deterministic: the same arguments always produce
    /// structurally identical keys.
    #[inline]
    pub fn encode(args: &A) -> Self {
        CompositeKey(args.clone())
    }
}

impl<A> CompositeKey<A> {
    /// Returns the argument tuple this key was built from.
    #[inline]
    pub fn args(&self) -> &A {
        &self.0
    }

    /// Consumes the key and returns its argument tuple.
    #[inline]
    pub fn into_args(self) -> A {
        self.0
    }
}

impl<A: ArgList> CompositeKey<A> {
    /// Number of positional arguments in the key.
    #[inline]
    pub fn arity(&self) -> usize {
        A::ARITY
    }
}

impl<A: Hash> CompositeKey<A> {
    /// Hashes the key with the given hash builder.
    ///
    /// Equal keys always produce equal fingerprints for the same builder.
    #[inline]
    pub fn fingerprint<S: BuildHasher>(&self, hash_builder: &S) -> u64 {
        hash_builder.hash_one(self)
    }
}

impl<A: fmt::Debug> fmt::Debug for CompositeKey<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompositeKey").field(&self.0).finish()
    }
}

/// Identity of a method receiver, used as the first element of method keys.
///
/// Identity is the receiver's address: two distinct objects never share an id
/// while both are alive, and the same object always maps to the same id.
/// [`MethodMemoized`](crate::MethodMemoized) borrows its receivers for as
/// long as it is in use, so an address can not be freed and reused while
/// results keyed on it are stored.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ReceiverId(usize);

impl ReceiverId {
    /// Returns the identity of `receiver`.
    #[inline]
    pub fn of<R: ?Sized>(receiver: &R) -> Self {
        ReceiverId(receiver as *const R as *const () as usize)
    }
}
