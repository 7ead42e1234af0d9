//! Memoized Wrapper Tests
//!
//! End-to-end behavior of the memoized wrappers: results equal the wrapped
//! function's on both hit and miss paths, failures are never stored, and
//! separate wrappers never share state.

use memo_cache::config::{LfuPolicyConfig, PolicyConfig};
use memo_cache::metrics::CacheMetrics;
use memo_cache::policy::{LfuPolicy, LruPolicy};
use memo_cache::{
    memoize, memoize_method, memoize_method_with, memoize_with, try_memoize, try_memoize_with,
    BoxedPolicy, CompositeKey,
};
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

fn fibonacci(n: u64) -> u64 {
    let (mut a, mut b) = (0_u64, 1_u64);
    for _ in 0..n {
        (a, b) = (b, a + b);
    }
    a
}

// ============================================================================
// END-TO-END
// ============================================================================

#[test]
fn test_fibonacci_with_lfu() {
    let calls = Cell::new(0);
    let fib = memoize_with(
        |n: u64| {
            calls.set(calls.get() + 1);
            fibonacci(n)
        },
        LfuPolicy::new(4),
    );

    let inputs = [10, 11, 12, 13, 10, 12, 13, 14, 13];
    let expected = [55, 89, 144, 233, 55, 144, 233, 377, 233];
    let expected_hits = [false, false, false, false, true, true, true, false, true];

    for ((n, want), hit) in inputs.into_iter().zip(expected).zip(expected_hits) {
        let before = calls.get();
        assert_eq!(fib.call((n,)), want, "fib({n})");
        assert_eq!(calls.get() == before, hit, "hit/miss for fib({n})");
    }

    assert_eq!(calls.get(), 5);
    assert_eq!(fib.len(), 4);
    // 11 was the only result left at frequency one when 14 arrived
    assert!(!fib.contains(&(11,)));
    for n in [10, 12, 13, 14] {
        assert!(fib.contains(&(n,)));
    }

    let metrics = fib.metrics();
    assert_eq!(metrics["requests"], 9.0);
    assert_eq!(metrics["cache_hits"], 4.0);
    assert_eq!(metrics["evictions"], 1.0);
    assert_eq!(fib.algorithm_name(), "LFU");
}

#[test]
fn test_runtime_selected_policy() {
    let config = PolicyConfig::Lfu(LfuPolicyConfig { capacity: 4 });
    let policy: BoxedPolicy<CompositeKey<(u64,)>, u64> = config.build();
    let fib = memoize_with(fibonacci, policy);
    for n in [10, 11, 12, 13, 10, 12, 13, 14, 13] {
        assert_eq!(fib.call((n,)), fibonacci(n));
    }
    assert!(!fib.contains(&(11,)));
    assert_eq!(fib.policy_name(), "LFU");
}

// ============================================================================
// KEYING
// ============================================================================

#[test]
fn test_argument_order_matters() {
    let calls = Cell::new(0);
    let minus = memoize(|a: i32, b: i32| {
        calls.set(calls.get() + 1);
        a - b
    });
    assert_eq!(minus.call((5, 3)), 2);
    assert_eq!(minus.call((3, 5)), -2);
    assert_eq!(minus.call((5, 3)), 2);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_zero_argument_function() {
    let calls = Cell::new(0);
    let config = memoize(|| {
        calls.set(calls.get() + 1);
        String::from("loaded")
    });
    assert_eq!(config.call(()), "loaded");
    assert_eq!(config.call(()), "loaded");
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_owned_string_arguments() {
    let greet = memoize(|name: String, excited: bool| {
        if excited {
            format!("Hello, {name}!")
        } else {
            format!("Hello, {name}.")
        }
    });
    assert_eq!(greet.call((String::from("Ada"), true)), "Hello, Ada!");
    assert_eq!(greet.call((String::from("Ada"), false)), "Hello, Ada.");
    assert_eq!(greet.len(), 2);
}

#[test]
fn test_shared_values_alias() {
    let table = memoize(|n: usize| (0..n).collect::<Vec<_>>());
    let first = table.call_shared((1000,));
    let second = table.call_shared((1000,));
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.len(), 1000);
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn test_failure_is_not_stored() {
    let calls = Cell::new(0);
    let checked_div = try_memoize(|a: u32, b: u32| {
        calls.set(calls.get() + 1);
        a.checked_div(b).ok_or("division by zero")
    });

    assert_eq!(checked_div.try_call((10, 0)), Err("division by zero"));
    assert_eq!(checked_div.try_call((10, 0)), Err("division by zero"));
    assert_eq!(calls.get(), 2, "each failing call re-invokes the function");
    assert!(checked_div.is_empty());

    assert_eq!(checked_div.try_call((10, 2)), Ok(5));
    assert_eq!(checked_div.try_call((10, 2)), Ok(5));
    assert_eq!(calls.get(), 3);

    let metrics = checked_div.metrics();
    assert_eq!(metrics["failures"], 2.0);
    assert_eq!(metrics["insertions"], 1.0);
}

#[test]
fn test_failure_leaves_policy_untouched() {
    let outcome = Cell::new(true);
    let fetch = try_memoize_with(
        |n: u8| if outcome.get() { Ok(n) } else { Err(n) },
        LruPolicy::new(2),
    );
    fetch.try_call((1,)).unwrap();
    fetch.try_call((2,)).unwrap();

    outcome.set(false);
    assert_eq!(fetch.try_call((3,)), Err(3));
    // A failed miss must not evict anything
    assert!(fetch.contains(&(1,)));
    assert!(fetch.contains(&(2,)));
    assert_eq!(fetch.len(), 2);
}

#[test]
fn test_panic_stores_nothing() {
    let calls = Cell::new(0);
    let memo = memoize(|n: u32| {
        calls.set(calls.get() + 1);
        assert!(n != 13, "unlucky");
        n
    });

    let result = panic::catch_unwind(AssertUnwindSafe(|| memo.call((13,))));
    assert!(result.is_err());
    assert!(!memo.contains(&(13,)));

    // The lock is released and the wrapper keeps working
    assert_eq!(memo.call((12,)), 12);
    let result = panic::catch_unwind(AssertUnwindSafe(|| memo.call((13,))));
    assert!(result.is_err());
    assert_eq!(calls.get(), 3);
}

// ============================================================================
// METHODS
// ============================================================================

struct Polynomial {
    coefficients: Vec<i64>,
}

impl Polynomial {
    fn eval(&self, x: i64) -> i64 {
        self.coefficients.iter().rev().fold(0, |acc, c| acc * x + c)
    }
}

#[test]
fn test_method_results_per_receiver() {
    let square = Polynomial {
        coefficients: vec![0, 0, 1],
    };
    let line = Polynomial {
        coefficients: vec![1, 2],
    };
    let calls = Cell::new(0);
    let eval = memoize_method(|poly: &Polynomial, x: i64| {
        calls.set(calls.get() + 1);
        poly.eval(x)
    });

    assert_eq!(eval.call(&square, (3,)), 9);
    assert_eq!(eval.call(&line, (3,)), 7);
    assert_eq!(eval.call(&square, (3,)), 9);
    assert_eq!(calls.get(), 2);
    assert!(eval.contains(&line, &(3,)));
}

#[test]
fn test_equal_receivers_are_distinct() {
    let a = Polynomial {
        coefficients: vec![1, 1],
    };
    let b = Polynomial {
        coefficients: vec![1, 1],
    };
    let calls = Cell::new(0);
    let eval = memoize_method_with(
        |poly: &Polynomial, x: i64| {
            calls.set(calls.get() + 1);
            poly.eval(x)
        },
        LfuPolicy::new(8),
    );
    assert_eq!(eval.call(&a, (2,)), 3);
    assert_eq!(eval.call(&b, (2,)), 3);
    assert_eq!(calls.get(), 2);
    assert_eq!(eval.policy_name(), "LFU");
}

#[test]
fn test_boxed_receivers_each_computed() {
    // Receivers stay alive as long as the wrapper, so no address is reused
    let polys: Vec<Box<Polynomial>> = (1..=3)
        .map(|k| {
            Box::new(Polynomial {
                coefficients: vec![0, k],
            })
        })
        .collect();
    let eval = memoize_method(|poly: &Polynomial, x: i64| poly.eval(x));

    let mut results = Vec::new();
    for _ in 0..2 {
        for poly in &polys {
            results.push(eval.call(&**poly, (10,)));
        }
    }
    assert_eq!(results, [10, 20, 30, 10, 20, 30]);
    assert_eq!(eval.len(), 3);
}

// ============================================================================
// ISOLATION
// ============================================================================

#[test]
fn test_instances_are_independent() {
    let first_calls = Cell::new(0);
    let second_calls = Cell::new(0);
    let first = memoize(|n: u8| {
        first_calls.set(first_calls.get() + 1);
        n
    });
    let second = memoize(|n: u8| {
        second_calls.set(second_calls.get() + 1);
        n
    });

    first.call((1,));
    second.call((1,));
    first.call((1,));

    assert_eq!(first_calls.get(), 1);
    assert_eq!(second_calls.get(), 1);
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
}
