//! Function Adaptors
//!
//! The memoized wrappers take their arguments as a single tuple so the tuple
//! can double as the cache key. [`Function`] adapts an ordinary closure or
//! function item of up to eight positional arguments to that calling
//! convention, and [`Method`] does the same for functions whose first
//! parameter is a borrowed receiver.
//!
//! ```
//! use memo_cache::function::{Function, Method};
//!
//! let add = |a: u32, b: u32| a + b;
//! assert_eq!(Function::invoke(&add, (2, 3)), 5);
//!
//! let scaled = |base: &u32, n: u32| base * n;
//! assert_eq!(Method::invoke(&scaled, &10, (4,)), 40);
//! ```

/// A function taking its positional arguments as one tuple.
pub trait Function<Args> {
    /// The function's return type.
    type Output;

    /// Calls the function with the unpacked argument tuple.
    fn invoke(&self, args: Args) -> Self::Output;
}

/// A function of a borrowed receiver and a tuple of further arguments.
pub trait Method<R: ?Sized, Args> {
    /// The method's return type.
    type Output;

    /// Calls the function with `receiver` followed by the unpacked tuple.
    fn invoke(&self, receiver: &R, args: Args) -> Self::Output;
}

macro_rules! impl_function {
    ($($arg:ident: $ty:ident),*) => {
        impl<Func, Out, $($ty),*> Function<($($ty,)*)> for Func
        where
            Func: Fn($($ty),*) -> Out,
        {
            type Output = Out;

            #[inline]
            fn invoke(&self, ($($arg,)*): ($($ty,)*)) -> Out {
                self($($arg),*)
            }
        }

        impl<Func, Recv, Out, $($ty),*> Method<Recv, ($($ty,)*)> for Func
        where
            Recv: ?Sized,
            Func: Fn(&Recv, $($ty),*) -> Out,
        {
            type Output = Out;

            #[inline]
            fn invoke(&self, receiver: &Recv, ($($arg,)*): ($($ty,)*)) -> Out {
                self(receiver, $($arg),*)
            }
        }
    };
}

impl_function!();
impl_function!(a1: A1);
impl_function!(a1: A1, a2: A2);
impl_function!(a1: A1, a2: A2, a3: A3);
impl_function!(a1: A1, a2: A2, a3: A3, a4: A4);
impl_function!(a1: A1, a2: A2, a3: A3, a4: A4, a5: A5);
impl_function!(a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6);
impl_function!(a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6, a7: A7);
impl_function!(a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6, a7: A7, a8: A8);

#[cfg(test)]
mod tests {
    use super::*;

    fn answer() -> u32 {
        42
    }

    #[test]
    fn test_zero_arity() {
        assert_eq!(Function::invoke(&answer, ()), 42);
    }

    #[test]
    fn test_arguments_keep_position() {
        let concat = |a: &str, b: &str, c: &str| std::format!("{a}{b}{c}");
        assert_eq!(Function::invoke(&concat, ("x", "y", "z")), "xyz");
        let sum8 = |a: u8, b: u8, c: u8, d: u8, e: u8, f: u8, g: u8, h: u8| {
            [a, b, c, d, e, f, g, h].iter().map(|&n| u32::from(n)).sum::<u32>()
        };
        assert_eq!(Function::invoke(&sum8, (1, 2, 3, 4, 5, 6, 7, 8)), 36);
    }

    #[test]
    fn test_method_receiver() {
        struct Counter {
            step: u64,
        }
        let advance = |counter: &Counter, from: u64| from + counter.step;
        let counter = Counter { step: 5 };
        assert_eq!(Method::invoke(&advance, &counter, (10,)), 15);
    }

    #[test]
    fn test_method_unsized_receiver() {
        let count = |text: &str, needle: char| text.matches(needle).count();
        assert_eq!(Method::<str, _>::invoke(&count, "banana", ('a',)), 3);
    }
}
