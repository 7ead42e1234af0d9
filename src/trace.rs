//! Diagnostic events.
//!
//! Cache hits, misses and evictions are reported through the `tracing` facade
//! when the `tracing` feature is enabled. The application installs whatever
//! subscriber it wants; this crate never reads the events back. With the
//! feature disabled the macros expand to nothing.

/// Emits a `debug` level event when the `tracing` feature is enabled.
macro_rules! memo_debug {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::debug!($($arg)+);
        }
    };
}

/// Emits a `trace` level event when the `tracing` feature is enabled.
macro_rules! memo_trace {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::trace!($($arg)+);
        }
    };
}

pub(crate) use memo_debug;
pub(crate) use memo_trace;
