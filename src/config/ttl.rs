//! Configuration for the time-to-live (TTL) policy.
//!
//! TTL has no entry-count bound. Every insert stamps its key, then sweeps out
//! entries older than `ttl`; between inserts an expired entry may still be
//! served.
//!
//! # Examples
//!
//! ```
//! use memo_cache::config::TtlPolicyConfig;
//! use memo_cache::policy::TtlPolicy;
//! use std::time::Duration;
//!
//! let config = TtlPolicyConfig { ttl: Duration::from_secs(30) };
//! let policy: TtlPolicy<String> = TtlPolicy::init(config);
//! assert_eq!(policy.ttl(), Duration::from_secs(30));
//! ```

use core::fmt;
use core::time::Duration;

/// Configuration for a TTL eviction policy.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicyConfig {
    /// Maximum age of an entry, measured from its insertion.
    pub ttl: Duration,
}

impl fmt::Debug for TtlPolicyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlPolicyConfig")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_config_creation() {
        let config = TtlPolicyConfig {
            ttl: Duration::from_millis(10),
        };
        assert_eq!(config.ttl.as_millis(), 10);
    }
}
