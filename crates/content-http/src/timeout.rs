//! Timeout configuration for outbound requests.

use std::time::Duration;

/// Timeout configuration for a fetch operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Duration,
    /// Total operation timeout, per attempt.
    pub total: Duration,
}

impl TimeoutConfig {
    /// Create a new timeout configuration.
    pub fn new(connect: Duration, total: Duration) -> Self {
        Self { connect, total }
    }

    /// Create from a single total timeout. The connect timeout is a quarter of
    /// the total, and never zero while the total is not.
    pub fn from_total(total: Duration) -> Self {
        let connect = std::cmp::min(std::cmp::max(total / 4, Duration::from_millis(1)), total);
        Self { connect, total }
    }

    /// Create from a total timeout in milliseconds.
    pub fn from_millis(total_ms: u64) -> Self {
        Self::from_total(Duration::from_millis(total_ms))
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from_total(Duration::from_secs(10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_total_splits_connect() {
        let cfg = TimeoutConfig::from_millis(1000);
        assert_eq!(cfg.connect, Duration::from_millis(250));
        assert_eq!(cfg.total, Duration::from_millis(1000));
    }

    #[test]
    fn test_tiny_total_keeps_nonzero_connect() {
        for ms in 1..=3 {
            let cfg = TimeoutConfig::from_millis(ms);
            assert_eq!(cfg.connect, Duration::from_millis(1));
            assert_eq!(cfg.total, Duration::from_millis(ms));
        }
        assert_eq!(TimeoutConfig::from_millis(0).connect, Duration::ZERO);
    }

    #[test]
    fn test_default() {
        let cfg = TimeoutConfig::default();
        assert_eq!(cfg.total, Duration::from_secs(10));
        assert!(cfg.connect < cfg.total);
    }
}
