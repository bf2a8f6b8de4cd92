//! Retry and shutdown policies

use std::time::Duration;

use contracts::{RetryConfig, ShutdownConfig, ShutdownMode};

/// Fixed-interval retry: same pause after every failed attempt, no jitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first (>= 1)
    pub max_attempts: u32,
    /// Pause after each failed attempt
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, config.backoff())
    }
}

/// In-flight handling when the pipeline shuts down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownPolicy {
    /// Wait for in-flight dispatches up to `timeout`, then abandon the rest
    Drain { timeout: Duration },
    /// Wake units out of backoff and dead-letter whatever is undelivered
    Abandon,
}

impl Default for ShutdownPolicy {
    fn default() -> Self {
        Self::from(&ShutdownConfig::default())
    }
}

impl From<&ShutdownConfig> for ShutdownPolicy {
    fn from(config: &ShutdownConfig) -> Self {
        match config.policy {
            ShutdownMode::Drain => Self::Drain {
                timeout: config.drain_timeout(),
            },
            ShutdownMode::Abandon => Self::Abandon,
        }
    }
}
