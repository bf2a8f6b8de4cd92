//! AppConfig - Config Loader output
//!
//! Describes the complete service configuration: listen address, sink
//! targets, retry and shutdown policy, and the routing table.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use validator::Validate;

use crate::RoutingTable;

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// HTTP listen address
    #[serde(default = "default_http")]
    #[validate(length(min = 1, message = "listen address cannot be empty"))]
    pub http: String,

    /// Reject unknown or nil destinations at load time
    #[serde(default = "default_strict")]
    pub strict_destinations: bool,

    /// File sink and dead-letter targets
    #[serde(default)]
    pub paths: SinkPaths,

    /// Per-destination retry policy
    #[serde(default)]
    #[validate(nested)]
    pub retry: RetryConfig,

    /// Behavior for in-flight dispatches on shutdown
    #[serde(default)]
    pub shutdown: ShutdownConfig,

    /// Tag → destinations table
    #[serde(default, alias = "routes")]
    pub conf: RoutingTable,
}

fn default_http() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_strict() -> bool {
    true
}

impl AppConfig {
    /// Build a config with defaults around the given routing table
    pub fn with_routes(conf: RoutingTable) -> Self {
        Self {
            version: ConfigVersion::V1,
            http: default_http(),
            strict_destinations: default_strict(),
            paths: SinkPaths::default(),
            retry: RetryConfig::default(),
            shutdown: ShutdownConfig::default(),
            conf,
        }
    }
}

/// Append-only file targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkPaths {
    /// Target of the `file` destination
    #[serde(default = "default_file_sink")]
    pub file_sink: PathBuf,

    /// Dead-letter store
    #[serde(default = "default_dead_letter")]
    pub dead_letter: PathBuf,
}

fn default_file_sink() -> PathBuf {
    PathBuf::from("./file.txt")
}

fn default_dead_letter() -> PathBuf {
    PathBuf::from("./dead-letter-queue.txt")
}

impl Default for SinkPaths {
    fn default() -> Self {
        Self {
            file_sink: default_file_sink(),
            dead_letter: default_dead_letter(),
        }
    }
}

/// Fixed-interval retry policy
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RetryConfig {
    /// Total attempts per destination, including the first
    #[serde(default = "default_max_attempts")]
    #[validate(range(min = 1, message = "max_attempts must be >= 1"))]
    pub max_attempts: u32,

    /// Pause between attempts (milliseconds)
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    3000
}

impl RetryConfig {
    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

/// What happens to in-flight dispatches when the process stops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShutdownMode {
    /// Wait for in-flight dispatches, up to the drain timeout
    #[default]
    Drain,
    /// Cut retries short and dead-letter whatever is still pending
    Abandon,
}

/// Shutdown configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShutdownConfig {
    #[serde(default)]
    pub policy: ShutdownMode,

    /// Upper bound on drain time (seconds)
    #[serde(default = "default_drain_timeout_secs")]
    pub drain_timeout_secs: u64,
}

fn default_drain_timeout_secs() -> u64 {
    30
}

impl ShutdownConfig {
    pub fn drain_timeout(&self) -> Duration {
        Duration::from_secs(self.drain_timeout_secs)
    }
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            policy: ShutdownMode::default(),
            drain_timeout_secs: default_drain_timeout_secs(),
        }
    }
}
