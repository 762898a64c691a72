//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.
//! Durations are expressed as fractional seconds.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for a job poller.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PollerConfig {
    /// Base URL of the status service (e.g., "http://localhost:8000").
    pub base_url: String,

    /// Query parameter carrying the job id. Unset means the job id is not
    /// sent, which is what single-job services expect.
    pub job_id_param: Option<String>,

    /// Ignore system HTTP proxy settings (`HTTP_PROXY` and friends).
    pub no_proxy: bool,

    /// Retry loop settings.
    pub polling: PollingConfig,

    /// Per-call network timeouts.
    pub timeouts: TimeoutConfig,

    /// Result cache settings.
    pub cache: CacheConfig,

    /// Circuit breaker settings.
    pub circuit_breaker: CircuitBreakerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl PollerConfig {
    /// Defaults for everything except the base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Retry loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingConfig {
    /// First backoff delay before jitter, in seconds.
    pub initial_delay_secs: f64,

    /// Cap on the backoff delay before jitter, in seconds.
    pub max_delay_secs: f64,

    /// Deadline for a whole polling run, in seconds.
    pub overall_timeout_secs: f64,

    /// Simultaneous in-flight status calls across all runs of one client.
    pub max_concurrent_calls: usize,

    /// Consecutive error results that abort a run.
    pub consecutive_error_limit: u32,
}

impl PollingConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_secs_f64(self.initial_delay_secs)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_secs_f64(self.max_delay_secs)
    }

    pub fn overall_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.overall_timeout_secs)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            initial_delay_secs: 1.0,
            max_delay_secs: 32.0,
            overall_timeout_secs: 300.0,
            max_concurrent_calls: 3,
            consecutive_error_limit: 3,
        }
    }
}

/// Timeout configuration for status calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time for one request/response, in seconds.
    pub request_secs: f64,
}

impl TimeoutConfig {
    pub fn request(&self) -> Duration {
        Duration::from_secs_f64(self.request_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10.0 }
    }
}

/// Result cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Time-to-live of a cached result, in seconds.
    pub ttl_secs: f64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs_f64(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 10.0 }
    }
}

/// Circuit breaker configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CircuitBreakerConfig {
    /// Failures that open the circuit.
    pub failure_threshold: u32,

    /// Time after the last failure before a trial call is allowed, in seconds.
    pub reset_timeout_secs: f64,
}

impl CircuitBreakerConfig {
    pub fn reset_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.reset_timeout_secs)
    }
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            reset_timeout_secs: 60.0,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Record metrics through the `metrics` facade.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
        }
    }
}
