//! Structured event sink.
//!
//! # Responsibilities
//! - Define the events the cache, breaker and engine emit
//! - Route events to logs and metrics (`TracingSink`) or nowhere (`NoopSink`)
//!
//! # Design Decisions
//! - The sink is handed to each component at construction; there is no
//!   process-wide logger state inside the crate
//! - Events are plain owned values so sinks may buffer them

use std::sync::Arc;
use std::time::Duration;

use crate::observability::metrics;
use crate::remote::JobStatus;

/// State of the circuit breaker, as reported in events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    Closed,
    Open,
    HalfOpen,
}

impl BreakerState {
    pub fn as_str(self) -> &'static str {
        match self {
            BreakerState::Closed => "closed",
            BreakerState::Open => "open",
            BreakerState::HalfOpen => "half-open",
        }
    }
}

/// Something worth recording happened inside the poller.
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    CacheHit { key: String },
    CacheExpired { key: String },
    CacheStored { key: String, status: JobStatus },
    BreakerTransition { from: BreakerState, to: BreakerState, failures: u32 },
    BreakerRejected { job_id: String },
    AttemptSucceeded { job_id: String, attempt: u32, status: JobStatus },
    AttemptFailed { job_id: String, attempt: u32, error: String },
    Backoff { job_id: String, attempt: u32, base: Duration, delay: Duration },
    RunFinished { job_id: String, status: JobStatus, attempts: u32, elapsed: Duration },
    RunAborted { job_id: String, reason: String, attempts: u32, elapsed: Duration },
}

/// Receiver of [`PollEvent`]s.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &PollEvent);
}

/// Shared handle to a sink.
pub type SharedSink = Arc<dyn EventSink>;

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: &PollEvent) {}
}

/// Default sink: structured `tracing` records plus `metrics` updates.
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    metrics_enabled: bool,
}

impl TracingSink {
    pub fn new(metrics_enabled: bool) -> Self {
        Self { metrics_enabled }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(true)
    }
}

impl EventSink for TracingSink {
    fn emit(&self, event: &PollEvent) {
        match event {
            PollEvent::CacheHit { key } => {
                tracing::debug!(key = %key, "Cache hit");
            }
            PollEvent::CacheExpired { key } => {
                tracing::debug!(key = %key, "Cache entry outside ttl, evicted");
            }
            PollEvent::CacheStored { key, status } => {
                tracing::debug!(key = %key, status = %status, "Cached status");
            }
            PollEvent::BreakerTransition { from, to, failures } => {
                if *to == BreakerState::Open {
                    tracing::error!(
                        failures = failures,
                        "Failure threshold reached, circuit breaker open"
                    );
                } else {
                    tracing::info!(
                        from = from.as_str(),
                        to = to.as_str(),
                        "Circuit breaker state changed"
                    );
                }
            }
            PollEvent::BreakerRejected { job_id } => {
                tracing::warn!(job_id = %job_id, "Circuit breaker open, call rejected");
            }
            PollEvent::AttemptSucceeded { job_id, attempt, status } => {
                tracing::debug!(job_id = %job_id, attempt = attempt, status = %status, "Status received");
            }
            PollEvent::AttemptFailed { job_id, attempt, error } => {
                tracing::warn!(job_id = %job_id, attempt = attempt, error = %error, "Status check failed");
            }
            PollEvent::Backoff { job_id, attempt, base, delay } => {
                tracing::debug!(
                    job_id = %job_id,
                    attempt = attempt,
                    base = ?base,
                    delay = ?delay,
                    "Backing off"
                );
            }
            PollEvent::RunFinished { job_id, status, attempts, elapsed } => {
                tracing::info!(
                    job_id = %job_id,
                    status = %status,
                    attempts = attempts,
                    elapsed = ?elapsed,
                    "Polling finished"
                );
            }
            PollEvent::RunAborted { job_id, reason, attempts, elapsed } => {
                tracing::error!(
                    job_id = %job_id,
                    reason = %reason,
                    attempts = attempts,
                    elapsed = ?elapsed,
                    "Polling aborted"
                );
            }
        }

        if self.metrics_enabled {
            metrics::record_event(event);
        }
    }
}
