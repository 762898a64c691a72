//! Metrics collection.
//!
//! # Metrics
//! - `poller_attempts_total` (counter): status checks by outcome
//! - `poller_cache_events_total` (counter): cache hits, evictions, stores
//! - `poller_breaker_transitions_total` (counter): breaker state changes by target state
//! - `poller_breaker_rejections_total` (counter): calls refused while open
//! - `poller_backoff_seconds` (histogram): jittered sleep between attempts
//! - `poller_runs_total` (counter): finished runs by outcome
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; installing an exporter is the
//!   embedding application's job
//! - Labels are low-cardinality (never the job id)

use crate::observability::events::PollEvent;

/// Record the metric side of an event.
pub fn record_event(event: &PollEvent) {
    match event {
        PollEvent::CacheHit { .. } => record_cache_event("hit"),
        PollEvent::CacheExpired { .. } => record_cache_event("expired"),
        PollEvent::CacheStored { .. } => record_cache_event("stored"),
        PollEvent::BreakerTransition { to, .. } => {
            ::metrics::counter!("poller_breaker_transitions_total", "state" => to.as_str())
                .increment(1);
        }
        PollEvent::BreakerRejected { .. } => {
            ::metrics::counter!("poller_breaker_rejections_total").increment(1);
        }
        PollEvent::AttemptSucceeded { status, .. } => record_attempt(status.as_str()),
        PollEvent::AttemptFailed { .. } => record_attempt("failed"),
        PollEvent::Backoff { delay, .. } => {
            ::metrics::histogram!("poller_backoff_seconds").record(delay.as_secs_f64());
        }
        PollEvent::RunFinished { status, .. } => record_run(status.as_str()),
        PollEvent::RunAborted { .. } => record_run("aborted"),
    }
}

fn record_attempt(outcome: &'static str) {
    ::metrics::counter!("poller_attempts_total", "outcome" => outcome).increment(1);
}

fn record_cache_event(kind: &'static str) {
    ::metrics::counter!("poller_cache_events_total", "kind" => kind).increment(1);
}

fn record_run(outcome: &'static str) {
    ::metrics::counter!("poller_runs_total", "outcome" => outcome).increment(1);
}
