//! Circuit breaker for status service protection.
//!
//! # States
//! - Closed: normal operation, calls pass through
//! - Open: service assumed down, calls fail fast
//! - Half-Open: one trial call allowed to test recovery
//!
//! # State Transitions
//! ```text
//! Closed → Open: failure_count >= threshold
//! Open → Half-Open: reset timeout elapsed since the last failure
//! Half-Open → Closed: trial call succeeds (failure count reset)
//! Half-Open → failure accounting as in Closed (reopens once count >= threshold)
//! ```
//!
//! # Design Decisions
//! - One breaker per client, shared by all runs
//! - Fail fast in Open state (no waiting for timeout)
//! - Single trial in Half-Open (prevents hammering a recovering service)
//! - Success while Open resets the count but does not close the circuit
//! - A half-open trial whose outcome is never recorded (the caller dropped
//!   the call) frees the trial slot again through [`CallPermit`]'s `Drop`

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use crate::config::CircuitBreakerConfig;
use crate::observability::{BreakerState, PollEvent, SharedSink};

struct BreakerInner {
    state: BreakerState,
    failure_count: u32,
    last_failure: Option<Instant>,
    trial_in_flight: bool,
}

/// Three-state failure guard.
pub struct CircuitBreaker {
    inner: Mutex<BreakerInner>,
    failure_threshold: u32,
    reset_timeout: Duration,
    sink: SharedSink,
}

impl CircuitBreaker {
    pub fn new(failure_threshold: u32, reset_timeout: Duration, sink: SharedSink) -> Self {
        Self {
            inner: Mutex::new(BreakerInner {
                state: BreakerState::Closed,
                failure_count: 0,
                last_failure: None,
                trial_in_flight: false,
            }),
            failure_threshold,
            reset_timeout,
            sink,
        }
    }

    pub fn from_config(config: &CircuitBreakerConfig, sink: SharedSink) -> Self {
        Self::new(config.failure_threshold, config.reset_timeout(), sink)
    }

    fn lock(&self) -> MutexGuard<'_, BreakerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, inner: &mut BreakerInner, to: BreakerState) {
        let from = inner.state;
        inner.state = to;
        self.sink.emit(&PollEvent::BreakerTransition {
            from,
            to,
            failures: inner.failure_count,
        });
    }

    /// Whether a call may be attempted now.
    ///
    /// A granted half-open trial stays outstanding until an outcome is
    /// recorded; prefer [`CircuitBreaker::try_call`] when the call may be
    /// cancelled.
    pub fn can_execute(&self) -> bool {
        self.admit().is_some()
    }

    /// Admit one call, returning a permit that records its outcome.
    ///
    /// Dropping the permit without recording anything releases a half-open
    /// trial so the next caller may try again.
    pub fn try_call(&self) -> Option<CallPermit<'_>> {
        self.admit().map(|trial| CallPermit {
            breaker: self,
            trial,
            settled: false,
        })
    }

    /// `Some(is_trial)` when a call may proceed.
    fn admit(&self) -> Option<bool> {
        let mut inner = self.lock();
        match inner.state {
            BreakerState::Closed => Some(false),
            BreakerState::Open => {
                let cooled_down = inner
                    .last_failure
                    .map_or(true, |at| Instant::now().duration_since(at) >= self.reset_timeout);
                if !cooled_down {
                    return None;
                }
                self.transition(&mut inner, BreakerState::HalfOpen);
                inner.trial_in_flight = true;
                Some(true)
            }
            BreakerState::HalfOpen => {
                if inner.trial_in_flight {
                    None
                } else {
                    inner.trial_in_flight = true;
                    Some(true)
                }
            }
        }
    }

    fn abandon_trial(&self) {
        let mut inner = self.lock();
        if inner.state == BreakerState::HalfOpen {
            inner.trial_in_flight = false;
        }
    }

    /// Count a failed call.
    pub fn record_failure(&self) {
        let mut inner = self.lock();
        inner.failure_count = inner.failure_count.saturating_add(1);
        inner.last_failure = Some(Instant::now());
        inner.trial_in_flight = false;
        if inner.failure_count >= self.failure_threshold && inner.state != BreakerState::Open {
            self.transition(&mut inner, BreakerState::Open);
        }
    }

    /// Count a successful call.
    pub fn record_success(&self) {
        let mut inner = self.lock();
        inner.failure_count = 0;
        inner.trial_in_flight = false;
        if inner.state == BreakerState::HalfOpen {
            self.transition(&mut inner, BreakerState::Closed);
        }
    }

    pub fn state(&self) -> BreakerState {
        self.lock().state
    }

    pub fn failure_count(&self) -> u32 {
        self.lock().failure_count
    }
}

/// Admission for one call through a [`CircuitBreaker`].
#[must_use = "a permit that is dropped unused records nothing"]
pub struct CallPermit<'a> {
    breaker: &'a CircuitBreaker,
    trial: bool,
    settled: bool,
}

impl CallPermit<'_> {
    /// Whether this call is the half-open trial.
    pub fn is_trial(&self) -> bool {
        self.trial
    }

    pub fn succeeded(mut self) {
        self.settled = true;
        self.breaker.record_success();
    }

    pub fn failed(mut self) {
        self.settled = true;
        self.breaker.record_failure();
    }
}

impl Drop for CallPermit<'_> {
    fn drop(&mut self) {
        if self.trial && !self.settled {
            self.breaker.abandon_trial();
        }
    }
}

impl std::fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("CircuitBreaker")
            .field("state", &inner.state)
            .field("failure_count", &inner.failure_count)
            .field("failure_threshold", &self.failure_threshold)
            .field("reset_timeout", &self.reset_timeout)
            .finish()
    }
}
