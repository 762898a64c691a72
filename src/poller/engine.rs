//! Polling engine.
//!
//! # Responsibilities
//! - Drive the retry loop for one job until a terminal status or a fatal error
//! - Route every attempt through the cache, the circuit breaker and the call gate
//! - Count consecutive errors and enforce the overall deadline
//! - Report each result to the caller's hooks in attempt order
//!
//! # Design Decisions
//! - One run is a sequential loop; concurrency only comes from several runs
//!   sharing a client
//! - Cache, breaker and call gate are shared by every clone of a `JobPoller`
//! - Transient call failures are retried; a job that reports `error` is final

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::Instrument;

use crate::cache::TtlCache;
use crate::config::{validate_config, PollerConfig};
use crate::observability::tracing::run_span;
use crate::observability::{PollEvent, SharedSink, TracingSink};
use crate::poller::error::{ClientError, PollError, PollOutcome};
use crate::poller::hooks::PollHooks;
use crate::remote::{FetchError, HttpStatusSource, JobStatus, PollResult, StatusSource};
use crate::resilience::{Backoff, CircuitBreaker, Deadline};

/// Error message of the result synthesized when the breaker refuses a call.
pub const BREAKER_OPEN_MESSAGE: &str = "circuit breaker is open, status service considered faulty";

/// Tunables of the retry loop, resolved from [`PollerConfig`].
#[derive(Debug, Clone)]
pub struct PollSettings {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub overall_timeout: Duration,
    pub max_concurrent_calls: usize,
    pub consecutive_error_limit: u32,
    pub cache_ttl: Duration,
}

impl PollSettings {
    pub fn from_config(config: &PollerConfig) -> Self {
        Self {
            initial_delay: config.polling.initial_delay(),
            max_delay: config.polling.max_delay(),
            overall_timeout: config.polling.overall_timeout(),
            max_concurrent_calls: config.polling.max_concurrent_calls,
            consecutive_error_limit: config.polling.consecutive_error_limit,
            cache_ttl: config.cache.ttl(),
        }
    }
}

/// State of a single polling run. Never shared, never persisted.
#[derive(Debug)]
struct PollSession {
    deadline: Deadline,
    backoff: Backoff,
    consecutive_errors: u32,
    attempts: u32,
}

impl PollSession {
    fn start(settings: &PollSettings) -> Self {
        Self {
            deadline: Deadline::start(settings.overall_timeout),
            backoff: Backoff::new(settings.initial_delay, settings.max_delay),
            consecutive_errors: 0,
            attempts: 0,
        }
    }
}

/// Result of one attempt plus whether it came from a failed call.
struct Attempt {
    result: PollResult,
    transient: bool,
}

impl Attempt {
    fn answered(result: PollResult) -> Self {
        Self {
            result,
            transient: false,
        }
    }

    fn failed(result: PollResult) -> Self {
        Self {
            result,
            transient: true,
        }
    }

    /// The run ends on a terminal status the service actually reported.
    fn ends_run(&self) -> bool {
        !self.transient && self.result.is_terminal()
    }
}

/// Resilient client that polls a job's status until it completes.
///
/// Cloning is cheap; clones share the cache, the circuit breaker and the
/// limit on concurrent calls.
pub struct JobPoller<S = HttpStatusSource> {
    source: Arc<S>,
    cache: TtlCache,
    breaker: Arc<CircuitBreaker>,
    gate: Arc<Semaphore>,
    settings: Arc<PollSettings>,
    sink: SharedSink,
}

impl<S> Clone for JobPoller<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            cache: self.cache.clone(),
            breaker: self.breaker.clone(),
            gate: self.gate.clone(),
            settings: self.settings.clone(),
            sink: self.sink.clone(),
        }
    }
}

impl JobPoller<HttpStatusSource> {
    /// HTTP poller reporting to `tracing` and `metrics`.
    pub fn new(config: &PollerConfig) -> Result<Self, ClientError> {
        let sink: SharedSink = Arc::new(TracingSink::new(config.observability.metrics_enabled));
        Self::with_sink(config, sink)
    }

    /// HTTP poller reporting to a custom sink.
    pub fn with_sink(config: &PollerConfig, sink: SharedSink) -> Result<Self, ClientError> {
        validate_config(config).map_err(ClientError::Config)?;
        let source = HttpStatusSource::new(config)?;
        Ok(Self::assemble(config, source, sink))
    }
}

impl<S: StatusSource> JobPoller<S> {
    /// Poller over any status source.
    pub fn with_source(
        config: &PollerConfig,
        source: S,
        sink: SharedSink,
    ) -> Result<Self, ClientError> {
        validate_config(config).map_err(ClientError::Config)?;
        Ok(Self::assemble(config, source, sink))
    }

    fn assemble(config: &PollerConfig, source: S, sink: SharedSink) -> Self {
        let settings = PollSettings::from_config(config);
        Self {
            source: Arc::new(source),
            cache: TtlCache::new(settings.cache_ttl, sink.clone()),
            breaker: Arc::new(CircuitBreaker::from_config(&config.circuit_breaker, sink.clone())),
            gate: Arc::new(Semaphore::new(settings.max_concurrent_calls)),
            settings: Arc::new(settings),
            sink,
        }
    }

    /// Cache key for a job.
    pub fn cache_key(job_id: &str) -> String {
        format!("status:{job_id}")
    }

    pub fn settings(&self) -> &PollSettings {
        &self.settings
    }

    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    pub fn circuit_breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    /// Poll without callbacks.
    pub async fn poll(&self, job_id: &str) -> PollOutcome {
        self.poll_until_complete(job_id, PollHooks::default()).await
    }

    /// Poll `job_id` until it reports `completed` or `error`.
    ///
    /// Fails with [`PollError::ConsecutiveErrors`] after too many error
    /// results in a row, or [`PollError::DeadlineExceeded`] once the
    /// overall timeout is spent.
    pub async fn poll_until_complete(&self, job_id: &str, hooks: PollHooks<'_>) -> PollOutcome {
        self.run(job_id, hooks).instrument(run_span(job_id)).await
    }

    async fn run(&self, job_id: &str, mut hooks: PollHooks<'_>) -> PollOutcome {
        let mut session = PollSession::start(&self.settings);

        loop {
            if session.deadline.is_expired() {
                let err = PollError::DeadlineExceeded {
                    elapsed: session.deadline.elapsed(),
                    timeout: session.deadline.limit(),
                };
                return Err(self.abort(job_id, &session, err));
            }

            session.attempts += 1;
            let attempt = self.attempt(job_id, session.attempts).await;

            if attempt.result.is_error() {
                session.consecutive_errors += 1;
                if session.consecutive_errors >= self.settings.consecutive_error_limit {
                    let message = attempt.result.error_message();
                    hooks.error(message);
                    let err = PollError::ConsecutiveErrors {
                        count: session.consecutive_errors,
                        last_error: message.to_string(),
                    };
                    return Err(self.abort(job_id, &session, err));
                }
            } else {
                session.consecutive_errors = 0;
            }

            hooks.progress(&attempt.result);

            if attempt.ends_run() {
                self.sink.emit(&PollEvent::RunFinished {
                    job_id: job_id.to_string(),
                    status: attempt.result.status,
                    attempts: session.attempts,
                    elapsed: session.deadline.elapsed(),
                });
                return Ok(attempt.result);
            }

            let base = session.backoff.current();
            let delay = session
                .backoff
                .next_delay()
                .min(session.deadline.remaining());
            self.sink.emit(&PollEvent::Backoff {
                job_id: job_id.to_string(),
                attempt: session.attempts,
                base,
                delay,
            });
            tokio::time::sleep(delay).await;
        }
    }

    /// One status check: cache, then breaker, then a gated remote call.
    async fn attempt(&self, job_id: &str, attempt: u32) -> Attempt {
        let key = Self::cache_key(job_id);
        if let Some(cached) = self.cache.get(&key) {
            return Attempt::answered(cached);
        }

        let Some(permit) = self.breaker.try_call() else {
            self.sink.emit(&PollEvent::BreakerRejected {
                job_id: job_id.to_string(),
            });
            return Attempt::failed(PollResult::failed(BREAKER_OPEN_MESSAGE));
        };

        // Dropping this future mid-call drops the permit, which frees a
        // half-open trial for the next caller.
        let outcome = match self.gate.acquire().await {
            Ok(_slot) => self.source.fetch_status(job_id).await,
            Err(_) => Err(FetchError::Transport("call gate closed".to_string())),
        };

        match outcome {
            Ok(result) => {
                permit.succeeded();
                self.sink.emit(&PollEvent::AttemptSucceeded {
                    job_id: job_id.to_string(),
                    attempt,
                    status: result.status,
                });
                if result.status != JobStatus::Pending {
                    self.cache.set(key, result.clone());
                }
                Attempt::answered(result)
            }
            Err(err) => {
                permit.failed();
                self.sink.emit(&PollEvent::AttemptFailed {
                    job_id: job_id.to_string(),
                    attempt,
                    error: err.to_string(),
                });
                Attempt::failed(err.into())
            }
        }
    }

    fn abort(&self, job_id: &str, session: &PollSession, err: PollError) -> PollError {
        self.sink.emit(&PollEvent::RunAborted {
            job_id: job_id.to_string(),
            reason: err.to_string(),
            attempts: session.attempts,
            elapsed: session.deadline.elapsed(),
        });
        err
    }
}
