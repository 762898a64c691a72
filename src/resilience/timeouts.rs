//! Timeout enforcement.
//!
//! # Responsibilities
//! - Bound every status call by the per-call timeout
//! - Track the overall deadline of a polling run
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities and clock
//! - A timed-out call is a `FetchError::Timeout`, distinct from other failures

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::remote::FetchError;

/// Run `fut`, failing with [`FetchError::Timeout`] once `limit` elapses.
pub async fn with_timeout<F, T>(limit: Duration, fut: F) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout),
    }
}

/// Overall time budget measured from a start instant.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    limit: Duration,
}

impl Deadline {
    /// Start the clock now.
    pub fn start(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.elapsed())
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed() >= self.limit
    }
}
