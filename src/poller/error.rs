//! Poller error definitions.

use std::time::Duration;

use thiserror::Error;

use crate::config::ValidationError;

/// Fatal conditions that end a polling run.
///
/// Per-attempt failures never surface here; they are retried inside the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    /// Too many error results in a row.
    #[error("{count} consecutive errors, last: {last_error}")]
    ConsecutiveErrors { count: u32, last_error: String },

    /// The run outlived its overall timeout.
    #[error("timed out waiting for job completion after {elapsed:?} (limit {timeout:?})")]
    DeadlineExceeded { elapsed: Duration, timeout: Duration },
}

/// Errors building a poller.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid configuration: {}", join_errors(.0))]
    Config(Vec<ValidationError>),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[source] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Http(#[source] reqwest::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for polling runs.
pub type PollOutcome = Result<crate::remote::PollResult, PollError>;
