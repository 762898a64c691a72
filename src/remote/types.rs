//! Job status types shared by the adapter, cache and engine.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message attached when the remote job itself reports `error`.
pub const JOB_REPORTED_ERROR: &str = "job reported error status";

/// Status of a remote job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Completed,
    Error,
}

impl JobStatus {
    /// `completed` and `error` end a polling run.
    pub fn is_terminal(self) -> bool {
        !matches!(self, JobStatus::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Completed => "completed",
            JobStatus::Error => "error",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one status check.
///
/// `error` is populated exactly when `status` is [`JobStatus::Error`];
/// the constructors are the only way to build one outside this module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollResult {
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

impl PollResult {
    pub fn pending() -> Self {
        Self::from_status(JobStatus::Pending)
    }

    pub fn completed() -> Self {
        Self::from_status(JobStatus::Completed)
    }

    /// An `error` result carrying `message`.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Error,
            error: Some(message.into()),
            metadata: None,
        }
    }

    /// Build a result for a status reported by the remote service.
    pub fn from_status(status: JobStatus) -> Self {
        match status {
            JobStatus::Error => Self::failed(JOB_REPORTED_ERROR),
            _ => Self {
                status,
                error: None,
                metadata: None,
            },
        }
    }

    /// Attach extra response fields. An empty map leaves `metadata` unset.
    pub fn with_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = if metadata.is_empty() { None } else { Some(metadata) };
        self
    }

    pub fn is_error(&self) -> bool {
        self.status == JobStatus::Error
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Error message, or an empty string for non-error results.
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or_default()
    }
}

/// Failure of a single remote call. These are transient: the engine
/// turns them into `error` results and retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Non-200 HTTP status.
    #[error("server returned status {0}")]
    Status(u16),

    /// The per-call timeout elapsed.
    #[error("request timed out")]
    Timeout,

    /// Connection or protocol failure.
    #[error("{0}")]
    Transport(String),

    /// Body was not a valid status document.
    #[error("{0}")]
    Decode(String),
}

impl From<FetchError> for PollResult {
    fn from(err: FetchError) -> Self {
        PollResult::failed(err.to_string())
    }
}

/// Wire format of the status endpoint's 200 body.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusBody {
    pub result: JobStatus,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl From<StatusBody> for PollResult {
    fn from(body: StatusBody) -> Self {
        PollResult::from_status(body.result).with_metadata(body.extra)
    }
}
