//! The seam between the polling engine and whatever answers status checks.

use std::future::Future;
use std::sync::Arc;

use crate::remote::types::{FetchError, PollResult};

/// Answers "what is the status of this job right now?" with one call.
///
/// Implementations must not retry; retry policy belongs to the engine.
pub trait StatusSource: Send + Sync + 'static {
    fn fetch_status(
        &self,
        job_id: &str,
    ) -> impl Future<Output = Result<PollResult, FetchError>> + Send;
}

impl<S: StatusSource> StatusSource for Arc<S> {
    fn fetch_status(
        &self,
        job_id: &str,
    ) -> impl Future<Output = Result<PollResult, FetchError>> + Send {
        (**self).fetch_status(job_id)
    }
}
