//! Span helpers.
//!
//! # Responsibilities
//! - Create one span per polling run
//! - Tag it with the job id and a fresh run id so concurrent runs can be told apart

use tracing::Span;
use uuid::Uuid;

/// Open the span that wraps a whole polling run.
pub fn run_span(job_id: &str) -> Span {
    let run_id = Uuid::new_v4();
    tracing::info_span!("poll_run", job_id = %job_id, run_id = %run_id)
}
