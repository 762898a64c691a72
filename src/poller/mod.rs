//! Job polling subsystem.
//!
//! # Data Flow
//! ```text
//! poll_until_complete(job_id, hooks)
//!     loop:
//!         deadline check (fatal DeadlineExceeded)
//!         → cache hit?            → result
//!         → breaker refuses?      → synthesized error result
//!         → call gate (semaphore) → StatusSource::fetch_status
//!             → breaker.record_success / record_failure
//!             → cache non-pending answers
//!         → consecutive error count (fatal ConsecutiveErrors, on_error)
//!         → on_progress(result)
//!         → terminal answer? return it
//!         → jittered backoff sleep
//! ```

pub mod engine;
pub mod error;
pub mod hooks;

pub use engine::{JobPoller, PollSettings, BREAKER_OPEN_MESSAGE};
pub use error::{ClientError, PollError, PollOutcome};
pub use hooks::PollHooks;
