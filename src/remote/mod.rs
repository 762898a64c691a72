//! Remote status service access.
//!
//! # Data Flow
//! ```text
//! engine.rs → StatusSource::fetch_status(job_id)
//!     → http.rs (GET <base>/status, 10s timeout)
//!     → 200 {"result": ...}  → Ok(PollResult)
//!     → non-200 / timeout / transport / bad body → Err(FetchError)
//! ```
//!
//! # Design Decisions
//! - One call, no internal retries
//! - Transient call failures are typed (`FetchError`), not folded into the
//!   job's own `error` status, so the engine can retry them

pub mod http;
pub mod source;
pub mod types;

pub use http::HttpStatusSource;
pub use source::StatusSource;
pub use types::{FetchError, JobStatus, PollResult};
