//! Resilient job status poller.
//!
//! Tracks a remote long-running job by querying its status endpoint until
//! it reports `completed` or `error`, with jittered exponential backoff, a
//! TTL result cache, a circuit breaker and a bound on concurrent calls.
//!
//! ```no_run
//! use job_poller::{JobPoller, PollHooks, PollerConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let poller = JobPoller::new(&PollerConfig::new("http://localhost:8000"))?;
//! let result = poller
//!     .poll_until_complete(
//!         "job_one",
//!         PollHooks::new().on_progress(|r| println!("status: {}", r.status)),
//!     )
//!     .await?;
//! println!("finished: {}", result.status);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod observability;
pub mod poller;
pub mod remote;
pub mod resilience;

pub use config::PollerConfig;
pub use poller::{ClientError, JobPoller, PollError, PollHooks};
pub use remote::{JobStatus, PollResult};
