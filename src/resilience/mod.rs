//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Status check:
//!     → circuit_breaker.rs (fail fast while the service is considered down)
//!     → timeouts.rs (enforce the per-call timeout)
//!     → on failure: circuit_breaker.rs records it
//!     → backoff.rs (jittered, doubling sleep before the next check)
//!     → timeouts.rs Deadline (abort the run once the overall budget is spent)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every call and every run has a deadline
//! - Jittered backoff prevents synchronized retry storms
//! - Circuit breaker prevents hammering a failing service

pub mod backoff;
pub mod circuit_breaker;
pub mod timeouts;

pub use backoff::Backoff;
pub use circuit_breaker::{CallPermit, CircuitBreaker};
pub use timeouts::Deadline;
