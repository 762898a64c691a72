//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! cache / circuit breaker / engine
//!     → events.rs (typed PollEvent, injected EventSink)
//!         → TracingSink → tracing records (logging.rs installs the subscriber)
//!                       → metrics.rs (counters, histograms)
//!     → tracing.rs (one span per polling run)
//! ```
//!
//! # Design Decisions
//! - Components never touch a global logger; they get a sink at construction
//! - Structured fields, never formatted prose, for machine parsing
//! - Metrics are cheap and optional

pub mod events;
pub mod logging;
pub mod metrics;
pub mod tracing;

pub use events::{BreakerState, EventSink, NoopSink, PollEvent, SharedSink, TracingSink};
