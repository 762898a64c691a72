//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or PollerConfig::new(base_url)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → PollerConfig (validated, immutable)
//!     → JobPoller::new (derives durations, builds cache / breaker / gate)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once a poller is built
//! - All fields except `base_url` have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    CacheConfig, CircuitBreakerConfig, ObservabilityConfig, PollerConfig, PollingConfig,
    TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
