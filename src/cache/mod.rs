//! Result caching.
//!
//! # Responsibilities
//! - Remember terminal results per job so repeated checks skip the network
//! - Expire entries after a fixed time-to-live
//!
//! # Design Decisions
//! - Sharded concurrent map; runs sharing a client share the cache
//! - Lazy expiry: stale entries are dropped when read, no sweeper task
//! - Clock is `tokio::time::Instant` so expiry follows a paused test clock

pub mod ttl;

pub use ttl::{CacheEntry, TtlCache};
