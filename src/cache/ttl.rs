//! Time-bounded result cache.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;

use crate::observability::{PollEvent, SharedSink};
use crate::remote::PollResult;

/// A cached result and the moment it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: PollResult,
    pub recorded_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.recorded_at) <= ttl
    }
}

/// A thread-safe cache of poll results keyed by string.
///
/// Clones share the same entries. There is no capacity bound: an entry
/// lives until it is read after expiry or overwritten.
#[derive(Clone)]
pub struct TtlCache {
    inner: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
    sink: SharedSink,
}

impl TtlCache {
    /// Create an empty cache.
    pub fn new(ttl: Duration, sink: SharedSink) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            ttl,
            sink,
        }
    }

    /// Return the value for `key` if it was stored no more than `ttl` ago.
    ///
    /// A stale entry is evicted on the way out.
    pub fn get(&self, key: &str) -> Option<PollResult> {
        let now = Instant::now();
        let fresh = match self.inner.get(key) {
            None => return None,
            Some(entry) => entry.is_fresh(now, self.ttl).then(|| entry.value.clone()),
        };

        if fresh.is_some() {
            self.sink.emit(&PollEvent::CacheHit { key: key.to_string() });
            return fresh;
        }

        // A concurrent `set` may have refreshed the entry since the read above.
        let evicted = self
            .inner
            .remove_if(key, |_, entry| !entry.is_fresh(now, self.ttl));
        if evicted.is_some() {
            self.sink.emit(&PollEvent::CacheExpired { key: key.to_string() });
        }
        None
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn set(&self, key: impl Into<String>, value: PollResult) {
        let key = key.into();
        let status = value.status;
        self.inner.insert(
            key.clone(),
            CacheEntry {
                value,
                recorded_at: Instant::now(),
            },
        );
        self.sink.emit(&PollEvent::CacheStored { key, status });
    }

    /// Number of entries, fresh or not.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
