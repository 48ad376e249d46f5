//! Cache Store Module
//!
//! Read-through cache that regenerates a keyed snapshot once its absolute
//! TTL has elapsed.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock};
use crate::cache::stats::StatsRecorder;
use crate::error::GenerationError;

// == Expiring Cache ==
/// Read-through cache with absolute (non-sliding) expiry.
///
/// Lookups that find a valid entry return the shared snapshot without side
/// effects. A missing or expired entry is regenerated by the caller-supplied
/// generator outside any lock and swapped in whole under the write lock, so
/// concurrent callers may regenerate in parallel but never observe a
/// half-written entry.
pub struct ExpiringCache<V> {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    /// Time source for stamping and expiry checks
    clock: Arc<dyn Clock>,
    /// Lifetime of every stored entry
    ttl: Duration,
    /// Performance statistics
    stats: StatsRecorder,
}

impl<V> ExpiringCache<V> {
    // == Constructor ==
    /// Creates a cache driven by the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Creates a cache driven by the given clock.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
            ttl,
            stats: StatsRecorder::default(),
        }
    }

    // == Get Or Generate ==
    /// Returns the snapshot stored under `key`, regenerating it if absent or
    /// expired.
    ///
    /// A failed generation stores nothing and leaves any previous entry in
    /// place; the error is returned as-is and the next call tries again.
    pub async fn get_or_generate<F>(
        &self,
        key: &str,
        generate: F,
    ) -> Result<Arc<V>, GenerationError>
    where
        F: FnOnce() -> Result<V, GenerationError>,
    {
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(key) {
                if !entry.is_expired(self.clock.now_ms()) {
                    self.stats.record_hit();
                    debug!(key, created_at = entry.created_at, "Cache hit");
                    return Ok(Arc::clone(&entry.value));
                }
            }
        }

        self.stats.record_miss();
        debug!(key, "Cache miss, regenerating");

        let value = match generate() {
            Ok(value) => value,
            Err(err) => {
                self.stats.record_failure();
                warn!(key, error = %err, "Snapshot generation failed");
                return Err(err);
            }
        };

        let entry = CacheEntry::new(value, self.clock.now_ms(), self.ttl);
        let snapshot = Arc::clone(&entry.value);
        let created_at = entry.created_at;

        {
            let mut entries = self.entries.write().await;
            // Never replace a newer entry stored by a concurrent regenerator.
            let is_newer = entries
                .get(key)
                .map_or(true, |current| current.created_at <= created_at);
            if is_newer {
                entries.insert(key.to_string(), entry);
            }
        }
        self.stats.record_regeneration();
        info!(
            key,
            created_at,
            ttl_secs = self.ttl.as_secs(),
            "Cache entry regenerated"
        );

        Ok(snapshot)
    }

    // == Peek ==
    /// Returns the stored entry for `key`, expired or not, without
    /// regenerating it.
    pub async fn peek(&self, key: &str) -> Option<CacheEntry<V>> {
        self.entries.read().await.get(key).cloned()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    /// Returns the configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the current time according to the cache's clock.
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    // == Length ==
    /// Returns the number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if nothing has been stored yet.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
