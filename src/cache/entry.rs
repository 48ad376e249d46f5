//! Cache Entry Module
//!
//! Defines a stored snapshot together with its creation time and TTL.

use std::sync::Arc;
use std::time::Duration;

// == Cache Entry ==
/// A snapshot stored in the cache with absolute expiry metadata.
///
/// Entries are never mutated after creation; regeneration replaces the whole
/// entry.
#[derive(Debug)]
pub struct CacheEntry<V> {
    /// The stored snapshot, shared with every caller that reads it
    pub value: Arc<V>,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Time-to-live measured from `created_at`
    pub ttl: Duration,
}

// Derived Clone would require `V: Clone`; only the Arc is cloned here.
impl<V> Clone for CacheEntry<V> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            created_at: self.created_at,
            ttl: self.ttl,
        }
    }
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with `now_ms`.
    pub fn new(value: V, now_ms: u64, ttl: Duration) -> Self {
        Self {
            value: Arc::new(value),
            created_at: now_ms,
            ttl,
        }
    }

    // == Expires At ==
    /// Returns the Unix millisecond timestamp at which the entry expires.
    pub fn expires_at(&self) -> u64 {
        self.created_at.saturating_add(self.ttl.as_millis() as u64)
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// An entry is valid iff `now < created_at + ttl`, so it is already
    /// expired at exactly `created_at + ttl`.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at()
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, `0` once expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at().saturating_sub(now_ms)
    }
}
