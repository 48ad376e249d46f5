//! Response DTOs for the catalog server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::{CacheEntry, CacheStats};

/// Formats a Unix millisecond timestamp as RFC 3339.
fn rfc3339_from_ms(ms: u64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms as i64)
        .map(|t| t.to_rfc3339())
        .unwrap_or_default()
}

/// State of the stored catalog entry, as reported by `GET /stats`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryStatus {
    /// When the snapshot was generated (RFC 3339)
    pub created_at: String,
    /// When the snapshot stops being served (RFC 3339)
    pub expires_at: String,
    /// Seconds until expiry, 0 once expired
    pub ttl_remaining_secs: u64,
    /// Whether the next lookup will regenerate
    pub expired: bool,
}

impl EntryStatus {
    /// Describes `entry` as seen at `now_ms`.
    pub fn from_entry<V>(entry: &CacheEntry<V>, now_ms: u64) -> Self {
        Self {
            created_at: rfc3339_from_ms(entry.created_at),
            expires_at: rfc3339_from_ms(entry.expires_at()),
            ttl_remaining_secs: entry.ttl_remaining_ms(now_ms) / 1000,
            expired: entry.is_expired(now_ms),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Lookups served from cache
    pub hits: u64,
    /// Lookups that had to regenerate
    pub misses: u64,
    /// Successful regenerations
    pub regenerations: u64,
    /// Failed regenerations
    pub generation_failures: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Configured cache lifetime in seconds
    pub ttl_secs: u64,
    /// Stored entry, if any has been generated yet
    pub entry: Option<EntryStatus>,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: CacheStats, ttl_secs: u64, entry: Option<EntryStatus>) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            regenerations: stats.regenerations,
            generation_failures: stats.generation_failures,
            hit_rate: stats.hit_rate(),
            ttl_secs,
            entry,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
