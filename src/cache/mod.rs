//! Cache Module
//!
//! Provides a read-through in-memory cache with absolute TTL expiration.

mod clock;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::ExpiringCache;

// == Public Constants ==
/// Default lifetime of a cached snapshot in seconds
pub const DEFAULT_TTL_SECS: u64 = 5 * 60;
