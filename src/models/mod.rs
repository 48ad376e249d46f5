//! Response models for the catalog server API
//!
//! DTOs serialized into the bodies of the service endpoints other than the
//! product list itself.

pub mod responses;

// Re-export commonly used types
pub use responses::{EntryStatus, ErrorResponse, HealthResponse, StatsResponse};
