//! Catalog Cache - A product catalog server
//!
//! Serves a fixed product catalog through a read-through cache with a
//! five-minute absolute TTL.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use config::Config;
