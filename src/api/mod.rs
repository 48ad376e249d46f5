//! API Module
//!
//! HTTP handlers and routing for the catalog server.
//!
//! # Endpoints
//! - `GET /api/products` - Cached product catalog
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
