//! API Handlers
//!
//! HTTP request handlers for each catalog server endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::Uri, Json};

use crate::catalog::{CatalogService, CatalogSnapshot, CatalogSource, StaticCatalog};
use crate::error::{CatalogError, Result};
use crate::models::{EntryStatus, HealthResponse, StatsResponse};

/// Application state shared across all handlers.
///
/// Holds the one catalog service instance every request reads through.
#[derive(Clone)]
pub struct AppState {
    /// Cached catalog service
    pub catalog: Arc<CatalogService>,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(catalog: CatalogService) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Serves the built-in catalog with the configured cache lifetime.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::with_source(Arc::new(StaticCatalog), config.cache_ttl())
    }

    /// Creates a new AppState serving `source` with the system clock.
    pub fn with_source(source: Arc<dyn CatalogSource>, ttl: Duration) -> Self {
        Self::new(CatalogService::new(source, ttl))
    }
}

/// Handler for GET /api/products
///
/// Returns the product catalog, regenerating the cached copy when it has
/// expired.
pub async fn products_handler(
    State(state): State<AppState>,
) -> Result<Json<Arc<CatalogSnapshot>>> {
    let products = state.catalog.products().await?;
    Ok(Json(products))
}

/// Handler for GET /stats
///
/// Returns cache counters and the state of the stored catalog entry.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let now = state.catalog.now_ms();
    let entry = state
        .catalog
        .current_entry()
        .await
        .map(|entry| EntryStatus::from_entry(&entry, now));

    Json(StatsResponse::new(
        state.catalog.stats(),
        state.catalog.ttl().as_secs(),
        entry,
    ))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Fallback for unknown routes.
pub async fn not_found_handler(uri: Uri) -> CatalogError {
    CatalogError::NotFound(uri.path().to_string())
}
