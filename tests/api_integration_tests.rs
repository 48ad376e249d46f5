//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use catalog_cache::{
    api::create_router,
    cache::ManualClock,
    catalog::{CatalogService, CatalogSnapshot, CatalogSource, StaticCatalog},
    error::GenerationError,
    AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

const TTL: Duration = Duration::from_secs(300);

/// Static catalog that counts calls and can be switched into failure.
#[derive(Default)]
struct FlakySource {
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl CatalogSource for FlakySource {
    fn generate(&self) -> Result<CatalogSnapshot, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(GenerationError::new("inventory service down"));
        }
        StaticCatalog.generate()
    }
}

fn create_test_app() -> Router {
    create_router(AppState::with_source(Arc::new(StaticCatalog), TTL))
}

fn create_clocked_app() -> (Router, Arc<FlakySource>, Arc<ManualClock>) {
    let source = Arc::new(FlakySource::default());
    let clock = Arc::new(ManualClock::new(1_704_067_200_000));
    let service = CatalogService::with_clock(source.clone(), TTL, clock.clone());
    (create_router(AppState::new(service)), source, clock)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == Products Endpoint Tests ==

#[tokio::test]
async fn test_products_endpoint_wire_format() {
    let app = create_test_app();

    let (status, json) = get(&app, "/api/products").await;

    assert_eq!(status, StatusCode::OK);
    let products = json.as_array().unwrap();
    assert_eq!(products.len(), 4);
    assert_eq!(
        products[0],
        json!({
            "id": 1,
            "name": "Laptop",
            "price": 1299.99,
            "stock": 25,
            "category": { "id": 101, "name": "Electronics" }
        })
    );

    let ids: Vec<u64> = products.iter().map(|p| p["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(products[3]["category"]["name"], "Accessories");
}

#[tokio::test]
async fn test_products_cached_within_ttl() {
    let (app, source, clock) = create_clocked_app();

    let (_, first) = get(&app, "/api/products").await;
    clock.advance(Duration::from_secs(4 * 60 + 59));
    let (_, second) = get(&app, "/api/products").await;

    assert_eq!(first, second);
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_products_regenerated_after_ttl() {
    let (app, source, clock) = create_clocked_app();

    let (_, first) = get(&app, "/api/products").await;
    let (_, stats_before) = get(&app, "/stats").await;

    clock.advance(Duration::from_secs(5 * 60 + 1));
    let (status, second) = get(&app, "/api/products").await;
    let (_, stats_after) = get(&app, "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    assert_ne!(
        stats_before["entry"]["createdAt"],
        stats_after["entry"]["createdAt"]
    );
    assert_eq!(stats_after["entry"]["createdAt"], "2024-01-01T00:05:01+00:00");
}

#[tokio::test]
async fn test_generation_failure_returns_500() {
    let (app, source, _clock) = create_clocked_app();
    source.failing.store(true, Ordering::SeqCst);

    let (status, json) = get(&app, "/api/products").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("inventory service down"));

    // Failures are not cached; recovery is immediate
    source.failing.store(false, Ordering::SeqCst);
    let (status, _) = get(&app, "/api/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_failed_regeneration_keeps_previous_entry() {
    let (app, source, clock) = create_clocked_app();

    get(&app, "/api/products").await;
    let (_, before) = get(&app, "/stats").await;

    clock.advance(Duration::from_secs(301));
    source.failing.store(true, Ordering::SeqCst);
    let (status, _) = get(&app, "/api/products").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, after) = get(&app, "/stats").await;
    assert_eq!(before["entry"]["createdAt"], after["entry"]["createdAt"]);
    assert_eq!(after["entry"]["expired"], true);
    assert_eq!(after["generationFailures"], 1);
}

#[tokio::test]
async fn test_concurrent_requests() {
    let app = create_test_app();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = app.clone();
        handles.push(tokio::spawn(async move { get(&app, "/api/products").await }));
    }

    for handle in handles {
        let (status, json) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 4);
    }
}

// == Stats Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let (app, _source, clock) = create_clocked_app();

    let (status, json) = get(&app, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 0);
    assert_eq!(json["misses"], 0);
    assert_eq!(json["ttlSecs"], 300);
    assert!(json["entry"].is_null());

    get(&app, "/api/products").await;
    get(&app, "/api/products").await;
    clock.advance(Duration::from_secs(60));

    let (_, json) = get(&app, "/stats").await;
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["regenerations"], 1);
    assert_eq!(json["hitRate"], 0.5);
    assert_eq!(json["entry"]["ttlRemainingSecs"], 240);
    assert_eq!(json["entry"]["expired"], false);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, json) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Error Handling Tests ==

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = create_test_app();

    let (status, json) = get(&app, "/api/productlist/7").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("/api/productlist/7"));
}
