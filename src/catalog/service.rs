//! Catalog service
//!
//! Binds the expiring cache to a catalog source under one fixed key.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats, Clock, ExpiringCache};
use crate::error::GenerationError;

use super::models::CatalogSnapshot;
use super::source::CatalogSource;

/// Cache key under which the product list is stored.
pub const PRODUCTS_KEY: &str = "products";

/// Serves the product catalog through the read-through cache.
pub struct CatalogService {
    cache: ExpiringCache<CatalogSnapshot>,
    source: Arc<dyn CatalogSource>,
}

impl CatalogService {
    /// Creates a service backed by the system clock.
    pub fn new(source: Arc<dyn CatalogSource>, ttl: Duration) -> Self {
        Self {
            cache: ExpiringCache::new(ttl),
            source,
        }
    }

    /// Creates a service whose cache reads time from `clock`.
    pub fn with_clock(source: Arc<dyn CatalogSource>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            cache: ExpiringCache::with_clock(ttl, clock),
            source,
        }
    }

    /// Returns the current catalog snapshot, regenerating it when stale.
    pub async fn products(&self) -> Result<Arc<CatalogSnapshot>, GenerationError> {
        let source = Arc::clone(&self.source);
        self.cache
            .get_or_generate(PRODUCTS_KEY, move || source.generate())
            .await
    }

    /// Returns the stored catalog entry without regenerating it.
    pub async fn current_entry(&self) -> Option<CacheEntry<CatalogSnapshot>> {
        self.cache.peek(PRODUCTS_KEY).await
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn ttl(&self) -> Duration {
        self.cache.ttl()
    }

    pub fn now_ms(&self) -> u64 {
        self.cache.now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::catalog::StaticCatalog;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TTL: Duration = Duration::from_secs(300);

    /// Counts calls and fails while `failing` is set.
    #[derive(Default)]
    struct ScriptedSource {
        calls: AtomicUsize,
        failing: std::sync::atomic::AtomicBool,
    }

    impl CatalogSource for ScriptedSource {
        fn generate(&self) -> Result<CatalogSnapshot, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                Err(GenerationError::new("upstream unavailable"))
            } else {
                StaticCatalog.generate()
            }
        }
    }

    fn service() -> (CatalogService, Arc<ScriptedSource>, Arc<ManualClock>) {
        let source = Arc::new(ScriptedSource::default());
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let service = CatalogService::with_clock(source.clone(), TTL, clock.clone());
        (service, source, clock)
    }

    #[tokio::test]
    async fn test_five_minute_scenario() {
        let (service, source, clock) = service();

        // t=0
        let first = service.products().await.unwrap();
        assert_eq!(first.len(), 4);
        let first_created = service.current_entry().await.unwrap().created_at;

        // t=4:59
        clock.advance(Duration::from_secs(4 * 60 + 59));
        let second = service.products().await.unwrap();
        assert_eq!(second, first);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(service.current_entry().await.unwrap().created_at, first_created);

        // t=5:01
        clock.advance(Duration::from_secs(2));
        let third = service.products().await.unwrap();
        assert_eq!(third, first);
        assert!(!Arc::ptr_eq(&third, &first));
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert!(service.current_entry().await.unwrap().created_at > first_created);
    }

    #[tokio::test]
    async fn test_generation_error_propagates() {
        let (service, source, clock) = service();

        let original = service.products().await.unwrap();
        let created_at = service.current_entry().await.unwrap().created_at;

        source.failing.store(true, Ordering::SeqCst);

        // Still valid: the failing source is not consulted
        clock.advance(Duration::from_secs(60));
        assert!(service.products().await.is_ok());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        // Expired: the error surfaces and the old entry is left in place
        clock.advance(Duration::from_secs(300));
        let err = service.products().await.unwrap_err();
        assert_eq!(err, GenerationError::new("upstream unavailable"));
        let entry = service.current_entry().await.unwrap();
        assert_eq!(entry.created_at, created_at);
        assert_eq!(*entry.value, *original);

        // Recovery retries immediately
        source.failing.store(false, Ordering::SeqCst);
        assert!(service.products().await.is_ok());
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_stats_reflect_lookups() {
        let (service, _source, _clock) = service();

        service.products().await.unwrap();
        service.products().await.unwrap();

        let stats = service.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.regenerations, 1);
    }
}
