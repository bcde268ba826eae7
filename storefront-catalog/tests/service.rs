use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use storefront_catalog::{
    CatalogError, CatalogService, CatalogSource, FreshnessPolicy, ManualClock, StaticDataset,
};
use storefront_core::SnapshotOrigin;
use storefront_media::ImageResolver;

/// In-memory catalog source that counts calls and can be switched to fail.
struct FakeSource {
    values: Vec<Value>,
    calls: AtomicUsize,
    busts: AtomicUsize,
    failing: AtomicBool,
    delay: Duration,
}

impl FakeSource {
    fn new(values: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            values,
            calls: AtomicUsize::new(0),
            busts: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
            delay: Duration::ZERO,
        })
    }

    fn slow(values: Vec<Value>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            values,
            calls: AtomicUsize::new(0),
            busts: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
            delay,
        })
    }

    fn failing() -> Arc<Self> {
        let source = Self::new(Vec::new());
        source.failing.store(true, Ordering::SeqCst);
        source
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CatalogSource for FakeSource {
    async fn fetch(&self, cache_bust: bool) -> Result<Vec<Value>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if cache_bust {
            self.busts.fetch_add(1, Ordering::SeqCst);
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(CatalogError::Status {
                status: 503,
                url: "https://catalog.test/products".to_string(),
            });
        }
        Ok(self.values.clone())
    }
}

fn live_products() -> Vec<Value> {
    vec![
        json!({"id": "OA75", "name": "ForzaBOND OA75", "brand": "forza_bond", "industry": ["industrial"]}),
        json!({"id": "T215", "name": "ForzaTAPE T215", "brand": "forza_tape", "industry": ["marine_industry"], "imageUrl": "t215.png"}),
        json!({"id": "X1", "name": "Retired", "isActive": false}),
    ]
}

type TestService = CatalogService<Arc<FakeSource>, Arc<ManualClock>>;

fn service(source: &Arc<FakeSource>) -> (TestService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()));
    let service = CatalogService::with_clock(
        Arc::clone(source),
        ImageResolver::new(Some("https://storage.example.com".to_string())),
        StaticDataset::bundled(),
        FreshnessPolicy::default(),
        Arc::clone(&clock),
    );
    (service, clock)
}

#[tokio::test]
async fn test_second_call_within_ttl_uses_cache() {
    let source = FakeSource::new(live_products());
    let (service, clock) = service(&source);

    let first = service.get_catalog(false).await;
    clock.advance(Duration::from_secs(299));
    let second = service.get_catalog(false).await;

    assert_eq!(source.calls(), 1);
    assert_eq!(service.fetch_count(), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.origin(), SnapshotOrigin::Live);
}

#[tokio::test]
async fn test_refetch_after_ttl() {
    let source = FakeSource::new(live_products());
    let (service, clock) = service(&source);

    service.get_catalog(false).await;
    clock.advance(Duration::from_secs(300));
    service.get_catalog(false).await;

    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_force_refresh_bypasses_cache_and_busts() {
    let source = FakeSource::new(live_products());
    let (service, _clock) = service(&source);

    let old = service.get_catalog(false).await;
    let new = service.get_catalog(true).await;

    assert_eq!(source.calls(), 2);
    assert_eq!(source.busts.load(Ordering::SeqCst), 1);
    assert!(!Arc::ptr_eq(&old, &new));
    // the replaced snapshot is untouched
    assert_eq!(old.len(), new.len());
}

#[tokio::test]
async fn test_failed_fetch_serves_static_dataset() {
    let source = FakeSource::failing();
    let (service, _clock) = service(&source);

    let snapshot = service.get_catalog(false).await;

    assert_eq!(snapshot.origin(), SnapshotOrigin::Fallback);
    assert!(!snapshot.is_empty());
    assert!(snapshot.get("T215").is_some());
    // inactive products in the dataset are excluded
    assert!(snapshot.get("T350").is_none());
}

#[tokio::test]
async fn test_fallback_retries_network_after_window() {
    let source = FakeSource::failing();
    let (service, clock) = service(&source);

    service.get_catalog(false).await;
    clock.advance(Duration::from_secs(10));
    service.get_catalog(false).await;
    assert_eq!(source.calls(), 1);

    source.failing.store(false, Ordering::SeqCst);
    clock.advance(Duration::from_secs(20));
    let snapshot = service.get_catalog(false).await;

    assert_eq!(source.calls(), 2);
    assert_eq!(snapshot.origin(), SnapshotOrigin::Live);
    assert_eq!(snapshot.len(), 2);
}

#[tokio::test]
async fn test_concurrent_misses_share_one_fetch() {
    let source = FakeSource::slow(live_products(), Duration::from_millis(20));
    let (service, _clock) = service(&source);

    let snapshots = futures::future::join_all((0..8).map(|_| service.get_catalog(false))).await;

    assert_eq!(source.calls(), 1);
    assert_eq!(service.fetch_count(), 1);
    assert!(snapshots.iter().all(|s| Arc::ptr_eq(s, &snapshots[0])));
}

#[tokio::test]
async fn test_product_by_id() {
    let source = FakeSource::new(live_products());
    let (service, _clock) = service(&source);

    let product = service.get_product_by_id("oa75").await;
    assert_eq!(product.map(|p| p.name), Some("ForzaBOND OA75".to_string()));

    let t215 = service.get_product_by_id("T215").await;
    assert_eq!(
        t215.and_then(|p| p.image_url).as_deref(),
        Some("https://storage.example.com/product-images/Marine/t215.png")
    );

    assert!(service.get_product_by_id("NOPE").await.is_none());
    assert!(service.get_product_by_id("X1").await.is_none());
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_product_by_id_during_outage() {
    let source = FakeSource::failing();
    let (service, _clock) = service(&source);

    let product = service.get_product_by_id("oa75").await;
    assert!(product.is_some());
    assert!(service.snapshot().is_some());
}
