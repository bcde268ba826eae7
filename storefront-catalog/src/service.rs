//! The catalog orchestrator: cache, single-flight fetch, and static fallback.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use storefront_core::{CatalogRecord, NormalizeReport, Snapshot, SnapshotOrigin, normalize_records};
use storefront_media::ImageResolver;
use tokio::sync::Mutex;

use crate::cache::{Clock, FreshnessPolicy, SystemClock, is_fresh};
use crate::config::StorefrontConfig;
use crate::dataset::StaticDataset;
use crate::error::CatalogError;
use crate::source::{CatalogSource, HttpCatalogSource};

/// Owns the current catalog snapshot and decides when to refetch it.
///
/// Readers get an `Arc<Snapshot>`; a refresh swaps in a new snapshot and never
/// touches the old one. Concurrent callers that miss the cache share a single
/// fetch.
pub struct CatalogService<S, C = SystemClock> {
    source: S,
    clock: C,
    images: ImageResolver,
    dataset: StaticDataset,
    policy: FreshnessPolicy,
    current: RwLock<Option<Arc<Snapshot>>>,
    fetch_lock: Mutex<()>,
    /// Bumped each time a fetch completes.
    generation: AtomicU64,
    fetches: AtomicU64,
}

impl CatalogService<HttpCatalogSource> {
    /// Build a service that fetches over HTTP as configured.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, CatalogError> {
        let source = HttpCatalogSource::from_settings(&config.catalog)?;
        Ok(Self::new(
            source,
            ImageResolver::new(config.images.storage_base.clone()),
            StaticDataset::with_override(config.catalog.static_dataset.clone()),
            config.freshness(),
        ))
    }
}

impl<S: CatalogSource> CatalogService<S> {
    pub fn new(
        source: S,
        images: ImageResolver,
        dataset: StaticDataset,
        policy: FreshnessPolicy,
    ) -> Self {
        Self::with_clock(source, images, dataset, policy, SystemClock)
    }
}

impl<S: CatalogSource, C: Clock> CatalogService<S, C> {
    pub fn with_clock(
        source: S,
        images: ImageResolver,
        dataset: StaticDataset,
        policy: FreshnessPolicy,
        clock: C,
    ) -> Self {
        Self {
            source,
            clock,
            images,
            dataset,
            policy,
            current: RwLock::new(None),
            fetch_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
            fetches: AtomicU64::new(0),
        }
    }

    /// Return the catalog, fetching it when the cached snapshot is missing,
    /// stale, or `force_refresh` is set. Never fails: a failed fetch yields a
    /// snapshot built from the static dataset.
    pub async fn get_catalog(&self, force_refresh: bool) -> Arc<Snapshot> {
        // Read before the freshness check so a fetch that completes in between
        // is seen as already done.
        let observed = self.generation.load(Ordering::Acquire);

        if !force_refresh {
            if let Some(snapshot) = self.fresh_snapshot() {
                return snapshot;
            }
        }

        let _guard = self.fetch_lock.lock().await;

        if self.generation.load(Ordering::Acquire) != observed {
            if let Some(snapshot) = self.snapshot() {
                log::debug!("Sharing catalog fetched by a concurrent caller");
                return snapshot;
            }
        }

        let snapshot = Arc::new(self.load_snapshot(force_refresh).await);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&snapshot));
        self.generation.fetch_add(1, Ordering::AcqRel);
        snapshot
    }

    /// Look up one product. Checks the current snapshot first, then falls
    /// through to [`get_catalog`](Self::get_catalog). `None` means not found.
    pub async fn get_product_by_id(&self, id: &str) -> Option<CatalogRecord> {
        if let Some(record) = self.snapshot().and_then(|s| s.get(id).cloned()) {
            return Some(record);
        }
        self.get_catalog(false).await.get(id).cloned()
    }

    /// The current snapshot, fresh or not, without fetching.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn images(&self) -> &ImageResolver {
        &self.images
    }

    /// Number of times the source has been asked for the catalog.
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }

    fn fresh_snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot()
            .filter(|s| is_fresh(s, self.clock.now(), &self.policy))
    }

    async fn load_snapshot(&self, cache_bust: bool) -> Snapshot {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        match self.source.fetch(cache_bust).await {
            Ok(values) => {
                let (records, report) = normalize_records(values, &self.images);
                log_report(SnapshotOrigin::Live, &report);
                Snapshot::new(records, self.clock.now(), SnapshotOrigin::Live)
            }
            Err(e) => {
                log::warn!("Catalog fetch failed, serving static dataset: {e}");
                let (records, report) = normalize_records(self.dataset.values(), &self.images);
                log_report(SnapshotOrigin::Fallback, &report);
                Snapshot::new(records, self.clock.now(), SnapshotOrigin::Fallback)
            }
        }
    }
}

fn log_report(origin: SnapshotOrigin, report: &NormalizeReport) {
    log::info!(
        "Loaded {} products ({origin}); dropped {} malformed, {} inactive",
        report.accepted,
        report.dropped_malformed,
        report.dropped_inactive,
    );
    if !report.duplicates.is_empty() {
        log::warn!(
            "{} duplicate product ids in {origin} catalog: {}",
            report.duplicates.len(),
            report.duplicates.join(", ")
        );
    }
}
