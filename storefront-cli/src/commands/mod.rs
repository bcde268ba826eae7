pub(crate) mod config;
pub(crate) mod image;
pub(crate) mod product;
pub(crate) mod products;

use std::sync::Arc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use storefront_catalog::{CatalogService, HttpCatalogSource, StorefrontConfig};
use storefront_core::{Snapshot, SnapshotOrigin};

use crate::error::CliError;
use crate::spinner::FetchSpinner;

pub(crate) type Service = CatalogService<HttpCatalogSource>;

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new().map_err(|e| CliError::runtime(e.to_string()))
}

/// Build the catalog service from env, config file, and defaults.
pub(crate) fn load_service() -> Result<Service, CliError> {
    let config = StorefrontConfig::load()?;
    if config.catalog.endpoint.is_none() {
        log::debug!("No catalog endpoint configured; the static dataset will be served");
    }
    Ok(CatalogService::from_config(&config)?)
}

/// Fetch the catalog behind a spinner.
pub(crate) async fn fetch_catalog(service: &Service, refresh: bool, quiet: bool) -> Arc<Snapshot> {
    let spinner = FetchSpinner::start("Loading catalog...", quiet);
    let snapshot = service.get_catalog(refresh).await;
    spinner.finish();
    snapshot
}

/// One-line summary of where the snapshot came from.
pub(crate) fn log_snapshot_origin(snapshot: &Snapshot) {
    let fetched = snapshot
        .fetched_at()
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M:%S");
    match snapshot.origin() {
        SnapshotOrigin::Live => log::info!(
            "{} {} products, fetched {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            snapshot.len(),
            fetched,
        ),
        SnapshotOrigin::Fallback => log::warn!(
            "{} Catalog service unavailable; showing {} products from the static dataset",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            snapshot.len(),
        ),
    }
}
