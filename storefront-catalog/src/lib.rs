//! Catalog fetching, caching, and querying.
//!
//! [`CatalogService`] is the entry point: it serves an immutable
//! [`Snapshot`](storefront_core::Snapshot) of the product catalog, refetches
//! it once the cache window expires, and falls back to a bundled static
//! dataset when the remote service is unreachable. The [`filter`] module
//! narrows and orders snapshot records for listings.

pub mod cache;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod service;
pub mod source;

pub use cache::{Clock, FreshnessPolicy, ManualClock, SystemClock, is_fresh};
pub use config::{
    CatalogSettings, ConfigSource, ConfigSources, ImageSettings, StorefrontConfig, config_path,
    config_sources,
};
pub use dataset::StaticDataset;
pub use error::CatalogError;
pub use filter::{
    CatalogQuery, DEFAULT_INDUSTRY_PRIORITY, SortOrder, filter_by_category, filter_by_chemistry,
    filter_by_industry, industry_matches, industry_rank, parse_selection, search, sort_records,
};
pub use service::CatalogService;
pub use source::{CACHE_BUST_PARAM, CatalogSource, HttpCatalogSource, decode_catalog};
