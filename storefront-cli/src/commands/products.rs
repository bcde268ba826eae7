use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use storefront_catalog::{CatalogQuery, DEFAULT_INDUSTRY_PRIORITY, SortOrder, industry_rank};
use storefront_core::CatalogRecord;

use crate::cli_types::ListingArgs;
use crate::commands::{fetch_catalog, load_service, log_snapshot_origin, runtime};
use crate::error::CliError;

fn build_query(listing: &ListingArgs) -> CatalogQuery {
    let mut query = CatalogQuery::new()
        .industries(listing.industry.iter().cloned())
        .categories(listing.category.iter().cloned())
        .chemistries(listing.chemistry.iter().cloned())
        .order(if listing.desc {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        });
    if let Some(term) = &listing.search {
        query = query.search(term.clone());
    }
    if listing.group_by_industry {
        query = query.group_by_industry(DEFAULT_INDUSTRY_PRIORITY.iter().copied());
    }
    query
}

/// List products matching the given filters.
pub(crate) fn run_products(listing: ListingArgs, refresh: bool, quiet: bool) -> Result<(), CliError> {
    let service = load_service()?;
    let snapshot = runtime()?.block_on(fetch_catalog(&service, refresh, quiet));
    log_snapshot_origin(&snapshot);

    let query = build_query(&listing);
    let results = query.apply(snapshot.records());
    let shown = listing.limit.unwrap_or(results.len()).min(results.len());

    let priority: Vec<String> = DEFAULT_INDUSTRY_PRIORITY.iter().map(|s| s.to_string()).collect();

    log::info!("");
    let mut current_group: Option<&str> = None;
    for record in &results[..shown] {
        if listing.group_by_industry {
            let group = DEFAULT_INDUSTRY_PRIORITY
                .get(industry_rank(record, &priority))
                .copied()
                .unwrap_or("other");
            if current_group != Some(group) {
                if current_group.is_some() {
                    log::info!("");
                }
                log::info!("{}:", group.if_supports_color(Stdout, |t| t.bold()));
                current_group = Some(group);
            }
        }
        log_record_line(record);
    }

    log::info!("");
    if shown < results.len() {
        log::info!(
            "Showing {} of {} matching products ({} in catalog)",
            shown,
            results.len(),
            snapshot.len()
        );
    } else {
        log::info!("{} matching products ({} in catalog)", results.len(), snapshot.len());
    }
    Ok(())
}

fn log_record_line(record: &CatalogRecord) {
    log::info!(
        "  {} {} [{}]{}",
        format!("{:<10}", record.id).if_supports_color(Stdout, |t| t.cyan()),
        record.name,
        record.category,
        record
            .chemistry
            .as_deref()
            .map(|c| format!(" {}", c.if_supports_color(Stdout, |t| t.dimmed())))
            .unwrap_or_default(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_from_flags() {
        let listing = ListingArgs {
            industry: vec!["marine".to_string()],
            desc: true,
            search: Some("tape".to_string()),
            group_by_industry: true,
            ..Default::default()
        };
        let query = build_query(&listing);
        assert_eq!(query.industries, vec!["marine"]);
        assert_eq!(query.order, SortOrder::Descending);
        assert_eq!(query.search.as_deref(), Some("tape"));
        assert_eq!(
            query.industry_priority.as_ref().map(Vec::len),
            Some(DEFAULT_INDUSTRY_PRIORITY.len())
        );
    }

    #[test]
    fn test_default_listing_is_unfiltered() {
        let query = build_query(&ListingArgs::default());
        assert_eq!(query, CatalogQuery::new());
    }
}
