use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use storefront_catalog::{ConfigSource, StorefrontConfig};

use crate::error::CliError;

fn secs(d: std::time::Duration) -> String {
    format!("{}s", d.as_secs())
}

/// Show the resolved configuration and where each value comes from.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = storefront_catalog::config_path();
    let sources = storefront_catalog::config_sources();
    let config = StorefrontConfig::load()?;

    log::info!(
        "{}",
        "Storefront Catalog Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    log::info!("");

    let catalog = &config.catalog;
    let fields: &[(&str, &ConfigSource, Option<String>)] = &[
        ("endpoint", &sources.endpoint, catalog.endpoint.clone()),
        ("ttl", &sources.ttl, Some(secs(catalog.ttl))),
        ("fallback_retry", &sources.fallback_retry, Some(secs(catalog.fallback_retry))),
        ("timeout", &sources.timeout, Some(secs(catalog.timeout))),
        (
            "static_dataset",
            &sources.static_dataset,
            catalog.static_dataset.as_ref().map(|p| p.display().to_string()),
        ),
        ("storage_base", &sources.storage_base, config.images.storage_base.clone()),
    ];

    for (name, source, value) in fields {
        let source_str = format!("({})", source);
        match value {
            Some(v) => {
                log::info!(
                    "  {} {} {}",
                    format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                    v,
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
            None => {
                log::info!(
                    "  {} {} {}",
                    format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                    "not set".if_supports_color(Stdout, |t| t.yellow()),
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }

    if catalog.endpoint.is_none() {
        log::info!("");
        log::info!(
            "  {}",
            "No endpoint set: the bundled static dataset is served."
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    let path = storefront_catalog::config_path()
        .ok_or_else(|| CliError::config("Could not determine config directory"))?;
    log::info!("{}", path.display());
    Ok(())
}
