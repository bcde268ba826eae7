use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use storefront_media::{PLACEHOLDER_IMAGE, chemistry_icon};

use crate::commands::{load_service, runtime};
use crate::error::CliError;
use crate::spinner::FetchSpinner;

/// Show every field of one product.
pub(crate) fn run_product(id: &str, refresh: bool, quiet: bool) -> Result<(), CliError> {
    let service = load_service()?;
    let rt = runtime()?;

    let record = rt.block_on(async {
        let spinner = FetchSpinner::start("Loading catalog...", quiet);
        if refresh {
            service.get_catalog(true).await;
        }
        let record = service.get_product_by_id(id).await;
        spinner.finish();
        record
    });
    let record = record.ok_or_else(|| CliError::not_found(id))?;

    let label = |name: &str| format!("{name}:");

    log::info!("{}", record.name.if_supports_color(Stdout, |t| t.bold()));
    log::info!("");
    log::info!("  {} {}", label("Id").if_supports_color(Stdout, |t| t.cyan()), record.id);
    if let Some(short) = &record.short_name {
        log::info!("  {} {}", label("Short name").if_supports_color(Stdout, |t| t.cyan()), short);
    }
    log::info!("  {} {}", label("Category").if_supports_color(Stdout, |t| t.cyan()), record.category);
    log::info!(
        "  {} {}",
        label("Industries").if_supports_color(Stdout, |t| t.cyan()),
        record.industry.join(", ")
    );
    match &record.chemistry {
        Some(chem) => log::info!(
            "  {} {} {}",
            label("Chemistry").if_supports_color(Stdout, |t| t.cyan()),
            chem,
            format!("({})", chemistry_icon(chem)).if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => log::info!(
            "  {} {}",
            label("Chemistry").if_supports_color(Stdout, |t| t.cyan()),
            "not set".if_supports_color(Stdout, |t| t.yellow()),
        ),
    }
    log::info!(
        "  {} {}",
        label("Image").if_supports_color(Stdout, |t| t.cyan()),
        record.image_url.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    );
    if let Some(version) = &record.version {
        log::info!("  {} {}", label("Version").if_supports_color(Stdout, |t| t.cyan()), version);
    }

    if let Some(desc) = &record.description {
        log::info!("");
        log::info!("  {}", desc);
    }

    if !record.sizes.is_empty() {
        log::info!("");
        log::info!("  {}", "Sizes".if_supports_color(Stdout, |t| t.bold()));
        for size in &record.sizes {
            log::info!("    - {}", size);
        }
    }

    if !record.technical_data.is_empty() {
        log::info!("");
        log::info!("  {}", "Technical data".if_supports_color(Stdout, |t| t.bold()));
        let width = record.technical_data.keys().map(|k| k.chars().count()).max().unwrap_or(0);
        for (property, value) in &record.technical_data {
            log::info!("    {:<width$}  {}", property, value, width = width);
        }
    }

    Ok(())
}
