use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use storefront_media::{PLACEHOLDER_IMAGE, RetryController, RetryDecision, fallback_for};

use crate::commands::{load_service, runtime};
use crate::error::CliError;

/// Show a product's image URL and walk the retry chain for `failures`
/// simulated load errors.
pub(crate) fn run_image(id: &str, failures: usize) -> Result<(), CliError> {
    let service = load_service()?;
    let record = runtime()?
        .block_on(service.get_product_by_id(id))
        .ok_or_else(|| CliError::not_found(id))?;
    let images = service.images();

    log::info!("{}", record.name.if_supports_color(Stdout, |t| t.bold()));
    match images.storage_base() {
        Some(base) => log::info!(
            "  Topology: {} {}",
            "object storage".if_supports_color(Stdout, |t| t.cyan()),
            format!("({base})").if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => log::info!("  Topology: {}", "local".if_supports_color(Stdout, |t| t.cyan())),
    }
    if let Some(path) = fallback_for(&record.id) {
        log::info!("  Table entry: {}", path);
    }

    let Some(mut url) = record.image_url.clone() else {
        log::info!(
            "  Resolved: {} {}",
            PLACEHOLDER_IMAGE,
            "(no image)".if_supports_color(Stdout, |t| t.yellow()),
        );
        return Ok(());
    };
    log::info!("  Resolved: {}", url.if_supports_color(Stdout, |t| t.green()));

    let mut retries = RetryController::new();
    for n in 1..=failures {
        let candidates = images.retry_candidates(record.image_url.as_deref(), &record.id, &url);
        match retries.on_error(&record.id, &url, &candidates) {
            RetryDecision::Retry { url: next, attempt } => {
                log::info!(
                    "  Failure {}: retry {} with {}",
                    n,
                    attempt,
                    next.if_supports_color(Stdout, |t| t.cyan()),
                );
                url = next;
            }
            RetryDecision::Placeholder => {
                log::info!(
                    "  Failure {}: {} {}",
                    n,
                    "placeholder".if_supports_color(Stdout, |t| t.yellow()),
                    PLACEHOLDER_IMAGE,
                );
                break;
            }
        }
    }
    if failures > 0 {
        log::info!("  Final state: {:?}", retries.state(&record.id));
    }
    Ok(())
}
