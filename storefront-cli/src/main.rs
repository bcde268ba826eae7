//! storefront CLI
//!
//! Command-line interface for browsing the product catalog.

mod cli_types;
mod commands;
mod error;
mod spinner;

use std::io::Write;

use clap::Parser;
use log::LevelFilter;

use cli_types::{Cli, Commands, ConfigAction};

/// Crates whose log output is shown; everything else is held to warnings.
const LOG_TARGETS: &[&str] = &[
    "storefront",
    "storefront_core",
    "storefront_media",
    "storefront_catalog",
    "storefront_cli",
];

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Products { listing, refresh } => {
            commands::products::run_products(listing, refresh, cli.quiet)
        }
        Commands::Product { id, refresh } => {
            commands::product::run_product(&id, refresh, cli.quiet)
        }
        Commands::Image { id, fail } => commands::image::run_image(&id, fail),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

/// Plain messages at info level, level-tagged warnings, and timestamps in
/// verbose mode. `RUST_LOG` still overrides.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn);
    for target in LOG_TARGETS {
        builder.filter_module(target, level);
    }
    builder
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(move |buf, record| {
            if verbose {
                writeln!(
                    buf,
                    "{} {:<5} {}: {}",
                    buf.timestamp_millis(),
                    record.level(),
                    record.target(),
                    record.args()
                )
            } else {
                match record.level() {
                    log::Level::Error => writeln!(buf, "error: {}", record.args()),
                    log::Level::Warn => writeln!(buf, "warning: {}", record.args()),
                    _ => writeln!(buf, "{}", record.args()),
                }
            }
        })
        .init();
}
