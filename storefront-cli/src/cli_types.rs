//! CLI type definitions: command enums and argument structs.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Browse the product catalog and inspect image resolution", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filter and sort options for product listings.
#[derive(Args, Clone, Default)]
pub(crate) struct ListingArgs {
    /// Industries to include (e.g., marine,construction)
    #[arg(short, long, value_delimiter = ',')]
    pub industry: Vec<String>,

    /// Categories to include (adhesive, sealant, tape, cleaner, other)
    #[arg(short, long, value_delimiter = ',')]
    pub category: Vec<String>,

    /// Chemistry labels to include, matched exactly (e.g., "MS Polymer")
    #[arg(long, value_delimiter = ',')]
    pub chemistry: Vec<String>,

    /// Free-text search over name, description, and id
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort names Z to A
    #[arg(long)]
    pub desc: bool,

    /// Group results by industry before sorting by name
    #[arg(long)]
    pub group_by_industry: bool,

    /// Maximum number of products to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List products, optionally filtered and sorted
    Products {
        #[command(flatten)]
        listing: ListingArgs,

        /// Bypass the cache and refetch the catalog
        #[arg(long)]
        refresh: bool,
    },

    /// Show one product in detail
    Product {
        /// Product id (case-insensitive)
        id: String,

        /// Bypass the cache and refetch the catalog
        #[arg(long)]
        refresh: bool,
    },

    /// Show how a product's image URL resolves and degrades on failure
    Image {
        /// Product id (case-insensitive)
        id: String,

        /// Simulate this many consecutive load failures
        #[arg(long, default_value_t = 0)]
        fail: usize,
    },

    /// Show catalog configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current configuration and where each value comes from
    Show,

    /// Print the config file path
    Path,
}
