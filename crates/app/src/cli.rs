use std::path::PathBuf;

use clap::{Parser, Subcommand};
use storefront_core::ProductId;
use storefront_observability::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "storefront", version, about = "Browse the catalog and manage your cart")]
pub struct Cli {
    #[arg(long, global = true, help = "Catalog base URL (overrides STOREFRONT_API_URL)")]
    pub api_url: Option<String>,
    #[arg(long, global = true, help = "Cart storage directory (overrides STOREFRONT_DATA_DIR)")]
    pub data_dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Log format: json or compact")]
    pub log_format: Option<LogFormat>,
    #[arg(long, global = true, help = "Keep the cart in memory for this run only")]
    pub ephemeral: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List the catalog.
    Products,
    /// Add a product to the cart (negative quantities take items out).
    Add {
        id: ProductId,
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        qty: i64,
    },
    /// Remove a product from the cart.
    Remove { id: ProductId },
    /// Set the quantity of a product already in the cart (0 removes it).
    Set {
        id: ProductId,
        #[arg(allow_negative_numbers = true)]
        qty: i64,
    },
    /// Empty the cart.
    Clear,
    /// Show the cart.
    Cart,
    /// Show the order summary and place the order.
    Checkout,
}
