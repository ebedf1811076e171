//! Application configuration.
//!
//! Resolution order: built-in defaults, then environment, then command-line
//! flags.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use storefront_cart::{CartPersistence, FileKeyValueStore};
use storefront_observability::LogFormat;
use storefront_products::DEFAULT_CATALOG_URL;

use crate::cli::Cli;

pub const ENV_API_URL: &str = "STOREFRONT_API_URL";
pub const ENV_DATA_DIR: &str = "STOREFRONT_DATA_DIR";
pub const ENV_LOG_FORMAT: &str = "STOREFRONT_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalog base URL (`{api_url}/products`).
    pub api_url: String,
    /// Where the cart slot lives. `None` means the OS data directory.
    pub data_dir: Option<PathBuf>,
    pub log_format: LogFormat,
    /// Keep the cart in memory only.
    pub ephemeral: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_CATALOG_URL.to_string(),
            data_dir: None,
            log_format: LogFormat::default(),
            ephemeral: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config.api_url = url;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = lookup(ENV_LOG_FORMAT) {
            match raw.parse() {
                Ok(format) => config.log_format = format,
                // Logging is not up yet; stderr is all we have.
                Err(err) => eprintln!("ignoring {ENV_LOG_FORMAT}: {err}"),
            }
        }

        config
    }

    /// Apply command-line overrides.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.api_url {
            self.api_url = url.clone();
        }
        if let Some(dir) = &cli.data_dir {
            self.data_dir = Some(dir.clone());
        }
        if let Some(format) = cli.log_format {
            self.log_format = format;
        }
        if cli.ephemeral {
            self.ephemeral = true;
        }
        self
    }

    /// Persistence for the configured storage location.
    pub fn persistence(&self) -> anyhow::Result<CartPersistence> {
        if self.ephemeral {
            return Ok(CartPersistence::in_memory());
        }

        let store = match &self.data_dir {
            Some(dir) => FileKeyValueStore::new(dir),
            None => FileKeyValueStore::open_default()
                .context("failed to determine cart storage directory")?,
        };
        tracing::debug!(dir = %store.dir().display(), "using file-backed cart storage");
        Ok(CartPersistence::new(Arc::new(store)))
    }
}
