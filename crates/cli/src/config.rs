//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPFRONT_DATA_DIR` - Directory holding the persisted cart, orders, and
//!   session (default: `.shopfront`)
//! - `SHOPFRONT_CATALOG` - JSON catalog file replacing the built-in products
//! - `SHOPFRONT_MAX_PRICE` - Default upper bound of the price filter (default: 1000)
//! - `SHOPFRONT_LOG_FORMAT` - `text` or `json` (default: text)
//! - `RUST_LOG` - Tracing filter (default: `shopfront_cli=warn,shopfront_store=warn`)

use std::path::PathBuf;

use shopfront_core::Price;
use shopfront_store::{Catalog, CatalogError, ProductFilter};
use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".shopfront";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// CLI application configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Directory for the file-backed store
    pub data_dir: PathBuf,
    /// Custom catalog file, if any
    pub catalog_path: Option<PathBuf>,
    /// Default upper bound for the price filter
    pub max_price: Price,
    /// Tracing output format
    pub log_format: LogFormat,
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("SHOPFRONT_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let catalog_path = lookup("SHOPFRONT_CATALOG")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let max_price = match lookup("SHOPFRONT_MAX_PRICE") {
            Some(raw) => raw.parse::<Price>().map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPFRONT_MAX_PRICE".to_string(), e.to_string())
            })?,
            None => Price::from_whole(ProductFilter::DEFAULT_MAX_PRICE),
        };

        let log_format = match lookup("SHOPFRONT_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("" | "text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "SHOPFRONT_LOG_FORMAT".to_string(),
                    format!("expected `text` or `json`, got `{other}`"),
                ));
            }
        };

        Ok(Self {
            data_dir,
            catalog_path,
            max_price,
            log_format,
        })
    }

    /// The configured catalog: the custom file if set, otherwise the built-in one.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the custom catalog cannot be loaded.
    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        self.catalog_path
            .as_deref()
            .map_or_else(|| Ok(Catalog::builtin()), Catalog::load)
    }
}
