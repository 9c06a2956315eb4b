//! # Host Configuration
//!
//! Where the terminal host keeps its cart slot, cart settings and product
//! catalog. Values come from the environment (a `.env` file is honoured) and
//! can be overridden on the command line.

use cart_core::{CartConfig, CartError, ProductCatalog};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default directory for the file-backed storage slot
pub const DEFAULT_DATA_DIR: &str = ".tara-cart";

/// Catalog locations tried when `CART_CATALOG` is not set
const CATALOG_SEARCH_PATHS: [&str; 3] = [
    "config/products.toml",
    "../config/products.toml",
    "../../config/products.toml",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {}: {source}", path.display())]
    Catalog {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Host configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Directory holding the storage slot file
    pub data_dir: PathBuf,
    /// Optional cart settings (TOML)
    pub cart_config: Option<PathBuf>,
    /// Optional product catalog (TOML)
    pub catalog: Option<PathBuf>,
}

impl HostConfig {
    /// Load from environment variables
    ///
    /// - `CART_DATA_DIR` (default `.tara-cart`)
    /// - `CART_CONFIG`
    /// - `CART_CATALOG`
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            data_dir: std::env::var("CART_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
            cart_config: std::env::var("CART_CONFIG").ok().map(PathBuf::from),
            catalog: std::env::var("CART_CATALOG").ok().map(PathBuf::from),
        }
    }

    /// Apply command-line overrides
    pub fn with_overrides(
        mut self,
        data_dir: Option<PathBuf>,
        cart_config: Option<PathBuf>,
        catalog: Option<PathBuf>,
    ) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if cart_config.is_some() {
            self.cart_config = cart_config;
        }
        if catalog.is_some() {
            self.catalog = catalog;
        }
        self
    }

    /// Cart settings, defaults when no file is configured
    pub fn load_cart_config(&self) -> Result<CartConfig, ConfigError> {
        match &self.cart_config {
            Some(path) => Ok(CartConfig::from_toml(&read(path)?)?),
            None => Ok(CartConfig::default()),
        }
    }

    /// Product catalog from the configured path, or the first of the
    /// conventional locations that exists. Empty if none is found.
    pub fn load_catalog(&self) -> Result<ProductCatalog, ConfigError> {
        if let Some(path) = &self.catalog {
            return parse_catalog(path, &read(path)?);
        }

        for path in CATALOG_SEARCH_PATHS {
            let path = Path::new(path);
            if let Ok(content) = std::fs::read_to_string(path) {
                return parse_catalog(path, &content);
            }
        }

        tracing::warn!("No product catalog found, using empty catalog");
        Ok(ProductCatalog::new())
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_catalog(path: &Path, content: &str) -> Result<ProductCatalog, ConfigError> {
    let catalog = ProductCatalog::from_toml(content).map_err(|source| ConfigError::Catalog {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Loaded {} products from {}", catalog.products.len(), path.display());
    Ok(catalog)
}
