//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shelf_commerce::search::DEFAULT_PAGE_SIZE;
use shelf_data::{ClientConfig, DEFAULT_PRODUCTS_PATH};
use shelf_observability::{LogFormat, LogLevel};

/// Config file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["shelf.toml", ".shelf.toml", "shelf.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShelfConfig {
    /// Catalog service connection.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Listing behaviour.
    #[serde(default)]
    pub browse: BrowseConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ShelfConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Client settings derived from `[catalog]`.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: self.catalog.timeout_ms.map(Duration::from_millis),
            empty_on_not_found: self.catalog.empty_on_not_found,
        }
    }

    pub fn log_format(&self) -> Result<LogFormat> {
        self.logging
            .format
            .parse()
            .map_err(anyhow::Error::msg)
            .context("Invalid logging.format")
    }

    pub fn log_level(&self) -> Result<LogLevel> {
        self.logging
            .level
            .parse()
            .map_err(anyhow::Error::msg)
            .context("Invalid logging.level")
    }
}

/// Catalog service connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Listing path (default: /api/products).
    #[serde(default = "default_path")]
    pub path: String,

    /// Fetch timeout in milliseconds. Unset waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Treat a 404 from the catalog as "no products".
    #[serde(default)]
    pub empty_on_not_found: bool,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_path() -> String {
    DEFAULT_PRODUCTS_PATH.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            path: default_path(),
            timeout_ms: None,
            empty_on_not_found: false,
        }
    }
}

/// Listing behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Products per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Log output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level: trace, debug, info, warn or error.
    #[serde(default = "default_level")]
    pub level: String,

    /// `human` or `json`.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "human".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

/// Generate a default shelf.toml config file.
pub fn generate_default_config(base_url: &str) -> String {
    format!(
        r#"# Shelf catalog configuration

[catalog]
base_url = "{base_url}"
path = "{path}"
# timeout_ms = 5000
# The catalog answers 404 when nothing matches.
empty_on_not_found = true

[browse]
page_size = {page_size}

[logging]
level = "warn"
format = "human"
"#,
        base_url = base_url,
        path = DEFAULT_PRODUCTS_PATH,
        page_size = DEFAULT_PAGE_SIZE,
    )
}
