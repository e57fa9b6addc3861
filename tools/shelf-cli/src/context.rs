//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use shelf_commerce::catalog::FacetCatalog;
use shelf_commerce::search::PageContext;
use shelf_data::{BrowseSession, CatalogClient, HttpTransport};
use shelf_observability::{init_tracing, LogLevel, SessionId, StructuredLogger};

use crate::config::{ShelfConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: ShelfConfig,
    /// Where the config came from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Facet catalog shared by all commands.
    pub catalog: Arc<FacetCatalog>,
}

impl Context {
    /// Load context from config file, then apply the endpoint override.
    pub fn load(config_path: Option<&str>, endpoint: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = match config_path {
            Some(path) => (ShelfConfig::load(path)?, Some(PathBuf::from(path))),
            None => match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (ShelfConfig::default(), None),
            },
        };

        if let Some(endpoint) = endpoint {
            config.catalog.base_url = endpoint.to_string();
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            catalog: FacetCatalog::shared(),
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(ShelfConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = ShelfConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Install the tracing subscriber. `--verbose` lowers the level to debug.
    pub fn init_logging(&self) -> Result<()> {
        let level = self.level()?;
        init_tracing(self.config.log_format()?, level.as_str())
            .context("Failed to initialize logging")
    }

    fn level(&self) -> Result<LogLevel> {
        if self.output.is_verbose() {
            Ok(LogLevel::Debug)
        } else {
            self.config.log_level()
        }
    }

    /// Open a browse session against the configured catalog.
    pub fn session(&self, page_context: PageContext) -> Result<BrowseSession<HttpTransport>> {
        let transport = HttpTransport::new(&self.config.catalog.base_url, &self.config.catalog.path)
            .context("Failed to create catalog transport")?;

        let logger = StructuredLogger::new(SessionId::generate());

        self.output.debug(&format!(
            "Session {} against {}",
            logger.session_id(),
            transport.endpoint()
        ));

        let client =
            CatalogClient::new(transport, self.config.client_config()).with_logger(logger);
        Ok(BrowseSession::new(client, Arc::clone(&self.catalog), page_context)
            .with_page_size(self.config.browse.page_size))
    }
}
