//! Catalog client with epoch-guarded result slots.

use std::cell::{Cell, RefCell};
use std::sync::Arc;
use std::time::Instant;

use http::StatusCode;
use shelf_commerce::catalog::Product;
use shelf_commerce::search::CanonicalQuery;
use shelf_observability::{SessionId, StructuredLogger};

use crate::record::decode_products;
use crate::timeout::within;
use crate::{CatalogTransport, ClientConfig, FetchError, NetworkError};

/// User-facing message for a failed load.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load products";

/// Outcome of an epoch-guarded load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// The response was current and replaced the slot.
    Applied,
    /// The fetch failed; previous products are kept.
    Failed,
    /// A newer load started before this one finished. Nothing changed.
    Stale,
}

/// Read-only copy of a result slot.
#[derive(Debug, Clone)]
pub struct ResultView {
    pub products: Arc<[Product]>,
    pub loading: bool,
    pub error: Option<String>,
    pub epoch: u64,
}

impl ResultView {
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[derive(Debug)]
struct Slot {
    epoch: Cell<u64>,
    products: RefCell<Arc<[Product]>>,
    loading: Cell<bool>,
    error: RefCell<Option<String>>,
}

impl Slot {
    fn new() -> Self {
        Self {
            epoch: Cell::new(0),
            products: RefCell::new(Arc::from(Vec::new())),
            loading: Cell::new(false),
            error: RefCell::new(None),
        }
    }

    /// Start a load. Returns the epoch it is tagged with.
    fn begin(&self) -> u64 {
        let epoch = self.bump();
        self.loading.set(true);
        epoch
    }

    fn bump(&self) -> u64 {
        let epoch = self.epoch.get() + 1;
        self.epoch.set(epoch);
        epoch
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.epoch.get() == epoch
    }

    fn apply(&self, products: Vec<Product>) {
        *self.products.borrow_mut() = Arc::from(products);
        *self.error.borrow_mut() = None;
        self.loading.set(false);
    }

    /// Bump the epoch and drop everything, loading state included.
    fn clear(&self) -> u64 {
        let epoch = self.bump();
        self.apply(Vec::new());
        epoch
    }

    fn fail(&self) {
        *self.error.borrow_mut() = Some(LOAD_FAILED_MESSAGE.to_string());
        self.loading.set(false);
    }

    fn view(&self) -> ResultView {
        ResultView {
            products: Arc::clone(&self.products.borrow()),
            loading: self.loading.get(),
            error: self.error.borrow().clone(),
            epoch: self.epoch.get(),
        }
    }
}

/// Fetches product lists and keeps the displayed and scope sets.
///
/// Loads may overlap. Each one is tagged with its slot's epoch when it
/// starts, and only a response whose epoch is still current may touch the
/// slot. Everything runs on one thread, so state lives in `Cell`/`RefCell`
/// and no borrow is held across an await point.
pub struct CatalogClient<T> {
    transport: T,
    config: ClientConfig,
    logger: StructuredLogger,
    page: Slot,
    scope: Slot,
}

impl<T: CatalogTransport> CatalogClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            logger: StructuredLogger::new(SessionId::generate()),
            page: Slot::new(),
            scope: Slot::new(),
        }
    }

    /// Set the logger used for fetch events.
    pub fn with_logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn logger(&self) -> &StructuredLogger {
        &self.logger
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch and decode one product list.
    pub async fn fetch(&self, query: &CanonicalQuery) -> Result<Vec<Product>, FetchError> {
        let response = within(self.config.timeout, self.transport.get(query)).await?;

        if response.status == StatusCode::NOT_FOUND && self.config.empty_on_not_found {
            return Ok(Vec::new());
        }
        if !response.status.is_success() {
            return Err(NetworkError::Status {
                status: response.status.as_u16(),
                url: response.url,
            }
            .into());
        }

        Ok(decode_products(&response.body)?)
    }

    /// Load `query` into the displayed set.
    pub async fn refresh(&self, query: &CanonicalQuery) -> Refresh {
        self.load(&self.page, "page", query).await
    }

    /// Load `query` into the scope set used for type-ahead.
    pub async fn refresh_scope(&self, query: &CanonicalQuery) -> Refresh {
        self.load(&self.scope, "scope", query).await
    }

    async fn load(&self, slot: &Slot, slot_name: &str, query: &CanonicalQuery) -> Refresh {
        let epoch = slot.begin();
        let span = self.logger.span();
        tracing::debug!(parent: span, slot = slot_name, cache_key = %query.cache_key(), epoch, "fetching products");

        let started = Instant::now();
        let result = self.fetch(query).await;

        if !slot.is_current(epoch) {
            tracing::debug!(
                parent: span,
                slot = slot_name,
                epoch,
                current_epoch = slot.epoch.get(),
                "discarding stale response"
            );
            return Refresh::Stale;
        }

        match result {
            Ok(products) => {
                let count = products.len();
                slot.apply(products);
                tracing::info!(
                    parent: span,
                    slot = slot_name,
                    count,
                    epoch,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "products applied"
                );
                Refresh::Applied
            }
            Err(FetchError::Network(e)) => {
                slot.fail();
                tracing::warn!(parent: span, slot = slot_name, epoch, error = %e, "products fetch failed");
                Refresh::Failed
            }
            Err(FetchError::Decode(e)) => {
                slot.fail();
                tracing::error!(parent: span, slot = slot_name, epoch, error = %e, "products decode failed");
                Refresh::Failed
            }
        }
    }

    /// Show a locally computed list, superseding any in-flight page load.
    pub fn replace_local(&self, products: Vec<Product>) -> u64 {
        let epoch = self.page.bump();
        let count = products.len();
        self.page.apply(products);
        tracing::debug!(parent: self.logger.span(), count, epoch, "local results installed");
        epoch
    }

    /// Supersede every in-flight load and empty both slots.
    ///
    /// Loads started before this call finish as [`Refresh::Stale`].
    pub fn invalidate(&self) {
        let page = self.page.clear();
        let scope = self.scope.clear();
        tracing::debug!(parent: self.logger.span(), page_epoch = page, scope_epoch = scope, "results invalidated");
    }

    /// Current displayed set.
    pub fn snapshot(&self) -> ResultView {
        self.page.view()
    }

    /// Current scope set.
    pub fn scope_snapshot(&self) -> ResultView {
        self.scope.view()
    }

    pub fn products(&self) -> Arc<[Product]> {
        Arc::clone(&self.page.products.borrow())
    }

    pub fn scope_products(&self) -> Arc<[Product]> {
        Arc::clone(&self.scope.products.borrow())
    }
}
