//! Browse session: one listing page wired end to end.
//!
//! A session owns the filter panel, the committed selection, the sort
//! controller, pagination and the type-ahead index for a single page
//! context, and drives the catalog client with them.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use shelf_commerce::catalog::{FacetCatalog, Product};
use shelf_commerce::search::{
    build, price_range_gap, CanonicalQuery, FilterPanel, FilterSelection, PageButton,
    PageContext, Pagination, SortController, SortKey, TypeAheadIndex, DEFAULT_PAGE_SIZE,
};
use shelf_observability::StructuredLogger;

use crate::{CatalogClient, CatalogTransport, Refresh, ResultView};

/// Outcome of [`BrowseSession::mount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountOutcome {
    pub scope: Refresh,
    pub page: Refresh,
}

pub struct BrowseSession<T> {
    client: CatalogClient<T>,
    catalog: Arc<FacetCatalog>,
    logger: RefCell<StructuredLogger>,
    context: RefCell<PageContext>,
    panel: RefCell<FilterPanel>,
    committed: RefCell<FilterSelection>,
    sort: Cell<SortController>,
    pagination: Cell<Pagination>,
    index: RefCell<TypeAheadIndex>,
    suggestions: RefCell<Vec<Product>>,
    keyword: RefCell<String>,
}

impl<T: CatalogTransport> BrowseSession<T> {
    pub fn new(client: CatalogClient<T>, catalog: Arc<FacetCatalog>, context: PageContext) -> Self {
        let logger = client.logger().with_scope(context.label());
        Self {
            panel: RefCell::new(FilterPanel::new(Arc::clone(&catalog))),
            client,
            catalog,
            logger: RefCell::new(logger),
            context: RefCell::new(context),
            committed: RefCell::new(FilterSelection::new()),
            sort: Cell::new(SortController::new()),
            pagination: Cell::new(Pagination::new(1, DEFAULT_PAGE_SIZE, 0)),
            index: RefCell::new(TypeAheadIndex::default()),
            suggestions: RefCell::new(Vec::new()),
            keyword: RefCell::new(String::new()),
        }
    }

    /// Override the page size (default 18).
    pub fn with_page_size(self, page_size: usize) -> Self {
        let current = self.pagination.get();
        self.pagination
            .set(Pagination::new(1, page_size, current.total()));
        self
    }

    pub fn client(&self) -> &CatalogClient<T> {
        &self.client
    }

    pub fn catalog(&self) -> &FacetCatalog {
        &self.catalog
    }

    pub fn context(&self) -> PageContext {
        self.context.borrow().clone()
    }

    /// Load the scope set and the first page together.
    pub async fn mount(&self) -> MountOutcome {
        let scope_query = build(&FilterSelection::new(), &self.context.borrow());
        let page_query = self.query();

        let (scope, page) = futures::join!(
            self.load_scope(&scope_query),
            self.load_page(&page_query)
        );
        MountOutcome { scope, page }
    }

    /// Load only the scope set, for type-ahead without a displayed page.
    pub async fn mount_scope(&self) -> Refresh {
        let scope_query = build(&FilterSelection::new(), &self.context.borrow());
        self.load_scope(&scope_query).await
    }

    /// Switch to a new page context. Filters, sort, search and pagination
    /// start over; call [`mount`](Self::mount) to load it.
    ///
    /// Loads still in flight for the old context come back stale, and the
    /// old product and scope sets are dropped.
    pub fn set_context(&self, context: PageContext) {
        let label = context.label();
        self.client.invalidate();
        *self.index.borrow_mut() = TypeAheadIndex::default();
        *self.logger.borrow_mut() = self.client.logger().with_scope(label.clone());
        *self.context.borrow_mut() = context;
        *self.panel.borrow_mut() = FilterPanel::new(Arc::clone(&self.catalog));
        *self.committed.borrow_mut() = FilterSelection::new();
        self.sort.set(SortController::new());
        self.suggestions.borrow_mut().clear();
        self.keyword.borrow_mut().clear();
        self.reset_pagination(0);

        tracing::info!(parent: self.logger.borrow().span(), context = %label, "context changed");
    }

    /// Mutate the draft filters. Nothing is fetched until [`commit`](Self::commit).
    pub fn edit<R>(&self, f: impl FnOnce(&mut FilterPanel) -> R) -> R {
        f(&mut self.panel.borrow_mut())
    }

    /// Draft selection, not yet committed.
    pub fn draft(&self) -> FilterSelection {
        self.panel.borrow().selection().clone()
    }

    /// Last committed selection.
    pub fn selection(&self) -> FilterSelection {
        self.committed.borrow().clone()
    }

    /// Canonical query for the committed selection.
    pub fn query(&self) -> CanonicalQuery {
        build(&self.committed.borrow(), &self.context.borrow())
    }

    /// Commit the draft, sort key included, and reload the page.
    pub async fn commit(&self) -> Refresh {
        let selection = self.panel.borrow().commit();
        let mut sort = self.sort.get();
        sort.select(selection.sort());
        self.sort.set(sort);
        self.apply(selection).await
    }

    pub fn sort(&self) -> SortKey {
        self.sort.get().active()
    }

    /// Pick a sort key and reload with the committed filters. Draft edits
    /// stay in the panel until the next [`commit`](Self::commit).
    ///
    /// Re-selecting the active key does nothing and returns `None`.
    pub async fn select_sort(&self, key: SortKey) -> Option<Refresh> {
        let mut sort = self.sort.get();
        if !sort.select(key) {
            return None;
        }
        self.sort.set(sort);
        self.panel.borrow_mut().set_sort(key);
        let selection = self.committed.borrow().clone().with_sort(key);
        Some(self.apply(selection).await)
    }

    /// Type-ahead suggestions for `keyword` over the scope set.
    pub fn suggest(&self, keyword: &str) -> Vec<Product> {
        let found: Vec<Product> = self
            .index
            .borrow()
            .suggest(keyword)
            .into_iter()
            .cloned()
            .collect();
        *self.keyword.borrow_mut() = keyword.to_string();
        *self.suggestions.borrow_mut() = found.clone();
        found
    }

    pub fn suggestions(&self) -> Vec<Product> {
        self.suggestions.borrow().clone()
    }

    pub fn keyword(&self) -> String {
        self.keyword.borrow().clone()
    }

    /// Show every scope product whose name contains `keyword`.
    pub fn submit_search(&self, keyword: &str) -> usize {
        let results = self.index.borrow().search(keyword);
        let count = results.len();
        *self.keyword.borrow_mut() = keyword.to_string();
        self.suggestions.borrow_mut().clear();
        self.client.replace_local(results);
        self.reset_pagination(count);

        tracing::info!(parent: self.logger.borrow().span(), keyword, count, "search applied");
        count
    }

    /// Picking any suggestion shows every match for the typed keyword, the
    /// same as submitting it.
    pub fn choose_suggestion(&self, product: &Product) -> usize {
        tracing::debug!(parent: self.logger.borrow().span(), product_id = %product.id, "suggestion chosen");
        let keyword = self.keyword.borrow().clone();
        self.submit_search(&keyword)
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination.get()
    }

    pub fn go_to(&self, page: usize) {
        self.update_pagination(|p| p.go_to(page));
    }

    pub fn next(&self) {
        self.update_pagination(Pagination::next);
    }

    pub fn prev(&self) {
        self.update_pagination(Pagination::prev);
    }

    pub fn page_buttons(&self) -> Vec<PageButton> {
        self.pagination.get().buttons()
    }

    /// Products on the current page.
    pub fn current_items(&self) -> Vec<Product> {
        let products = self.client.products();
        self.pagination.get().window(&products[..]).to_vec()
    }

    /// Displayed set with loading and error state.
    pub fn view(&self) -> ResultView {
        self.client.snapshot()
    }

    async fn apply(&self, selection: FilterSelection) -> Refresh {
        if let Some(gap) = price_range_gap(&selection) {
            tracing::warn!(parent: self.logger.borrow().span(), gap = %gap, "price filter looks wrong");
        }

        let query = build(&selection, &self.context.borrow());
        *self.committed.borrow_mut() = selection;
        tracing::info!(parent: self.logger.borrow().span(), query = %query, "filters committed");

        self.load_page(&query).await
    }

    async fn load_page(&self, query: &CanonicalQuery) -> Refresh {
        let outcome = self.client.refresh(query).await;
        if outcome == Refresh::Applied {
            self.reset_pagination(self.client.products().len());
        }
        outcome
    }

    async fn load_scope(&self, query: &CanonicalQuery) -> Refresh {
        let outcome = self.client.refresh_scope(query).await;
        if outcome == Refresh::Applied {
            *self.index.borrow_mut() = TypeAheadIndex::new(self.client.scope_products());
        }
        outcome
    }

    fn reset_pagination(&self, total: usize) {
        self.update_pagination(|p| p.reset(total));
    }

    fn update_pagination(&self, f: impl FnOnce(&mut Pagination)) {
        let mut pagination = self.pagination.get();
        f(&mut pagination);
        self.pagination.set(pagination);
    }
}
