//! Catalog browsing domain types and logic for Shelf.
//!
//! This crate holds everything about narrowing a catalog that does not touch
//! the network:
//!
//! - **Catalog**: the static facet catalog and the normalized `Product`
//! - **Search**: filter state, canonical query building, sorting,
//!   pagination and type-ahead matching
//!
//! # Example
//!
//! ```rust
//! use shelf_commerce::prelude::*;
//!
//! let mut panel = FilterPanel::new(FacetCatalog::shared());
//! panel.toggle_category("Men's Shoes");
//! panel.toggle_multi(MultiFacet::Color, "Black");
//! let selection = panel.commit();
//!
//! let query = build(&selection, &PageContext::brand("Venroy"));
//! assert_eq!(query.values(QueryParam::BrandName), vec!["Venroy"]);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod search;

pub use error::CommerceError;
pub use ids::{BrandId, ProductId};
pub use money::Price;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::{BrandId, ProductId};
    pub use crate::money::Price;

    // Catalog
    pub use crate::catalog::{BrandEntry, CategoryEntry, Department, FacetCatalog, Product};

    // Search
    pub use crate::search::{
        build, price_range_gap, CanonicalQuery, FilterPanel, FilterSelection, MultiFacet,
        PageButton, PageContext, Pagination, PriceBound, QueryParam, SortController, SortKey,
        StockFilter, TypeAheadIndex, ValidationGap, DEFAULT_PAGE_SIZE, SUGGESTION_LIMIT,
    };
}
