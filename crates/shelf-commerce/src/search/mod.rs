//! Search module.
//!
//! Contains filter state, canonical query building, sorting, pagination
//! and type-ahead matching.

mod context;
mod filter;
mod query;
mod results;
mod sort;
mod typeahead;

pub use context::PageContext;
pub use filter::{FilterPanel, FilterSelection, MultiFacet, PriceBound, StockFilter};
pub use query::{build, price_range_gap, CanonicalQuery, QueryParam, ValidationGap};
pub use results::{buttons, slice, total_pages, PageButton, Pagination, DEFAULT_PAGE_SIZE};
pub use sort::{SortController, SortKey};
pub use typeahead::{TypeAheadIndex, SUGGESTION_LIMIT};
