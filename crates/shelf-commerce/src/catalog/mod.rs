//! Catalog module.
//!
//! Contains the static facet catalog and the normalized product shape.

mod facets;
mod product;

pub use facets::{BrandEntry, CategoryEntry, Department, FacetCatalog, SubcategoryEntry};
pub use product::Product;
