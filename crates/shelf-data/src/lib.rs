//! Catalog data access for the Shelf browsing engine.
//!
//! This crate provides:
//! - `CatalogTransport` - Seam over the catalog HTTP endpoint
//! - `CatalogClient` - Fetch, decode and epoch-guarded result slots
//! - `ClientConfig` - Opt-in timeout and 404 handling
//! - `BrowseSession` - One browsing page: filters, sort, pagination and
//!   type-ahead wired to the client

mod browse;
mod client;
mod error;
mod record;
mod timeout;
mod transport;

pub use browse::*;
pub use client::*;
pub use error::*;
pub use record::decode_products;
pub use timeout::*;
pub use transport::*;
