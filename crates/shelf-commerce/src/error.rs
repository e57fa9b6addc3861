//! Commerce error types.

use thiserror::Error;

/// Errors raised by the fallible parsing helpers.
///
/// Filter transitions and query building are total and never produce these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// A price string that is not a plain decimal amount.
    #[error("Invalid price: {0:?}")]
    InvalidPrice(String),

    /// Sort key name not recognized.
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    /// Multi-valued facet name not recognized.
    #[error("Unknown facet: {0}")]
    UnknownFacet(String),

    /// Category route slug not present in the facet catalog.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Brand id not present in the facet catalog.
    #[error("Unknown brand: {0}")]
    UnknownBrand(String),
}
