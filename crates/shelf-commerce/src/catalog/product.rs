//! Normalized product shape.

use crate::ids::ProductId;
use crate::money::Price;
use serde::{Deserialize, Serialize};

/// A product as the browsing engine sees it.
///
/// Built by the catalog client from a raw service record; the description
/// is derived on every decode and never sent back anywhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Catalog product id.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Brand display name.
    pub brand: String,
    /// Current price.
    pub price: Price,
    /// Merchandising status (e.g., "new", "on sale").
    pub status: String,
    /// First picture, if the product has any.
    pub primary_image_url: Option<String>,
    /// Sentence built from color and target gender.
    pub derived_description: String,
}

impl Product {
    /// The fixed description template.
    pub fn describe(color: &str, gender: &str) -> String {
        format!("This product is {} in color, suitable for {}.", color, gender)
    }
}
