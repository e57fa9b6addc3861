//! Page-level scoping supplied by the surrounding page.

use serde::{Deserialize, Serialize};

use crate::catalog::FacetCatalog;
use crate::error::CommerceError;
use crate::ids::BrandId;

/// Brand and/or category already fixed by the page being viewed.
///
/// Read-only for the browsing engine; a new context means a new session
/// scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageContext {
    pub brand: Option<String>,
    pub main_category: Option<String>,
    pub sub_category: Option<String>,
}

impl PageContext {
    /// No fixed scope (the home page).
    pub fn none() -> Self {
        Self::default()
    }

    /// A single brand's page.
    pub fn brand(name: impl Into<String>) -> Self {
        Self {
            brand: Some(name.into()),
            ..Self::default()
        }
    }

    /// A category page, optionally narrowed to one subcategory.
    pub fn category(main: impl Into<String>, sub: Option<String>) -> Self {
        Self {
            main_category: Some(main.into()),
            sub_category: sub,
            ..Self::default()
        }
    }

    /// Resolve `/categories/{slug}[/{sub_slug}]` through the catalog.
    pub fn from_category_route(
        catalog: &FacetCatalog,
        slug: &str,
        sub_slug: Option<&str>,
    ) -> Result<Self, CommerceError> {
        let (main, sub) = catalog.resolve_route(slug, sub_slug)?;
        Ok(Self::category(main, sub.map(str::to_string)))
    }

    /// Resolve `/brand/brand-details/{id}` through the catalog.
    pub fn from_brand_id(catalog: &FacetCatalog, id: BrandId) -> Result<Self, CommerceError> {
        catalog
            .brand(id)
            .map(|b| Self::brand(b.name.clone()))
            .ok_or_else(|| CommerceError::UnknownBrand(id.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.brand.is_none() && self.main_category.is_none() && self.sub_category.is_none()
    }

    /// Short label for logs, e.g. `brand=Venroy` or `all`.
    pub fn label(&self) -> String {
        let parts: Vec<String> = [
            ("brand", &self.brand),
            ("category", &self.main_category),
            ("sub", &self.sub_category),
        ]
        .iter()
        .filter_map(|(k, v)| v.as_ref().map(|v| format!("{}={}", k, v)))
        .collect();

        if parts.is_empty() {
            "all".to_string()
        } else {
            parts.join(",")
        }
    }
}
