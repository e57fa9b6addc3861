//! Facet catalog: the valid values for every filterable dimension.
//!
//! The category tree is two levels deep. Departments ("Shoes") group
//! categories ("Men's Shoes"), which own subcategories ("Sneakers"). A
//! subcategory name may appear under several categories.

use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::BrandId;

/// A leaf in the category tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcategoryEntry {
    /// Display name, also the value sent to the catalog service.
    pub name: String,
    /// URL slug (e.g., "sandals-slides").
    pub slug: String,
}

/// A selectable main category and its subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    /// Display name, also the value sent to the catalog service.
    pub name: String,
    /// URL slug (e.g., "mens-shoes").
    pub slug: String,
    /// Child subcategories in display order.
    pub subcategories: Vec<SubcategoryEntry>,
}

impl CategoryEntry {
    /// Check whether a subcategory name belongs to this category.
    pub fn has_subcategory(&self, name: &str) -> bool {
        self.subcategories.iter().any(|s| s.name == name)
    }
}

/// A navigation grouping of categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub name: String,
    pub categories: Vec<CategoryEntry>,
}

/// A brand with its page id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandEntry {
    pub id: BrandId,
    pub name: String,
}

/// Enumerates valid categories, brands, colors and statuses.
///
/// Pure data. Sizes are not enumerated; any size value is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCatalog {
    departments: Vec<Department>,
    brands: Vec<BrandEntry>,
    colors: Vec<String>,
    statuses: Vec<String>,
}

type CategoryRow = (&'static str, &'static str, &'static [(&'static str, &'static str)]);

const SHOES: &[CategoryRow] = &[
    (
        "Men's Shoes",
        "mens-shoes",
        &[
            ("Sneakers", "sneakers"),
            ("Dress Shoes", "dress-shoes"),
            ("Boots", "boots"),
            ("Sandals & Slides", "sandals-slides"),
            ("Loafers", "loafers"),
        ],
    ),
    (
        "Women's Shoes",
        "womens-shoes",
        &[
            ("Casual Shoes", "casual-shoes"),
            ("Sneakers", "sneakers"),
            ("Heels", "heels"),
            ("Flats", "flats"),
            ("Boots", "boots"),
            ("Sandals & Slides", "sandals-slides"),
        ],
    ),
];

const CLOTHING: &[CategoryRow] = &[
    (
        "Men's Clothing",
        "mens-clothing",
        &[
            ("T-Shirts", "t-shirts"),
            ("Dress Shirts", "dress-shirts"),
            ("Casual Shirts", "casual-shirts"),
            ("Jackets & Coats", "jackets-coats"),
            ("Jeans", "jeans"),
            ("Trousers", "trousers"),
            ("Shorts", "shorts"),
            ("Sweats and Hoodies", "sweats-hoodies"),
        ],
    ),
    (
        "Women's Clothing",
        "womens-clothing",
        &[
            ("Tops", "tops"),
            ("Dresses", "dresses"),
            ("Skirts", "skirts"),
            ("Pants", "pants"),
            ("Blouses", "blouses"),
            ("Jackets & Coats", "jackets-coats"),
            ("Activewear", "activewear"),
            ("Loungewear", "loungewear"),
            ("Sweats and Hoodies", "sweats-hoodies"),
        ],
    ),
];

const ACCESSORIES: &[CategoryRow] = &[
    (
        "Bags & Backpacks",
        "bags-backpacks",
        &[
            ("Handbags", "handbags"),
            ("Backpacks", "backpacks"),
            ("Tote Bags", "tote-bags"),
            ("Crossbody Bags", "crossbody-bags"),
            ("Duffel Bags", "duffel-bags"),
        ],
    ),
    (
        "Jewellery",
        "jewellery",
        &[
            ("Necklaces", "necklaces"),
            ("Bracelets", "bracelets"),
            ("Earrings", "earrings"),
            ("Rings", "rings"),
            ("Watches", "watches"),
        ],
    ),
    (
        "Hats & Headwear",
        "hats-headwear",
        &[("Caps", "caps"), ("Beanies", "beanies"), ("Sun Hats", "sun-hats")],
    ),
    (
        "Belts & Wallets",
        "belts-wallets",
        &[("Belts", "belts"), ("Wallets", "wallets"), ("Cardholders", "cardholders")],
    ),
    (
        "Sunglasses & Eyewear",
        "sunglasses-eyewear",
        &[("Sunglasses", "sunglasses"), ("Accessories", "accessories")],
    ),
];

const BRANDS: &[(u64, &str)] = &[
    (354117646, "Five By Flynn"),
    (805882352, "Venroy"),
    (784705881, "Alfie's Mission"),
    (537647058, "Asha Jasper"),
    (364705881, "The Snakehole"),
    (742352940, "Listen Clothing"),
];

const COLORS: &[&str] = &[
    "Beige", "Black", "Brown", "Charcoal", "Mustard", "Teal", "Olive", "Silver", "Multi", "Khaki",
    "Blue", "White", "Red", "Cream", "Navy", "Orange", "Green", "Sand", "Camo", "Gold", "Indigo",
    "Petrol Blue", "Pink", "Yellow", "Stone", "Grey",
];

const STATUSES: &[&str] = &["new", "on sale"];

fn department(name: &str, rows: &[CategoryRow]) -> Department {
    Department {
        name: name.to_string(),
        categories: rows
            .iter()
            .map(|(name, slug, subs)| CategoryEntry {
                name: name.to_string(),
                slug: slug.to_string(),
                subcategories: subs
                    .iter()
                    .map(|(name, slug)| SubcategoryEntry {
                        name: name.to_string(),
                        slug: slug.to_string(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

impl FacetCatalog {
    /// Create a catalog from explicit data.
    pub fn new(
        departments: Vec<Department>,
        brands: Vec<BrandEntry>,
        colors: Vec<String>,
        statuses: Vec<String>,
    ) -> Self {
        Self {
            departments,
            brands,
            colors,
            statuses,
        }
    }

    /// The storefront's built-in catalog.
    pub fn standard() -> Self {
        Self::new(
            vec![
                department("Shoes", SHOES),
                department("Clothing", CLOTHING),
                department("Accessories", ACCESSORIES),
            ],
            BRANDS
                .iter()
                .map(|(id, name)| BrandEntry {
                    id: BrandId::new(*id),
                    name: name.to_string(),
                })
                .collect(),
            COLORS.iter().map(|c| c.to_string()).collect(),
            STATUSES.iter().map(|s| s.to_string()).collect(),
        )
    }

    /// Shared handle to the built-in catalog.
    pub fn shared() -> Arc<Self> {
        static STANDARD: OnceLock<Arc<FacetCatalog>> = OnceLock::new();
        STANDARD.get_or_init(|| Arc::new(Self::standard())).clone()
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// All main categories across departments, in display order.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryEntry> {
        self.departments.iter().flat_map(|d| d.categories.iter())
    }

    /// Look up a main category by display name.
    pub fn category(&self, name: &str) -> Option<&CategoryEntry> {
        self.categories().find(|c| c.name == name)
    }

    /// Subcategory names of a main category. Unknown categories have none.
    pub fn subcategories_of(&self, category: &str) -> BTreeSet<&str> {
        self.category(category)
            .map(|c| c.subcategories.iter().map(|s| s.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Main categories that list the given subcategory name.
    pub fn categories_containing<'a>(&'a self, sub: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.categories()
            .filter(move |c| c.has_subcategory(sub))
            .map(|c| c.name.as_str())
    }

    /// Resolve a category route (`mens-shoes`, optionally `sneakers`) to
    /// display names.
    pub fn resolve_route(
        &self,
        category_slug: &str,
        sub_slug: Option<&str>,
    ) -> Result<(&str, Option<&str>), CommerceError> {
        let category = self
            .categories()
            .find(|c| c.slug == category_slug)
            .ok_or_else(|| CommerceError::UnknownCategory(category_slug.to_string()))?;

        let sub = match sub_slug {
            None => None,
            Some(slug) => Some(
                category
                    .subcategories
                    .iter()
                    .find(|s| s.slug == slug)
                    .map(|s| s.name.as_str())
                    .ok_or_else(|| {
                        CommerceError::UnknownCategory(format!("{}/{}", category_slug, slug))
                    })?,
            ),
        };

        Ok((category.name.as_str(), sub))
    }

    pub fn brands(&self) -> &[BrandEntry] {
        &self.brands
    }

    /// Look up a brand by page id.
    pub fn brand(&self, id: BrandId) -> Option<&BrandEntry> {
        self.brands.iter().find(|b| b.id == id)
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn statuses(&self) -> &[String] {
        &self.statuses
    }
}

impl Default for FacetCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_shape() {
        let catalog = FacetCatalog::standard();
        assert_eq!(catalog.departments().len(), 3);
        assert_eq!(catalog.categories().count(), 9);
        assert_eq!(catalog.brands().len(), 6);
        assert_eq!(catalog.colors().len(), 26);
        assert_eq!(catalog.statuses(), &["new".to_string(), "on sale".to_string()]);
    }

    #[test]
    fn test_subcategories_of() {
        let catalog = FacetCatalog::standard();
        let subs = catalog.subcategories_of("Men's Shoes");
        assert_eq!(subs.len(), 5);
        assert!(subs.contains("Loafers"));
        assert!(catalog.subcategories_of("Spaceships").is_empty());
    }

    #[test]
    fn test_shared_subcategory_names() {
        let catalog = FacetCatalog::standard();
        let owners: Vec<_> = catalog.categories_containing("Sneakers").collect();
        assert_eq!(owners, vec!["Men's Shoes", "Women's Shoes"]);
    }

    #[test]
    fn test_resolve_route() {
        let catalog = FacetCatalog::standard();
        assert_eq!(
            catalog.resolve_route("mens-shoes", Some("sandals-slides")).unwrap(),
            ("Men's Shoes", Some("Sandals & Slides"))
        );
        assert_eq!(catalog.resolve_route("jewellery", None).unwrap(), ("Jewellery", None));
        assert!(catalog.resolve_route("mens-shoes", Some("heels")).is_err());
        assert!(catalog.resolve_route("nope", None).is_err());
    }

    #[test]
    fn test_brand_lookup() {
        let catalog = FacetCatalog::standard();
        let brand = catalog.brand(BrandId::new(805882352)).unwrap();
        assert_eq!(brand.name, "Venroy");
        assert!(catalog.brand(BrandId::new(1)).is_none());
    }
}
