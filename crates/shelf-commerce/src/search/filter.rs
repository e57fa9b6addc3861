//! Filter selection and the staged filter panel.
//!
//! `FilterSelection` is the committed value handed to the query builder.
//! `FilterPanel` owns the draft and is the only way to change it, so the
//! category cascade rules always hold.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::FacetCatalog;
use crate::error::CommerceError;
use crate::search::{QueryParam, SortKey};

/// Stock toggle. A single nullable value, not a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockFilter {
    #[serde(rename = "re-stock")]
    Restock,
}

impl StockFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockFilter::Restock => "re-stock",
        }
    }
}

/// Multi-valued facets with plain add/remove semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MultiFacet {
    Brand,
    Color,
    Size,
    Status,
}

impl MultiFacet {
    /// Parse a facet name as written in URLs or on the command line.
    pub fn from_param(name: &str) -> Result<Self, CommerceError> {
        match name.trim().to_lowercase().as_str() {
            "brand" | "brand_name" => Ok(MultiFacet::Brand),
            "color" | "colour" => Ok(MultiFacet::Color),
            "size" => Ok(MultiFacet::Size),
            "status" => Ok(MultiFacet::Status),
            _ => Err(CommerceError::UnknownFacet(name.to_string())),
        }
    }

    /// Query parameter this facet is sent as.
    pub fn param(&self) -> QueryParam {
        match self {
            MultiFacet::Brand => QueryParam::BrandName,
            MultiFacet::Color => QueryParam::Color,
            MultiFacet::Size => QueryParam::Size,
            MultiFacet::Status => QueryParam::Status,
        }
    }
}

/// Which end of the price range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceBound {
    Min,
    Max,
}

/// The shopper's facet choices.
///
/// Sets are ordered so iteration is already in canonical (lexicographic)
/// order. Price bounds are raw text and deliberately unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    main_categories: BTreeSet<String>,
    sub_categories: BTreeSet<String>,
    brands: BTreeSet<String>,
    colors: BTreeSet<String>,
    sizes: BTreeSet<String>,
    statuses: BTreeSet<String>,
    min_price: Option<String>,
    max_price: Option<String>,
    stock: Option<StockFilter>,
    sort: SortKey,
}

impl FilterSelection {
    /// An empty selection with no sort.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn main_categories(&self) -> &BTreeSet<String> {
        &self.main_categories
    }

    pub fn sub_categories(&self) -> &BTreeSet<String> {
        &self.sub_categories
    }

    /// Members of a multi-valued facet.
    pub fn facet(&self, facet: MultiFacet) -> &BTreeSet<String> {
        match facet {
            MultiFacet::Brand => &self.brands,
            MultiFacet::Color => &self.colors,
            MultiFacet::Size => &self.sizes,
            MultiFacet::Status => &self.statuses,
        }
    }

    fn facet_mut(&mut self, facet: MultiFacet) -> &mut BTreeSet<String> {
        match facet {
            MultiFacet::Brand => &mut self.brands,
            MultiFacet::Color => &mut self.colors,
            MultiFacet::Size => &mut self.sizes,
            MultiFacet::Status => &mut self.statuses,
        }
    }

    pub fn price_bound(&self, bound: PriceBound) -> Option<&str> {
        match bound {
            PriceBound::Min => self.min_price.as_deref(),
            PriceBound::Max => self.max_price.as_deref(),
        }
    }

    pub fn stock(&self) -> Option<StockFilter> {
        self.stock
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// The same facets under another sort key.
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// True when no facet is set. The sort key is not a facet.
    pub fn is_unfiltered(&self) -> bool {
        self.main_categories.is_empty()
            && self.sub_categories.is_empty()
            && self.brands.is_empty()
            && self.colors.is_empty()
            && self.sizes.is_empty()
            && self.statuses.is_empty()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.stock.is_none()
    }
}

/// Filter state manager.
///
/// Edits are staged in a draft and only reach the query builder through
/// [`FilterPanel::commit`].
#[derive(Debug, Clone)]
pub struct FilterPanel {
    catalog: Arc<FacetCatalog>,
    draft: FilterSelection,
    expanded: BTreeSet<String>,
    // Subcategories checked on their own rather than through a category.
    // Every checked subcategory is either in here or owned by a selected
    // category.
    direct: BTreeSet<String>,
}

impl FilterPanel {
    /// Create an empty panel over a facet catalog.
    pub fn new(catalog: Arc<FacetCatalog>) -> Self {
        Self {
            catalog,
            draft: FilterSelection::default(),
            expanded: BTreeSet::new(),
            direct: BTreeSet::new(),
        }
    }

    pub fn catalog(&self) -> &FacetCatalog {
        &self.catalog
    }

    /// The draft, including uncommitted edits.
    pub fn selection(&self) -> &FilterSelection {
        &self.draft
    }

    /// Select or deselect a main category, cascading to its subcategories.
    ///
    /// Deselecting keeps a subcategory when another selected category also
    /// lists it, or when it was checked on its own.
    pub fn toggle_category(&mut self, category: &str) {
        let subs = self.catalog.subcategories_of(category);

        if self.draft.main_categories.remove(category) {
            let catalog = &self.catalog;
            let remaining = &self.draft.main_categories;
            let direct = &self.direct;
            let doomed: Vec<&str> = subs
                .iter()
                .copied()
                .filter(|sub| !direct.contains(*sub))
                .filter(|sub| {
                    !catalog
                        .categories_containing(sub)
                        .any(|owner| remaining.contains(owner))
                })
                .collect();
            for sub in doomed {
                self.draft.sub_categories.remove(sub);
            }
            self.expanded.remove(category);
        } else {
            self.draft.main_categories.insert(category.to_string());
            self.draft
                .sub_categories
                .extend(subs.iter().map(|sub| sub.to_string()));
            self.expanded.insert(category.to_string());
        }
    }

    /// Check or uncheck one subcategory. Never touches the parent.
    pub fn toggle_subcategory(&mut self, sub: &str) {
        if self.draft.sub_categories.remove(sub) {
            self.direct.remove(sub);
        } else {
            self.draft.sub_categories.insert(sub.to_string());
            self.direct.insert(sub.to_string());
        }
    }

    /// Add the value if absent, remove it if present.
    pub fn toggle_multi(&mut self, facet: MultiFacet, value: &str) {
        toggle(self.draft.facet_mut(facet), value);
    }

    /// Radio-with-off: choosing the active value clears it.
    pub fn set_stock(&mut self, value: StockFilter) {
        self.draft.stock = match self.draft.stock {
            Some(current) if current == value => None,
            _ => Some(value),
        };
    }

    /// Store free-text price input as typed. Empty text clears the bound.
    pub fn set_price_bound(&mut self, bound: PriceBound, text: impl Into<String>) {
        let text = text.into();
        let value = if text.is_empty() { None } else { Some(text) };
        match bound {
            PriceBound::Min => self.draft.min_price = value,
            PriceBound::Max => self.draft.max_price = value,
        }
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.draft.sort = key;
    }

    /// Clear every facet. The sort key is kept.
    pub fn reset(&mut self) {
        let sort = self.draft.sort;
        self.draft = FilterSelection {
            sort,
            ..FilterSelection::default()
        };
        self.expanded.clear();
        self.direct.clear();
    }

    pub fn is_expanded(&self, category: &str) -> bool {
        self.expanded.contains(category)
    }

    /// Subcategory checkboxes shown under a category; empty while collapsed.
    pub fn visible_subcategories(&self, category: &str) -> Vec<&str> {
        if !self.is_expanded(category) {
            return Vec::new();
        }
        self.catalog
            .category(category)
            .map(|c| c.subcategories.iter().map(|s| s.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Snapshot the draft for the query builder.
    pub fn commit(&self) -> FilterSelection {
        self.draft.clone()
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> FilterPanel {
        FilterPanel::new(FacetCatalog::shared())
    }

    fn subs(panel: &FilterPanel) -> Vec<&str> {
        panel
            .selection()
            .sub_categories()
            .iter()
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn test_select_category_cascades() {
        let mut p = panel();
        p.toggle_category("Men's Shoes");

        assert!(p.selection().main_categories().contains("Men's Shoes"));
        assert_eq!(
            subs(&p),
            vec!["Boots", "Dress Shoes", "Loafers", "Sandals & Slides", "Sneakers"]
        );
        assert!(p.is_expanded("Men's Shoes"));
        assert_eq!(p.visible_subcategories("Men's Shoes").len(), 5);
    }

    #[test]
    fn test_toggle_category_twice_is_identity() {
        let mut p = panel();
        p.toggle_multi(MultiFacet::Color, "Black");
        p.toggle_subcategory("Boots");
        let before = p.commit();

        p.toggle_category("Men's Shoes");
        p.toggle_category("Men's Shoes");

        assert_eq!(p.commit(), before);
        assert!(!p.is_expanded("Men's Shoes"));
        assert!(p.visible_subcategories("Men's Shoes").is_empty());
    }

    #[test]
    fn test_deselect_keeps_shared_subcategories() {
        let mut p = panel();
        p.toggle_category("Men's Shoes");
        let men_only = p.commit();

        p.toggle_category("Women's Shoes");
        assert!(subs(&p).contains(&"Heels"));

        p.toggle_category("Women's Shoes");
        assert_eq!(p.commit(), men_only);
        assert!(subs(&p).contains(&"Sneakers"));
        assert!(!subs(&p).contains(&"Heels"));
    }

    #[test]
    fn test_deselect_removes_only_own_subcategories() {
        let mut p = panel();
        p.toggle_category("Jewellery");
        p.toggle_category("Hats & Headwear");
        p.toggle_category("Jewellery");

        assert_eq!(subs(&p), vec!["Beanies", "Caps", "Sun Hats"]);
    }

    #[test]
    fn test_overlapping_categories_leave_nothing_behind() {
        let mut p = panel();
        p.toggle_category("Men's Shoes");
        p.toggle_category("Women's Shoes");
        p.toggle_category("Men's Shoes");
        assert!(subs(&p).contains(&"Sneakers"));

        p.toggle_category("Women's Shoes");
        assert!(p.selection().main_categories().is_empty());
        assert!(subs(&p).is_empty(), "left behind: {:?}", subs(&p));
    }

    #[test]
    fn test_directly_checked_subcategory_survives_deselect() {
        let mut p = panel();
        p.toggle_category("Women's Shoes");
        p.toggle_subcategory("Boots");
        p.toggle_subcategory("Boots");
        p.toggle_category("Men's Shoes");
        p.toggle_category("Women's Shoes");
        p.toggle_category("Men's Shoes");

        assert_eq!(subs(&p), vec!["Boots"]);
    }

    #[test]
    fn test_with_sort_keeps_facets() {
        let mut p = panel();
        p.toggle_multi(MultiFacet::Color, "Black");
        let sorted = p.commit().with_sort(SortKey::PriceDesc);
        assert_eq!(sorted.sort(), SortKey::PriceDesc);
        assert!(sorted.facet(MultiFacet::Color).contains("Black"));
    }

    #[test]
    fn test_subcategory_independent_of_parent() {
        let mut p = panel();
        p.toggle_category("Belts & Wallets");
        p.toggle_subcategory("Wallets");

        assert!(p.selection().main_categories().contains("Belts & Wallets"));
        assert_eq!(subs(&p), vec!["Belts", "Cardholders"]);

        // Orphan subcategories are a permitted state.
        p.toggle_subcategory("Rings");
        assert!(subs(&p).contains(&"Rings"));
    }

    #[test]
    fn test_toggle_multi_symmetric() {
        let mut p = panel();
        p.toggle_multi(MultiFacet::Brand, "Venroy");
        p.toggle_multi(MultiFacet::Brand, "Asha Jasper");
        p.toggle_multi(MultiFacet::Brand, "Venroy");

        let brands: Vec<_> = p.selection().facet(MultiFacet::Brand).iter().collect();
        assert_eq!(brands, vec!["Asha Jasper"]);
    }

    #[test]
    fn test_stock_radio_with_off() {
        let mut p = panel();
        p.set_stock(StockFilter::Restock);
        assert_eq!(p.selection().stock(), Some(StockFilter::Restock));
        p.set_stock(StockFilter::Restock);
        assert_eq!(p.selection().stock(), None);
    }

    #[test]
    fn test_price_bounds_unvalidated() {
        let mut p = panel();
        p.set_price_bound(PriceBound::Min, "500");
        p.set_price_bound(PriceBound::Max, "cheap");
        assert_eq!(p.selection().price_bound(PriceBound::Min), Some("500"));
        assert_eq!(p.selection().price_bound(PriceBound::Max), Some("cheap"));

        p.set_price_bound(PriceBound::Max, "");
        assert_eq!(p.selection().price_bound(PriceBound::Max), None);
    }

    #[test]
    fn test_edits_are_staged_until_commit() {
        let mut p = panel();
        let committed = p.commit();
        p.toggle_multi(MultiFacet::Size, "M");

        assert!(committed.is_unfiltered());
        assert!(!p.commit().is_unfiltered());
    }

    #[test]
    fn test_reset_keeps_sort() {
        let mut p = panel();
        p.set_sort(SortKey::PriceAsc);
        p.toggle_category("Jewellery");
        p.set_stock(StockFilter::Restock);
        p.reset();

        assert!(p.selection().is_unfiltered());
        assert_eq!(p.selection().sort(), SortKey::PriceAsc);
        assert!(!p.is_expanded("Jewellery"));
    }

    #[test]
    fn test_facet_from_param() {
        assert_eq!(MultiFacet::from_param("brand_name").unwrap(), MultiFacet::Brand);
        assert_eq!(MultiFacet::from_param("Colour").unwrap(), MultiFacet::Color);
        assert!(MultiFacet::from_param("stock").is_err());
    }
}
