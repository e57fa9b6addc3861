//! Canonical query building.
//!
//! `build` is a pure, total mapping from a committed selection and the page
//! context to an ordered parameter list. Parameter order is fixed and each
//! multi-valued facet is emitted in sorted order, so equal inputs always
//! serialize to the same bytes.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::Price;
use crate::search::{FilterSelection, MultiFacet, PageContext, PriceBound};

/// Catalog service query parameters, declared in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QueryParam {
    MainCategory,
    SubCategory,
    BrandName,
    Color,
    Size,
    MinPrice,
    MaxPrice,
    Status,
    Stock,
    SortByPopularity,
    SortByPrice,
    SortByNew,
}

impl QueryParam {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryParam::MainCategory => "main_category",
            QueryParam::SubCategory => "sub_category",
            QueryParam::BrandName => "brand_name",
            QueryParam::Color => "color",
            QueryParam::Size => "size",
            QueryParam::MinPrice => "min_price",
            QueryParam::MaxPrice => "max_price",
            QueryParam::Status => "status",
            QueryParam::Stock => "stock",
            QueryParam::SortByPopularity => "sort_by_popularity",
            QueryParam::SortByPrice => "sort_by_price",
            QueryParam::SortByNew => "sort_by_new",
        }
    }
}

impl fmt::Display for QueryParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved, order-stable parameter list.
///
/// Only [`build`] constructs non-empty queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalQuery {
    pairs: Vec<(QueryParam, String)>,
}

impl CanonicalQuery {
    /// The fetch-all query.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn pairs(&self) -> &[(QueryParam, String)] {
        &self.pairs
    }

    /// Pairs with wire names, ready for an HTTP client.
    pub fn as_wire_pairs(&self) -> Vec<(&'static str, &str)> {
        self.pairs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    /// Every value sent for one parameter.
    pub fn values(&self, param: QueryParam) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| *k == param)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// True when the query asks for every product.
    pub fn is_fetch_all(&self) -> bool {
        self.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QueryParam, &str)> + '_ {
        self.pairs.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Percent-encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k.as_str(), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Cache key for this query.
    pub fn cache_key(&self) -> String {
        if self.is_fetch_all() {
            "products:all".to_string()
        } else {
            format!("products:{}", self.to_query_string())
        }
    }

    fn push(&mut self, param: QueryParam, value: impl Into<String>) {
        self.pairs.push((param, value.into()));
    }

    fn push_set(&mut self, param: QueryParam, values: &BTreeSet<String>) {
        for value in values {
            self.push(param, value.as_str());
        }
    }

    // Page context wins over the selection on its axis.
    fn push_axis(&mut self, param: QueryParam, fixed: Option<&str>, selected: &BTreeSet<String>) {
        match fixed {
            Some(value) => self.push(param, value),
            None => self.push_set(param, selected),
        }
    }

    fn push_price(&mut self, param: QueryParam, raw: Option<&str>) {
        if let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) {
            self.push(param, text);
        }
    }
}

impl fmt::Display for CanonicalQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Map a committed selection plus page context to a canonical query.
pub fn build(selection: &FilterSelection, context: &PageContext) -> CanonicalQuery {
    let mut query = CanonicalQuery::empty();

    query.push_axis(
        QueryParam::MainCategory,
        context.main_category.as_deref(),
        selection.main_categories(),
    );
    query.push_axis(
        QueryParam::SubCategory,
        context.sub_category.as_deref(),
        selection.sub_categories(),
    );
    query.push_axis(
        QueryParam::BrandName,
        context.brand.as_deref(),
        selection.facet(MultiFacet::Brand),
    );
    query.push_set(QueryParam::Color, selection.facet(MultiFacet::Color));
    query.push_set(QueryParam::Size, selection.facet(MultiFacet::Size));
    query.push_price(QueryParam::MinPrice, selection.price_bound(PriceBound::Min));
    query.push_price(QueryParam::MaxPrice, selection.price_bound(PriceBound::Max));
    query.push_set(QueryParam::Status, selection.facet(MultiFacet::Status));
    if let Some(stock) = selection.stock() {
        query.push(QueryParam::Stock, stock.as_str());
    }
    if let Some((param, value)) = selection.sort().query_param() {
        query.push(param, value);
    }

    query
}

/// Advisory problems with price input. The query is sent regardless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationGap {
    /// A bound that is not a plain decimal amount.
    NotNumeric { bound: PriceBound, value: String },
    /// Both bounds parse but min is above max.
    Inverted { min: Price, max: Price },
}

impl fmt::Display for ValidationGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationGap::NotNumeric { bound, value } => {
                let which = match bound {
                    PriceBound::Min => "min_price",
                    PriceBound::Max => "max_price",
                };
                write!(f, "{} is not a number: {:?}", which, value)
            }
            ValidationGap::Inverted { min, max } => {
                write!(f, "min_price {} is above max_price {}", min, max)
            }
        }
    }
}

/// Inspect the selection's price bounds without rejecting anything.
pub fn price_range_gap(selection: &FilterSelection) -> Option<ValidationGap> {
    let parse = |bound: PriceBound| -> Result<Option<Price>, ValidationGap> {
        match selection.price_bound(bound).map(str::trim).filter(|t| !t.is_empty()) {
            None => Ok(None),
            Some(text) => Price::parse(text).map(Some).map_err(|_| ValidationGap::NotNumeric {
                bound,
                value: text.to_string(),
            }),
        }
    };

    match (parse(PriceBound::Min), parse(PriceBound::Max)) {
        (Err(gap), _) | (_, Err(gap)) => Some(gap),
        (Ok(Some(min)), Ok(Some(max))) if min > max => Some(ValidationGap::Inverted { min, max }),
        _ => None,
    }
}

fn encode_component(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(byte as char)
            }
            b' ' => result.push('+'),
            _ => result.push_str(&format!("%{:02X}", byte)),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FacetCatalog;
    use crate::search::{FilterPanel, SortKey, StockFilter};

    fn panel() -> FilterPanel {
        FilterPanel::new(FacetCatalog::shared())
    }

    #[test]
    fn test_empty_is_fetch_all() {
        let query = build(&FilterSelection::new(), &PageContext::none());
        assert!(query.is_fetch_all());
        assert_eq!(query.to_query_string(), "");
        assert_eq!(query.cache_key(), "products:all");
    }

    #[test]
    fn test_parameter_order_is_fixed() {
        let mut p = panel();
        p.set_sort(SortKey::PriceDesc);
        p.set_stock(StockFilter::Restock);
        p.toggle_multi(MultiFacet::Status, "on sale");
        p.set_price_bound(PriceBound::Max, "200");
        p.set_price_bound(PriceBound::Min, "20");
        p.toggle_multi(MultiFacet::Size, "M");
        p.toggle_multi(MultiFacet::Color, "Navy");
        p.toggle_multi(MultiFacet::Brand, "Venroy");
        p.toggle_category("Hats & Headwear");

        let query = build(&p.commit(), &PageContext::none());
        let names: Vec<_> = query.pairs().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "main_category",
                "sub_category",
                "sub_category",
                "sub_category",
                "brand_name",
                "color",
                "size",
                "min_price",
                "max_price",
                "status",
                "stock",
                "sort_by_price",
            ]
        );
        assert_eq!(query.values(QueryParam::SubCategory), vec!["Beanies", "Caps", "Sun Hats"]);
        assert_eq!(query.values(QueryParam::Stock), vec!["re-stock"]);
        assert_eq!(query.values(QueryParam::SortByPrice), vec!["desc"]);
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let mut a = panel();
        a.toggle_multi(MultiFacet::Color, "Teal");
        a.toggle_multi(MultiFacet::Color, "Black");
        a.toggle_multi(MultiFacet::Color, "Olive");

        let mut b = panel();
        b.toggle_multi(MultiFacet::Color, "Olive");
        b.toggle_multi(MultiFacet::Color, "Teal");
        b.toggle_multi(MultiFacet::Color, "Black");

        let ctx = PageContext::brand("Venroy");
        let qa = build(&a.commit(), &ctx);
        let qb = build(&b.commit(), &ctx);
        assert_eq!(qa.to_query_string(), qb.to_query_string());
        assert_eq!(qa, build(&a.commit(), &ctx));
        assert_eq!(qa.values(QueryParam::Color), vec!["Black", "Olive", "Teal"]);
    }

    #[test]
    fn test_page_context_wins_per_axis() {
        let mut p = panel();
        p.toggle_multi(MultiFacet::Brand, "Asha Jasper");
        p.toggle_multi(MultiFacet::Brand, "Venroy");
        p.toggle_category("Jewellery");

        let query = build(&p.commit(), &PageContext::brand("The Snakehole"));
        assert_eq!(query.values(QueryParam::BrandName), vec!["The Snakehole"]);
        assert_eq!(query.values(QueryParam::MainCategory), vec!["Jewellery"]);

        let ctx = PageContext::category("Men's Clothing", Some("Jeans".to_string()));
        let query = build(&p.commit(), &ctx);
        assert_eq!(query.values(QueryParam::MainCategory), vec!["Men's Clothing"]);
        assert_eq!(query.values(QueryParam::SubCategory), vec!["Jeans"]);
        assert_eq!(query.values(QueryParam::BrandName), vec!["Asha Jasper", "Venroy"]);
    }

    #[test]
    fn test_blank_prices_are_skipped() {
        let mut p = panel();
        p.set_price_bound(PriceBound::Min, "   ");
        p.set_price_bound(PriceBound::Max, " 150 ");
        let query = build(&p.commit(), &PageContext::none());
        assert_eq!(query.values(QueryParam::MinPrice), Vec::<&str>::new());
        assert_eq!(query.values(QueryParam::MaxPrice), vec!["150"]);
    }

    #[test]
    fn test_unchecked_prices_pass_through() {
        let mut p = panel();
        p.set_price_bound(PriceBound::Min, "900");
        p.set_price_bound(PriceBound::Max, "10");
        let query = build(&p.commit(), &PageContext::none());
        assert_eq!(query.values(QueryParam::MinPrice), vec!["900"]);
        assert_eq!(query.values(QueryParam::MaxPrice), vec!["10"]);
    }

    #[test]
    fn test_sort_none_emits_nothing() {
        let mut p = panel();
        p.set_sort(SortKey::None);
        assert!(build(&p.commit(), &PageContext::none()).is_empty());

        p.set_sort(SortKey::New);
        let query = build(&p.commit(), &PageContext::none());
        assert_eq!(query.to_query_string(), "sort_by_new=desc");
    }

    #[test]
    fn test_query_string_encoding() {
        let query = build(
            &FilterSelection::new(),
            &PageContext::category("Men's Shoes", Some("Sandals & Slides".to_string())),
        );
        assert_eq!(
            query.to_query_string(),
            "main_category=Men%27s+Shoes&sub_category=Sandals+%26+Slides"
        );
    }

    #[test]
    fn test_price_range_gap() {
        let mut p = panel();
        assert_eq!(price_range_gap(&p.commit()), None);

        p.set_price_bound(PriceBound::Min, "50");
        p.set_price_bound(PriceBound::Max, "20");
        assert!(matches!(
            price_range_gap(&p.commit()),
            Some(ValidationGap::Inverted { .. })
        ));

        p.set_price_bound(PriceBound::Max, "lots");
        assert_eq!(
            price_range_gap(&p.commit()),
            Some(ValidationGap::NotNumeric {
                bound: PriceBound::Max,
                value: "lots".to_string()
            })
        );

        p.set_price_bound(PriceBound::Max, "75.50");
        assert_eq!(price_range_gap(&p.commit()), None);
    }
}
