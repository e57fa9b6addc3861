//! Sort keys and the sort controller.

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::search::QueryParam;

/// Sort options for the product grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Service default order.
    #[default]
    None,
    /// Most recently edited first.
    New,
    /// Price, low to high.
    PriceAsc,
    /// Price, high to low.
    PriceDesc,
    /// Most wishlisted first.
    Popularity,
}

impl SortKey {
    /// All keys in button order.
    pub const ALL: [SortKey; 5] = [
        SortKey::None,
        SortKey::New,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::Popularity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::New => "new",
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::Popularity => "rating",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::None => "Default",
            SortKey::New => "Edited time",
            SortKey::PriceAsc => "Price Ascending",
            SortKey::PriceDesc => "Price Descending",
            SortKey::Popularity => "Popularity",
        }
    }

    /// The single query parameter this key contributes, if any.
    pub fn query_param(&self) -> Option<(QueryParam, &'static str)> {
        match self {
            SortKey::None => None,
            SortKey::New => Some((QueryParam::SortByNew, "desc")),
            SortKey::PriceAsc => Some((QueryParam::SortByPrice, "asc")),
            SortKey::PriceDesc => Some((QueryParam::SortByPrice, "desc")),
            SortKey::Popularity => Some((QueryParam::SortByPopularity, "true")),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "" | "none" => Ok(SortKey::None),
            "new" | "newest" => Ok(SortKey::New),
            "price_asc" => Ok(SortKey::PriceAsc),
            "price_desc" => Ok(SortKey::PriceDesc),
            "rating" | "popularity" => Ok(SortKey::Popularity),
            _ => Err(CommerceError::UnknownSortKey(s.to_string())),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holds exactly one active sort key.
///
/// Re-selecting the active key does nothing; there is no toggle-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortController {
    active: SortKey,
}

impl SortController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> SortKey {
        self.active
    }

    /// Make `key` active. Returns `false` when it already was.
    pub fn select(&mut self, key: SortKey) -> bool {
        if self.active == key {
            return false;
        }
        self.active = key;
        true
    }
}
