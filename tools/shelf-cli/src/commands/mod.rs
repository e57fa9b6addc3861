//! CLI command implementations.

pub mod browse;
pub mod config;
pub mod facets;
pub mod query;
pub mod suggest;

use anyhow::{bail, Context as _, Result};
use clap::{Args, Subcommand};
use shelf_commerce::catalog::FacetCatalog;
use shelf_commerce::search::{FilterPanel, MultiFacet, PageContext, PriceBound, SortKey, StockFilter};
use shelf_commerce::{BrandId, CommerceError};

/// Fixed page context, as set by the page being browsed.
#[derive(Args, Debug, Default)]
pub struct ContextFlags {
    /// Brand page, by brand name.
    #[arg(long, conflicts_with_all = ["brand_id", "category"])]
    pub brand: Option<String>,

    /// Brand page, by brand id.
    #[arg(long, conflicts_with = "category")]
    pub brand_id: Option<u64>,

    /// Category page, by route slug (e.g. mens-shoes).
    #[arg(long)]
    pub category: Option<String>,

    /// Subcategory slug under --category (e.g. sneakers).
    #[arg(long, requires = "category")]
    pub subcategory: Option<String>,
}

impl ContextFlags {
    pub fn resolve(&self, catalog: &FacetCatalog) -> Result<PageContext> {
        if let Some(name) = &self.brand {
            return Ok(PageContext::brand(name.clone()));
        }
        if let Some(id) = self.brand_id {
            return Ok(PageContext::from_brand_id(catalog, BrandId::new(id))?);
        }
        if let Some(slug) = &self.category {
            return PageContext::from_category_route(catalog, slug, self.subcategory.as_deref())
                .with_context(|| format!("Cannot open category route '{}'", slug));
        }
        Ok(PageContext::none())
    }
}

/// Facet choices applied to the filter panel before committing.
#[derive(Args, Debug, Default)]
pub struct FilterFlags {
    /// Toggle a main category (display name, e.g. "Men's Shoes").
    #[arg(long = "main-category", value_name = "NAME")]
    pub main_categories: Vec<String>,

    /// Toggle a subcategory (display name, e.g. "Sneakers").
    #[arg(long = "sub-category", value_name = "NAME")]
    pub sub_categories: Vec<String>,

    /// Toggle a facet value: brand=NAME, color=NAME, size=N or status=NAME.
    #[arg(short, long = "facet", value_name = "FACET=VALUE")]
    pub facets: Vec<String>,

    /// Minimum price, sent as typed.
    #[arg(long)]
    pub min_price: Option<String>,

    /// Maximum price, sent as typed.
    #[arg(long)]
    pub max_price: Option<String>,

    /// Only products flagged for restock.
    #[arg(long)]
    pub restock: bool,
}

impl FilterFlags {
    /// Apply every flag to the panel, in the order given.
    pub fn apply(&self, panel: &mut FilterPanel) -> Result<()> {
        for name in &self.main_categories {
            if panel.catalog().category(name).is_none() {
                return Err(CommerceError::UnknownCategory(name.clone()).into());
            }
            panel.toggle_category(name);
        }
        for name in &self.sub_categories {
            panel.toggle_subcategory(name);
        }
        for pair in &self.facets {
            let (facet, value) = parse_facet(pair)?;
            panel.toggle_multi(facet, value);
        }
        if let Some(min) = &self.min_price {
            panel.set_price_bound(PriceBound::Min, min.clone());
        }
        if let Some(max) = &self.max_price {
            panel.set_price_bound(PriceBound::Max, max.clone());
        }
        if self.restock {
            panel.set_stock(StockFilter::Restock);
        }
        Ok(())
    }
}

fn parse_facet(pair: &str) -> Result<(MultiFacet, &str)> {
    let Some((name, value)) = pair.split_once('=') else {
        bail!("Expected FACET=VALUE, got '{}'", pair);
    };
    let value = value.trim();
    if value.is_empty() {
        bail!("Empty value for facet '{}'", name);
    }
    Ok((MultiFacet::from_param(name)?, value))
}

/// Parse a `--sort` value.
pub fn parse_sort(value: &str) -> Result<SortKey> {
    value.parse::<SortKey>().map_err(Into::into)
}

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    #[command(flatten)]
    pub context: ContextFlags,

    #[command(flatten)]
    pub filters: FilterFlags,

    /// Sort order: none, new, price_asc, price_desc or rating.
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Page to show (clamped to the available pages).
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Narrow the page scope by product name instead of filtering.
    #[arg(long)]
    pub search: Option<String>,
}

/// Arguments for the suggest command.
#[derive(Args)]
pub struct SuggestArgs {
    /// Partial product name.
    pub keyword: String,

    #[command(flatten)]
    pub context: ContextFlags,
}

/// Arguments for the query command.
#[derive(Args)]
pub struct QueryArgs {
    #[command(flatten)]
    pub context: ContextFlags,

    #[command(flatten)]
    pub filters: FilterFlags,

    /// Sort order: none, new, price_asc, price_desc or rating.
    #[arg(short, long)]
    pub sort: Option<String>,
}

/// Arguments for the facets command.
#[derive(Args)]
pub struct FacetsArgs {
    /// Only show subcategories of this category.
    #[arg(long)]
    pub category: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
