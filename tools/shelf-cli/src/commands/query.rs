//! Query command: print the canonical query without fetching.

use anyhow::Result;
use serde::Serialize;
use shelf_commerce::search::{build, price_range_gap, FilterPanel};

use super::{parse_sort, QueryArgs};
use crate::context::Context;

#[derive(Debug, Serialize)]
struct QueryReport<'a> {
    query: String,
    cache_key: String,
    params: Vec<(&'static str, &'a str)>,
    warnings: Vec<String>,
}

/// Run the query command.
pub async fn run(args: QueryArgs, ctx: &Context) -> Result<()> {
    let page_context = args.context.resolve(&ctx.catalog)?;

    let mut panel = FilterPanel::new(ctx.catalog.clone());
    args.filters.apply(&mut panel)?;
    if let Some(sort) = args.sort.as_deref() {
        panel.set_sort(parse_sort(sort)?);
    }

    let selection = panel.commit();
    let query = build(&selection, &page_context);
    let warnings: Vec<String> = price_range_gap(&selection)
        .map(|gap| gap.to_string())
        .into_iter()
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&QueryReport {
            query: query.to_query_string(),
            cache_key: query.cache_key(),
            params: query.as_wire_pairs(),
            warnings,
        });
        return Ok(());
    }

    for warning in &warnings {
        ctx.output.warn(warning);
    }

    let endpoint = format!(
        "{}{}",
        ctx.config.catalog.base_url.trim_end_matches('/'),
        ctx.config.catalog.path
    );
    if query.is_fetch_all() {
        println!("{}", endpoint);
    } else {
        println!("{}?{}", endpoint, query);
    }
    ctx.output.debug(&format!("Cache key: {}", query.cache_key()));

    Ok(())
}
