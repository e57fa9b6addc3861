//! Suggest command: type-ahead over the page scope.

use anyhow::{bail, Result};
use shelf_data::Refresh;

use super::SuggestArgs;
use crate::context::Context;

/// Run the suggest command.
pub async fn run(args: SuggestArgs, ctx: &Context) -> Result<()> {
    let page_context = args.context.resolve(&ctx.catalog)?;
    let session = ctx.session(page_context)?;

    let spinner = ctx.output.spinner("Loading catalog scope...");
    let scope = session.mount_scope().await;
    spinner.finish_and_clear();

    if scope != Refresh::Applied {
        bail!(
            "Failed to load products from {}",
            ctx.config.catalog.base_url
        );
    }

    let suggestions = session.suggest(&args.keyword);

    if ctx.output.is_json() {
        ctx.output.json(&suggestions);
        return Ok(());
    }

    if suggestions.is_empty() {
        ctx.output.info(&format!("No products match '{}'", args.keyword.trim()));
        return Ok(());
    }

    ctx.output.header(&format!("Suggestions for '{}'", args.keyword.trim()));
    for product in &suggestions {
        ctx.output
            .list_item(&format!("{} ({}, {})", product.name, product.brand, product.price));
    }

    Ok(())
}
