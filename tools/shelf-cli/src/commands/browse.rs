//! Browse command: fetch a page of products.

use anyhow::{bail, Result};
use serde::Serialize;
use shelf_commerce::catalog::Product;
use shelf_commerce::search::{FilterPanel, SortKey};
use shelf_data::{BrowseSession, HttpTransport, Refresh};

use super::{parse_sort, BrowseArgs, FilterFlags};
use crate::context::Context;
use crate::output::{format_buttons, status_badge};

/// Machine-readable page.
#[derive(Debug, Serialize)]
struct PageReport {
    context: String,
    query: String,
    keyword: Option<String>,
    sort: String,
    page: usize,
    total_pages: usize,
    total: usize,
    buttons: Vec<String>,
    error: Option<String>,
    products: Vec<Product>,
}

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let page_context = args.context.resolve(&ctx.catalog)?;
    let sort = args.sort.as_deref().map(parse_sort).transpose()?;
    let session = ctx.session(page_context)?;

    let spinner = ctx.output.spinner("Loading products...");
    let mounted = session.mount().await;
    spinner.finish_and_clear();
    ctx.output.debug(&format!(
        "Mounted: scope {:?}, page {:?}",
        mounted.scope, mounted.page
    ));

    session.edit(|panel| stage(&args.filters, sort, panel))?;
    if session.draft() != session.selection() {
        let spinner = ctx.output.spinner("Applying filters...");
        let outcome = session.commit().await;
        spinner.finish_and_clear();
        ctx.output.debug(&format!("Filters and sort {}: {:?}", session.sort(), outcome));
    }

    if let Some(keyword) = &args.search {
        if mounted.scope != Refresh::Applied {
            ctx.output.warn("Search scope could not be loaded; results may be empty");
        }
        session.submit_search(keyword);
    }

    session.go_to(args.page);

    let view = session.view();
    if view.error.is_some() && view.is_empty() {
        bail!(
            "{} from {}",
            view.error.as_deref().unwrap_or_default(),
            ctx.config.catalog.base_url
        );
    }

    render(&session, ctx);
    Ok(())
}

/// Put filters and sort into the draft so one commit sends both.
fn stage(filters: &FilterFlags, sort: Option<SortKey>, panel: &mut FilterPanel) -> Result<()> {
    filters.apply(panel)?;
    if let Some(key) = sort {
        panel.set_sort(key);
    }
    Ok(())
}

fn render(session: &BrowseSession<HttpTransport>, ctx: &Context) {
    let view = session.view();
    let pagination = session.pagination();
    let items = session.current_items();
    let keyword = session.keyword();

    if ctx.output.is_json() {
        let report = PageReport {
            context: session.context().label(),
            query: session.query().to_query_string(),
            keyword: (!keyword.is_empty()).then_some(keyword),
            sort: session.sort().as_str().to_string(),
            page: pagination.page(),
            total_pages: pagination.total_pages(),
            total: pagination.total(),
            buttons: session.page_buttons().iter().map(ToString::to_string).collect(),
            error: view.error,
            products: items,
        };
        ctx.output.json(&report);
        return;
    }

    ctx.output.header(&format!("Products ({})", session.context().label()));
    if let Some(error) = &view.error {
        ctx.output.warn(&format!("{}; showing previous results", error));
    }
    if items.is_empty() {
        ctx.output.info("No products match.");
        return;
    }

    let name_width = ctx.output.term_width().saturating_sub(50).clamp(16, 48);
    let widths = [8, name_width, 16, 10, 10];
    ctx.output
        .table_row(&["ID", "NAME", "BRAND", "PRICE", "STATUS"], &widths);
    for product in &items {
        let id = product.id.to_string();
        let price = product.price.to_string();
        let status = status_badge(&product.status);
        ctx.output.table_row(
            &[&id, &product.name, &product.brand, &price, &status],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.info(&format!(
        "Showing {}-{} of {} (sort: {})",
        pagination.start_item(),
        pagination.end_item(),
        pagination.total(),
        session.sort().display_name()
    ));
    ctx.output
        .info(&format_buttons(&session.page_buttons(), pagination.page()));
}
