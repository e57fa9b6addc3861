//! Facets command: list the facet catalog.

use anyhow::Result;
use serde::Serialize;
use shelf_commerce::search::SortKey;
use shelf_commerce::CommerceError;

use super::FacetsArgs;
use crate::context::Context;

#[derive(Debug, Serialize)]
struct SortOption {
    key: &'static str,
    label: &'static str,
}

/// Run the facets command.
pub async fn run(args: FacetsArgs, ctx: &Context) -> Result<()> {
    let catalog = &ctx.catalog;

    if let Some(name) = &args.category {
        let category = catalog
            .category(name)
            .ok_or_else(|| CommerceError::UnknownCategory(name.clone()))?;

        if ctx.output.is_json() {
            ctx.output.json(category);
            return Ok(());
        }

        ctx.output.header(&format!("{} ({})", category.name, category.slug));
        for sub in &category.subcategories {
            ctx.output.kv(&sub.name, &sub.slug);
        }
        return Ok(());
    }

    let sorts: Vec<SortOption> = SortKey::ALL
        .iter()
        .map(|k| SortOption {
            key: k.as_str(),
            label: k.display_name(),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "departments": catalog.departments(),
            "brands": catalog.brands(),
            "colors": catalog.colors(),
            "statuses": catalog.statuses(),
            "sorts": sorts,
        }));
        return Ok(());
    }

    for department in catalog.departments() {
        ctx.output.header(&department.name);
        for category in &department.categories {
            let subs: Vec<&str> = category.subcategories.iter().map(|s| s.name.as_str()).collect();
            ctx.output.kv(&category.name, &subs.join(", "));
        }
    }

    ctx.output.header("Brands");
    for brand in catalog.brands() {
        ctx.output.list_item(&format!("{} (id {})", brand.name, brand.id));
    }

    ctx.output.header("Colors");
    ctx.output.info(&catalog.colors().join(", "));

    ctx.output.header("Statuses");
    ctx.output.info(&catalog.statuses().join(", "));

    ctx.output.header("Sort");
    for sort in &sorts {
        ctx.output.kv(sort.key, sort.label);
    }

    Ok(())
}
