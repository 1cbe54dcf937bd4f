use anyhow::{Context, Result};
use restomod_core::{CatalogItem, FilterSpec, PriceRange, filter, sort_visible};
use tracing::info;

use crate::cli::CatalogArgs;
use crate::commands::{AppContext, format_price};

pub async fn handle(ctx: &AppContext, args: CatalogArgs) -> Result<()> {
    let items = ctx
        .client
        .fetch_restomods()
        .await
        .context("Could not load the catalog. Run the same command again to retry")?;

    let spec = build_spec(&items, &args)?;
    let mut visible = filter(&items, &spec);
    sort_visible(&mut visible, args.sort.unwrap_or(ctx.config.catalog.default_sort));

    info!("{} of {} restomods match", visible.len(), items.len());

    if ctx.json {
        return ctx.print_json(&visible);
    }

    if visible.is_empty() {
        println!("No restomods match these filters.");
        return Ok(());
    }

    for item in visible {
        println!("{} [{}]", item.name, item.status);
        println!("  ID: {}", item.id);
        if let Some(brand) = &item.brand_name {
            println!("  Brand: {}", brand);
        }
        println!("  Price: {}", format_price(item.price));
        if let Some(image) = item.cover_image() {
            println!("  Image: {}", image);
        }
    }

    Ok(())
}

/// Start from the defaults for this collection and apply the flags
fn build_spec(items: &[CatalogItem], args: &CatalogArgs) -> Result<FilterSpec> {
    let mut spec = FilterSpec::for_items(items)
        .with_brand(args.brand.clone())
        .with_status(args.status.clone());

    if let Some(search) = &args.search {
        spec = spec.with_search(search.as_str());
    }

    if args.min_price.is_some() || args.max_price.is_some() {
        let min = args.min_price.unwrap_or(0.0);
        let max = args.max_price.unwrap_or(spec.price_range.max());
        spec = spec.with_price_range(PriceRange::new(min, max)?);
    }

    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use restomod_core::{ItemStatus, Selector};

    fn args() -> CatalogArgs {
        CatalogArgs {
            search: None,
            brand: Selector::All,
            status: Selector::All,
            min_price: None,
            max_price: None,
            sort: None,
        }
    }

    fn items() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("1", "Giulia")
                .with_brand("Alfa Romeo")
                .with_price(80000.0)
                .with_status(ItemStatus::Available),
            CatalogItem::new("2", "Testarossa")
                .with_brand("Ferrari")
                .with_price(2_400_000.0)
                .with_status(ItemStatus::Sold),
        ]
    }

    #[test]
    fn test_no_flags_keeps_everything() {
        let items = items();
        let spec = build_spec(&items, &args()).unwrap();
        assert_eq!(filter(&items, &spec).len(), 2);
        assert_eq!(spec.price_range.max(), 2_400_000.0);
    }

    #[test]
    fn test_min_price_keeps_observed_ceiling() {
        let items = items();
        let spec = build_spec(
            &items,
            &CatalogArgs {
                min_price: Some(100000.0),
                ..args()
            },
        )
        .unwrap();

        let visible = filter(&items, &spec);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Testarossa");
    }

    #[test]
    fn test_inverted_range_rejected() {
        let items = items();
        let result = build_spec(
            &items,
            &CatalogArgs {
                min_price: Some(5.0),
                max_price: Some(1.0),
                ..args()
            },
        );
        assert!(result.is_err());
    }
}
