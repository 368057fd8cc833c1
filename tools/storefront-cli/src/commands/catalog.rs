//! Catalog commands.

use anyhow::Result;
use storefront_commerce::catalog::Product;
use storefront_commerce::{CommerceError, ProductId};

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(CatalogCommand::List { category }) => list_products(category.as_deref(), ctx).await,
        None => list_products(None, ctx).await,
        Some(CatalogCommand::Show { id }) => show_product(&ProductId::parse(&id), ctx).await,
    }
}

async fn list_products(category: Option<&str>, ctx: &Context) -> Result<()> {
    let products = ctx.products(category).await;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    match category {
        Some(category) => ctx.output.header(&format!("Products in {}", category)),
        None => ctx.output.header("Products"),
    }

    if products.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }

    ctx.output
        .table_row(&["ID", "TITLE", "CATEGORY", "PRICE"], &[6, 28, 12, 12]);
    for product in &products {
        let id = product.id.to_string();
        let title = truncate(&product.title, 28);
        let price = price_label(product, ctx);
        ctx.output.table_row(
            &[&id, &title, product.category.as_deref().unwrap_or("-"), &price],
            &[6, 28, 12, 12],
        );
    }

    ctx.output.info("");
    ctx.output.info(&format!("Total: {} product(s)", products.len()));
    Ok(())
}

async fn show_product(id: &ProductId, ctx: &Context) -> Result<()> {
    let Some(product) = ctx.find_product(id).await else {
        return Err(CommerceError::ProductNotFound(id.to_string()).into());
    };

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.title);
    ctx.output.kv("ID", &product.id.to_string());
    ctx.output.kv("Price", &price_label(&product, ctx));
    if let Some(category) = &product.category {
        ctx.output.kv("Category", category);
    }
    if let Some(description) = &product.description {
        ctx.output.kv("Description", description);
    }
    for image in &product.images {
        ctx.output.list_item(image);
    }
    Ok(())
}

fn price_label(product: &Product, ctx: &Context) -> String {
    match product.compare_at_price {
        Some(compare) if product.is_on_sale() => {
            format!("{} (was {})", ctx.price(&product.price), ctx.price(&compare))
        }
        _ => ctx.price(&product.price),
    }
}
