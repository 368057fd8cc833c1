//! Admin dashboard commands.

use anyhow::Result;
use dialoguer::Confirm;
use storefront_commerce::admin::{recent_first, DashboardStats};
use storefront_commerce::catalog::{ProductAdmin, ProductCatalog, ProductDraft};
use storefront_commerce::{CommerceError, Currency, Money, ProductId};

use super::{AdminArgs, AdminCommand, NewProductArgs, ProductEditArgs, ProductsCommand};
use crate::context::Context;
use crate::output::{status_badge, truncate};

/// Run the admin command.
pub async fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AdminCommand::Stats => show_stats(ctx).await,
        AdminCommand::Orders { limit } => list_orders(limit, ctx),
        AdminCommand::Products(args) => match args.command {
            Some(ProductsCommand::List) | None => list_products(ctx).await,
            Some(ProductsCommand::Add(fields)) => add_product(fields, ctx).await,
            Some(ProductsCommand::Edit { id, fields }) => {
                edit_product(&ProductId::parse(&id), fields, ctx).await
            }
            Some(ProductsCommand::Delete { id, yes }) => {
                delete_product(&ProductId::parse(&id), yes, ctx).await
            }
        },
    }
}

async fn show_stats(ctx: &Context) -> Result<()> {
    let products = ctx.products(None).await;
    let orders = ctx.orders().summaries()?;
    let stats = DashboardStats::compute(products.len(), &orders)?;

    if ctx.output.is_json() {
        ctx.output.json(&stats);
        return Ok(());
    }

    ctx.output.header("Dashboard");
    ctx.output.kv("Products", &stats.total_products.to_string());
    ctx.output.kv("Orders", &stats.total_orders.to_string());
    ctx.output.kv("Revenue", &ctx.price(&stats.revenue));
    Ok(())
}

fn list_orders(limit: Option<usize>, ctx: &Context) -> Result<()> {
    let mut orders = recent_first(ctx.orders().summaries()?);
    if let Some(limit) = limit {
        orders.truncate(limit);
    }

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header("Orders");

    if orders.is_empty() {
        ctx.output.info("No orders yet.");
        return Ok(());
    }

    let widths = [8, 20, 28, 10, 12];
    ctx.output
        .table_row(&["ORDER", "DATE", "CUSTOMER", "TOTAL", "STATUS"], &widths);
    for order in &orders {
        let date = order.created_at.format("%Y-%m-%d %H:%M").to_string();
        let total = ctx.price(&order.total_price);
        let status = status_badge(order.status);
        ctx.output.table_row(
            &[
                order.id.as_str(),
                &date,
                order.email.as_deref().unwrap_or("-"),
                &total,
                &status,
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.info(&format!("Total: {} order(s)", orders.len()));
    Ok(())
}

async fn list_products(ctx: &Context) -> Result<()> {
    let products = ctx.products(None).await;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("Products");

    let widths = [6, 28, 12, 12, 8];
    ctx.output
        .table_row(&["ID", "TITLE", "CATEGORY", "PRICE", "STOCK"], &widths);
    for product in &products {
        let id = product.id.to_string();
        let title = truncate(&product.title, 28);
        let price = ctx.price(&product.price);
        let stock = product
            .inventory_quantity()
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        ctx.output.table_row(
            &[
                &id,
                &title,
                product.category.as_deref().unwrap_or("-"),
                &price,
                &stock,
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.info(&format!("Total: {} product(s)", products.len()));
    Ok(())
}

async fn add_product(fields: NewProductArgs, ctx: &Context) -> Result<()> {
    let draft = ProductDraft {
        title: fields.title,
        description: fields.description,
        price: parse_price(fields.price)?,
        category: fields.category,
        inventory_quantity: fields.stock,
        image_url: fields.image,
    };

    let product = ctx.product_admin()?.create_product(draft).await?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }
    ctx.output
        .success(&format!("Added {} (ID {})", product.title, product.id));
    Ok(())
}

async fn edit_product(id: &ProductId, fields: ProductEditArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.product_admin()?;
    let existing = catalog
        .get_product(id)
        .await?
        .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;

    let mut draft = ProductDraft::from_product(&existing);
    if let Some(title) = fields.title {
        draft.title = title;
    }
    if let Some(price) = fields.price {
        draft.price = parse_price(price)?;
    }
    if let Some(image) = fields.image {
        draft.image_url = image;
    }
    if let Some(category) = fields.category {
        draft.category = Some(category);
    }
    if let Some(description) = fields.description {
        draft.description = Some(description);
    }
    if let Some(stock) = fields.stock {
        draft.inventory_quantity = stock;
    }

    let product = catalog.update_product(id, draft).await?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }
    ctx.output.success(&format!("Updated {} (ID {})", product.title, product.id));
    Ok(())
}

async fn delete_product(id: &ProductId, yes: bool, ctx: &Context) -> Result<()> {
    let catalog = ctx.product_admin()?;
    let existing = catalog
        .get_product(id)
        .await?
        .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} (ID {})?", existing.title, existing.id))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Product kept");
            return Ok(());
        }
    }

    catalog.delete_product(id).await?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "deleted": id }));
        return Ok(());
    }
    ctx.output.success(&format!("Deleted {}", existing.title));
    Ok(())
}

/// Form prices are entered in the catalog currency and must be exact.
fn parse_price(amount: f64) -> Result<Money, CommerceError> {
    Money::try_from_decimal(amount, Currency::default())
        .ok_or_else(|| CommerceError::InvalidAmount(format!("not an exact price: {}", amount)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ProductsArgs;
    use crate::config::CliConfig;
    use std::fs;

    fn admin_ctx(dir: &std::path::Path) -> Context {
        fs::write(
            dir.join("products.json"),
            r#"[{"id": 1, "title": "Hat", "price": 19.99, "images": ["https://example.com/hat.jpg"], "inventory_quantity": 3}]"#,
        )
        .unwrap();
        let mut config = CliConfig::default();
        config.catalog.path = Some("products.json".to_string());
        Context::for_tests(dir, config)
    }

    fn products(command: ProductsCommand) -> AdminArgs {
        AdminArgs {
            command: AdminCommand::Products(ProductsArgs {
                command: Some(command),
            }),
        }
    }

    fn new_scarf() -> NewProductArgs {
        NewProductArgs {
            title: "Silk Scarf".to_string(),
            price: 45.5,
            image: "https://example.com/scarf.jpg".to_string(),
            category: Some("accessories".to_string()),
            description: None,
            stock: 12,
        }
    }

    #[tokio::test]
    async fn test_add_edit_delete_products() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = admin_ctx(dir.path());

        run(products(ProductsCommand::Add(new_scarf())), &ctx)
            .await
            .unwrap();
        let scarf = ctx.find_product(&ProductId::Number(2)).await.unwrap();
        assert_eq!(scarf.price.amount_cents, 4550);
        assert_eq!(scarf.inventory_quantity(), Some(12));

        let edit = ProductsCommand::Edit {
            id: "2".to_string(),
            fields: ProductEditArgs {
                price: Some(39.0),
                stock: Some(0),
                ..Default::default()
            },
        };
        run(products(edit), &ctx).await.unwrap();
        let scarf = ctx.find_product(&ProductId::Number(2)).await.unwrap();
        assert_eq!(scarf.title, "Silk Scarf");
        assert_eq!(scarf.price.amount_cents, 3900);
        assert_eq!(scarf.inventory_quantity(), Some(0));

        let delete = ProductsCommand::Delete {
            id: "1".to_string(),
            yes: true,
        };
        run(products(delete), &ctx).await.unwrap();
        let remaining = ctx.products(None).await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, ProductId::Number(2));

        run(products(ProductsCommand::List), &ctx).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_forms_leave_catalog_alone() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = admin_ctx(dir.path());
        let before = fs::read_to_string(dir.path().join("products.json")).unwrap();

        let mut negative = new_scarf();
        negative.price = -5.0;
        let err = run(products(ProductsCommand::Add(negative)), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CommerceError>(),
            Some(CommerceError::InvalidAmount(_))
        ));

        let mut sub_cent = new_scarf();
        sub_cent.price = 45.555;
        assert!(run(products(ProductsCommand::Add(sub_cent)), &ctx).await.is_err());

        let edit_missing = ProductsCommand::Edit {
            id: "99".to_string(),
            fields: ProductEditArgs::default(),
        };
        let err = run(products(edit_missing), &ctx).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CommerceError>(),
            Some(CommerceError::ProductNotFound(_))
        ));

        let delete_missing = ProductsCommand::Delete {
            id: "99".to_string(),
            yes: true,
        };
        assert!(run(products(delete_missing), &ctx).await.is_err());

        assert_eq!(
            fs::read_to_string(dir.path().join("products.json")).unwrap(),
            before
        );
    }

    #[tokio::test]
    async fn test_products_need_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::for_tests(dir.path(), CliConfig::default());

        assert!(run(products(ProductsCommand::Add(new_scarf())), &ctx)
            .await
            .is_err());
        run(products(ProductsCommand::List), &ctx).await.unwrap();
    }
}
