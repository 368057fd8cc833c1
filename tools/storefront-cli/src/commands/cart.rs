//! Cart commands.

use anyhow::Result;
use dialoguer::Confirm;
use serde::Serialize;
use storefront_commerce::cart::{CartStore, LineItem};
use storefront_commerce::{CommerceError, ProductId};

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.cart_store()?;

    match args.command {
        Some(CartCommand::Show) | None => show_cart(&store, ctx),
        Some(CartCommand::Add { id, quantity }) => {
            add_item(&mut store, &ProductId::parse(&id), quantity, ctx).await
        }
        Some(CartCommand::Remove { id }) => remove_item(&mut store, &ProductId::parse(&id), ctx),
        Some(CartCommand::Update { id, quantity }) => {
            update_item(&mut store, &ProductId::parse(&id), quantity, ctx)
        }
        Some(CartCommand::Clear { yes }) => clear_cart(&mut store, yes, ctx),
    }
}

/// Cart as printed in JSON mode.
#[derive(Serialize)]
struct CartView<'a> {
    items: &'a [LineItem],
    count: i64,
    total: f64,
}

fn show_cart(store: &CartStore, ctx: &Context) -> Result<()> {
    let total = store.cart_total()?;

    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            items: store.items(),
            count: store.cart_count()?,
            total: total.to_decimal(),
        });
        return Ok(());
    }

    ctx.output.header("Your Cart");

    if store.cart().is_empty() {
        ctx.output.info("Your cart is empty.");
        ctx.output.info("Run `storefront catalog list` to browse products.");
        return Ok(());
    }

    let widths = [6, 28, 5, 10, 10];
    ctx.output
        .table_row(&["ID", "ITEM", "QTY", "PRICE", "SUBTOTAL"], &widths);
    for item in store.items() {
        let id = item.id.to_string();
        let title = truncate(item.title().unwrap_or("-"), 28);
        let quantity = item.quantity.to_string();
        let price = ctx.price(&item.price);
        let subtotal = ctx.price(&item.subtotal()?);
        ctx.output
            .table_row(&[&id, &title, &quantity, &price, &subtotal], &widths);
    }

    ctx.output.info("");
    ctx.output.kv("Items", &store.cart_count()?.to_string());
    ctx.output.kv("Total", &ctx.price(&total));
    Ok(())
}

async fn add_item(
    store: &mut CartStore,
    id: &ProductId,
    quantity: i64,
    ctx: &Context,
) -> Result<()> {
    let Some(product) = ctx.find_product(id).await else {
        return Err(CommerceError::ProductNotFound(id.to_string()).into());
    };

    store.add_to_cart(&product, quantity)?;
    ctx.output
        .success(&format!("Added {} × {} to cart", quantity, product.title));
    show_cart(store, ctx)
}

fn remove_item(store: &mut CartStore, id: &ProductId, ctx: &Context) -> Result<()> {
    if store.remove_from_cart(id) {
        ctx.output.success(&format!("Removed {} from cart", id));
    } else {
        ctx.output.warn(&format!("{} is not in the cart", id));
    }
    show_cart(store, ctx)
}

fn update_item(store: &mut CartStore, id: &ProductId, quantity: i64, ctx: &Context) -> Result<()> {
    if !store.update_quantity(id, quantity) {
        ctx.output.warn(&format!("{} is not in the cart", id));
    } else if quantity < 1 {
        ctx.output.success(&format!("Removed {} from cart", id));
    } else {
        ctx.output
            .success(&format!("Set quantity of {} to {}", id, quantity));
    }
    show_cart(store, ctx)
}

fn clear_cart(store: &mut CartStore, yes: bool, ctx: &Context) -> Result<()> {
    if store.cart().is_empty() {
        ctx.output.info("Cart is already empty");
        return show_cart(store, ctx);
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} item(s) from the cart?", store.cart_count()?))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cart left unchanged");
            return Ok(());
        }
    }

    store.clear_cart();
    ctx.output.success("Cart cleared");
    show_cart(store, ctx)
}
