//! Checkout command.

use anyhow::{bail, Result};
use serde::Serialize;
use storefront_commerce::checkout::{place_order, ShippingAddress};
use storefront_commerce::{CommerceError, OrderId, UserId};

use super::CheckoutArgs;
use crate::context::Context;

#[derive(Serialize)]
struct Placed {
    order_id: OrderId,
    total: f64,
    items: i64,
}

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.cart_store()?;
    let gateway = ctx.orders();

    if store.cart().is_empty() {
        bail!("Your cart is empty. Add something with `storefront cart add <ID>` first.");
    }

    let total = store.cart_total()?;
    let items = store.cart_count()?;
    let shipping_address = ShippingAddress {
        email: args.email,
        first_name: args.first_name,
        last_name: args.last_name,
        address: args.address,
        city: args.city,
        zip: args.zip,
    };

    ctx.output.header("Checkout");
    ctx.output.kv("Ship to", &shipping_address.full_name());
    ctx.output.kv("Address", &shipping_address.one_line());
    ctx.output.kv("Total", &ctx.price(&total));

    let spinner = ctx.output.spinner("Placing order...");
    let result = place_order(
        &mut store,
        &gateway,
        shipping_address,
        args.user.map(UserId::new),
    )
    .await;
    spinner.finish_and_clear();

    let order_id = match result {
        Ok(id) => id,
        Err(CommerceError::OrderSubmission(reason)) => {
            ctx.output.debug(&reason);
            bail!("Failed to place order. Please try again.");
        }
        Err(e) => return Err(e.into()),
    };

    if ctx.output.is_json() {
        ctx.output.json(&Placed {
            order_id,
            total: total.to_decimal(),
            items,
        });
        return Ok(());
    }

    ctx.output.success(&format!("Order {} placed", order_id));
    ctx.output.debug(&format!("Written to {}", gateway.path().display()));
    ctx.output.info("Thank you for your purchase!");
    Ok(())
}
