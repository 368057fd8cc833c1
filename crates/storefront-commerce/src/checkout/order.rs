//! Order types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::checkout::ShippingAddress;
use crate::error::CommerceError;
use crate::ids::{ProductId, UserId};
use crate::money::{self, Money};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order being prepared.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One row of an order's item list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: i64,
    /// Unit price copied from the cart when the order was placed.
    #[serde(with = "money::decimal")]
    pub price_at_purchase: Money,
}

/// An order ready to be submitted to the order backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewOrder {
    /// Signed-in customer, `None` for guest checkout.
    pub user_id: Option<UserId>,
    pub status: OrderStatus,
    #[serde(with = "money::decimal")]
    pub total_price: Money,
    pub shipping_address: ShippingAddress,
    pub items: Vec<OrderItem>,
}

impl NewOrder {
    /// Build a pending order from the cart contents.
    pub fn from_cart(
        cart: &Cart,
        shipping_address: ShippingAddress,
        user_id: Option<UserId>,
    ) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let items = cart
            .iter()
            .map(|item| OrderItem {
                product_id: item.id.clone(),
                quantity: item.quantity,
                price_at_purchase: item.price,
            })
            .collect();

        Ok(Self {
            user_id,
            status: OrderStatus::Pending,
            total_price: cart.total()?,
            shipping_address,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::money::Currency;

    fn address() -> ShippingAddress {
        ShippingAddress {
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            address: "12 Analytical Way".to_string(),
            city: "London".to_string(),
            zip: "N1 9GU".to_string(),
        }
    }

    #[test]
    fn test_order_status_serde() {
        assert_eq!(serde_json::to_string(&OrderStatus::Shipped).unwrap(), r#""shipped""#);
        let status: OrderStatus = serde_json::from_str(r#""cancelled""#).unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
        assert_eq!(status.to_string(), "Cancelled");
    }

    #[test]
    fn test_from_cart() {
        let mut cart = Cart::new();
        cart.add(&Product::new(1, "Shirt", Money::from_decimal(29.99, Currency::USD)), 1)
            .unwrap();
        cart.add(&Product::new(2, "Trousers", Money::from_decimal(49.99, Currency::USD)), 3)
            .unwrap();

        let order = NewOrder::from_cart(&cart, address(), Some(UserId::new("u-1"))).unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_price.display_amount(), "179.96");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].quantity, 1);
        assert_eq!(order.items[1].product_id, ProductId::Number(2));
        assert_eq!(order.items[1].price_at_purchase.amount_cents, 4999);

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["total_price"], 179.96);
        assert_eq!(json["shipping_address"]["firstName"], "Ada");
    }

    #[test]
    fn test_from_empty_cart() {
        let result = NewOrder::from_cart(&Cart::new(), address(), None);
        assert!(matches!(result, Err(CommerceError::EmptyCart)));
    }
}
