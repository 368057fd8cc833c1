//! Checkout module.
//!
//! Turns the cart into an order submission for the hosted database.

mod address;
mod gateway;
mod order;

pub use address::ShippingAddress;
pub use gateway::{place_order, InMemoryOrderGateway, OrderGateway};
pub use order::{NewOrder, OrderItem, OrderStatus};
