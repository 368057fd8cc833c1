//! Shopping cart module.
//!
//! [`Cart`] holds the merge/remove/update rules and the derived totals as
//! plain data; [`CartStore`] wraps it with drawer state and persistence.

#[allow(clippy::module_inception)]
mod cart;
mod store;

pub use cart::{Cart, LineItem};
pub use store::{CartStore, CART_STORAGE_KEY};
