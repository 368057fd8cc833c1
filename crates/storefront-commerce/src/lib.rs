//! Shopping-cart state, catalog and checkout for the storefront.
//!
//! - **Cart**: line items keyed by product id, derived total and count, a
//!   [`CartStore`](cart::CartStore) persisted to a single storage slot
//! - **Catalog**: product records, the catalog backend seam and the admin
//!   create/update/delete side
//! - **Checkout**: shipping details, order submission
//! - **Admin**: dashboard figures over placed orders
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::Cache;
//! use storefront_commerce::prelude::*;
//!
//! let mut store = CartStore::open(Cache::in_memory());
//! let shirt = Product::new(1, "Shirt", Money::from_decimal(29.99, Currency::USD));
//! let trousers = Product::new(2, "Trousers", Money::from_decimal(49.99, Currency::USD));
//!
//! store.add_to_cart(&shirt, 1)?;
//! store.add_to_cart(&trousers, 3)?;
//! assert_eq!(store.cart_count()?, 4);
//! assert_eq!(store.cart_total()?.display(), "$179.96");
//!
//! store.update_quantity(&ProductId::Number(2), 0);
//! assert_eq!(store.cart_count()?, 1);
//! # Ok::<(), CommerceError>(())
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        fetch_products, InMemoryCatalog, Product, ProductAdmin, ProductCatalog, ProductDraft,
    };

    // Cart
    pub use crate::cart::{Cart, CartStore, LineItem, CART_STORAGE_KEY};

    // Checkout
    pub use crate::checkout::{
        place_order, InMemoryOrderGateway, NewOrder, OrderGateway, OrderItem, OrderStatus,
        ShippingAddress,
    };

    // Admin
    pub use crate::admin::{recent_first, DashboardStats, OrderSummary};
}
