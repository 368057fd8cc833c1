//! Persistent cart store backing the storefront UI.

use storefront_cache::Cache;

use crate::cart::{Cart, LineItem};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// Storage slot the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "shopify-cart";

/// The shopper's cart plus drawer visibility, persisted to a [`Cache`] slot.
///
/// Built once at the application root and handed to views by reference.
/// Every mutator updates the in-memory cart first and then rewrites the whole
/// slot; a failed write is logged and otherwise ignored, so the in-memory
/// cart stays authoritative for the rest of the session.
///
/// # Example
///
/// ```
/// use storefront_cache::Cache;
/// use storefront_commerce::cart::CartStore;
/// use storefront_commerce::catalog::Product;
/// use storefront_commerce::money::{Currency, Money};
///
/// let mut store = CartStore::open(Cache::in_memory());
/// let hat = Product::new(99, "Hat", Money::from_decimal(19.99, Currency::USD));
///
/// store.add_to_cart(&hat, 2).unwrap();
/// assert_eq!(store.cart_count().unwrap(), 2);
/// assert_eq!(store.cart_total().unwrap().display(), "$39.98");
/// assert!(store.is_open());
/// ```
#[derive(Debug)]
pub struct CartStore {
    cart: Cart,
    is_open: bool,
    cache: Cache,
    key: String,
}

impl CartStore {
    /// Open the store on the default slot, restoring any persisted cart.
    pub fn open(cache: Cache) -> Self {
        Self::with_key(cache, CART_STORAGE_KEY)
    }

    /// Open the store on a custom slot.
    pub fn with_key(cache: Cache, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = load(&cache, &key);
        Self {
            cart,
            is_open: false,
            cache,
            key,
        }
    }

    /// Replace the in-memory cart with whatever the slot holds now.
    pub fn reload(&mut self) {
        self.cart = load(&self.cache, &self.key);
    }

    /// Slot key this store persists to.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Add `quantity` of `product`, open the drawer and persist.
    ///
    /// Rejects a non-positive quantity (and a quantity sum that would
    /// overflow) without touching the cart, the drawer, or storage.
    pub fn add_to_cart(&mut self, product: &Product, quantity: i64) -> Result<(), CommerceError> {
        self.try_mutate(|cart| cart.add(product, quantity))?;
        self.is_open = true;
        tracing::debug!(product = %product.id, quantity, "added to cart");
        Ok(())
    }

    /// Add a single unit of `product`.
    pub fn add_one(&mut self, product: &Product) -> Result<(), CommerceError> {
        self.add_to_cart(product, 1)
    }

    /// Remove `id` from the cart and persist. Missing ids are a no-op.
    pub fn remove_from_cart(&mut self, id: &ProductId) -> bool {
        self.mutate(|cart| cart.remove(id))
    }

    /// Set the quantity of `id` and persist; below 1 removes the item.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        self.mutate(|cart| cart.update_quantity(id, quantity))
    }

    /// Empty the cart and persist.
    pub fn clear_cart(&mut self) {
        self.mutate(Cart::clear)
    }

    /// Sum of `price × quantity`, computed from the current items.
    pub fn cart_total(&self) -> Result<Money, CommerceError> {
        self.cart.total()
    }

    /// Sum of quantities, computed from the current items.
    pub fn cart_count(&self) -> Result<i64, CommerceError> {
        self.cart.count()
    }

    /// Whether the cart drawer is showing.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Show or hide the cart drawer. Not persisted.
    pub fn set_is_open(&mut self, open: bool) {
        self.is_open = open;
    }

    /// Show the cart drawer.
    pub fn open_drawer(&mut self) {
        self.set_is_open(true);
    }

    /// Hide the cart drawer.
    pub fn close_drawer(&mut self) {
        self.set_is_open(false);
    }

    /// Apply `f` to the cart, then persist.
    fn mutate<R>(&mut self, f: impl FnOnce(&mut Cart) -> R) -> R {
        let result = f(&mut self.cart);
        self.persist();
        result
    }

    /// Apply a fallible `f`; persist only if it succeeded.
    fn try_mutate<R>(
        &mut self,
        f: impl FnOnce(&mut Cart) -> Result<R, CommerceError>,
    ) -> Result<R, CommerceError> {
        let result = f(&mut self.cart)?;
        self.persist();
        Ok(result)
    }

    fn persist(&self) {
        if let Err(e) = self.cache.set(&self.key, &self.cart) {
            tracing::warn!(key = %self.key, error = %e, "failed to persist cart");
        }
    }
}

/// Read the cart slot. Missing, unreadable or invalid data yields an empty cart.
fn load(cache: &Cache, key: &str) -> Cart {
    match cache.get::<Cart>(key) {
        Ok(Some(cart)) => match cart.validate() {
            Ok(()) => cart,
            Err(e) => {
                tracing::warn!(key, error = %e, "persisted cart is invalid, starting empty");
                Cart::new()
            }
        },
        Ok(None) => Cart::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "persisted cart is unreadable, starting empty");
            Cart::new()
        }
    }
}
