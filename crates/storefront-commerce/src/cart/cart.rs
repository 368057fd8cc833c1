//! Cart and line item types.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{self, Currency, Money};

/// A product in the cart together with how many of it were selected.
///
/// `id`, `price` and `quantity` are typed. Every other field of the product
/// at the time it was first added is carried verbatim in `fields`, so the
/// persisted record reads like the product with a `quantity` attached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product identifier.
    pub id: ProductId,
    /// Unit price captured when the item was added.
    #[serde(with = "money::decimal")]
    pub price: Money,
    /// Quantity, always at least 1 while the item is in a cart.
    pub quantity: i64,
    /// Remaining product fields (title, images, ...).
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl LineItem {
    /// Snapshot `product` into a line item.
    pub fn from_product(product: &Product, quantity: i64) -> Result<Self, CommerceError> {
        let mut fields = match serde_json::to_value(product)? {
            Value::Object(map) => map,
            other => {
                return Err(CommerceError::SerializationError(format!(
                    "product serialized to {}, expected an object",
                    other
                )))
            }
        };
        fields.remove("id");
        fields.remove("price");
        fields.remove("quantity");

        Ok(Self {
            id: product.id.clone(),
            price: product.price,
            quantity,
            fields,
        })
    }

    /// Product title, if the product had one.
    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    /// First product image, if any.
    pub fn image(&self) -> Option<&str> {
        self.fields
            .get("images")
            .and_then(Value::as_array)
            .and_then(|images| images.first())
            .and_then(Value::as_str)
    }

    /// `price × quantity`.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// The shopper's cart: line items in insertion order, at most one per product.
///
/// Serializes as a bare JSON array of line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from existing items, checking the cart invariants.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CommerceError> {
        let cart = Self { items };
        cart.validate()?;
        Ok(cart)
    }

    /// Add `quantity` of `product`.
    ///
    /// If the product is already in the cart only its quantity grows; the
    /// stored product fields are left as they were. Otherwise a new line item
    /// is appended. On error the cart is unchanged.
    pub fn add(&mut self, product: &Product, quantity: i64) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == product.id) {
            existing.quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            return Ok(());
        }

        self.items.push(LineItem::from_product(product, quantity)?);
        Ok(())
    }

    /// Remove the item for `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() < len_before
    }

    /// Set the quantity for `id` to exactly `quantity`.
    ///
    /// A quantity below 1 removes the item. Returns whether anything changed.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        if quantity < 1 {
            return self.remove(id);
        }

        match self.items.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `price × quantity` over all items.
    ///
    /// An empty cart totals zero in the default currency.
    pub fn total(&self) -> Result<Money, CommerceError> {
        let currency = self
            .items
            .first()
            .map_or(Currency::default(), |i| i.price.currency);

        self.items
            .iter()
            .try_fold(Money::zero(currency), |acc, item| {
                let subtotal = item.subtotal()?;
                acc.try_add(&subtotal).ok_or_else(|| {
                    if subtotal.currency != currency {
                        CommerceError::CurrencyMismatch {
                            expected: currency.code().to_string(),
                            got: subtotal.currency.code().to_string(),
                        }
                    } else {
                        CommerceError::Overflow
                    }
                })
            })
    }

    /// Total item count (sum of quantities).
    pub fn count(&self) -> Result<i64, CommerceError> {
        self.items.iter().try_fold(0_i64, |acc, item| {
            acc.checked_add(item.quantity).ok_or(CommerceError::Overflow)
        })
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Get the item for `id`.
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Check whether `id` is in the cart.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check the cart invariants: positive quantities, one item per product,
    /// and a total count that fits in an `i64`.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if item.quantity < 1 {
                return Err(CommerceError::InvalidQuantity(item.quantity));
            }
            if !seen.insert(&item.id) {
                return Err(CommerceError::DuplicateLineItem(item.id.to_string()));
            }
        }
        self.count()?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shirt() -> Product {
        Product::new(1, "Shirt", Money::from_decimal(29.99, Currency::USD))
    }

    fn pants() -> Product {
        Product::new(2, "Pants", Money::from_decimal(49.99, Currency::USD))
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.count().unwrap(), 0);
        assert!(cart.total().unwrap().is_zero());
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        cart.add(&shirt(), 1).unwrap();

        assert_eq!(cart.count().unwrap(), 1);
        assert_eq!(cart.total().unwrap().display_amount(), "29.99");
        assert_eq!(cart.items()[0].title(), Some("Shirt"));
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        cart.add(&shirt(), 1).unwrap();
        cart.add(&shirt(), 1).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.count().unwrap(), 2);
        assert_eq!(cart.total().unwrap().display_amount(), "59.98");
    }

    #[test]
    fn test_readd_does_not_refresh_fields() {
        let mut cart = Cart::new();
        cart.add(&shirt(), 1).unwrap();

        let repriced = Product::new(1, "Shirt (new)", Money::from_decimal(99.0, Currency::USD));
        cart.add(&repriced, 2).unwrap();

        let item = cart.get(&ProductId::Number(1)).unwrap();
        assert_eq!(item.quantity, 3);
        assert_eq!(item.price.amount_cents, 2999);
        assert_eq!(item.title(), Some("Shirt"));
    }

    #[test]
    fn test_add_custom_quantity() {
        let mut cart = Cart::new();
        cart.add(&pants(), 3).unwrap();

        assert_eq!(cart.count().unwrap(), 3);
        assert_eq!(cart.total().unwrap().display_amount(), "149.97");
    }

    #[test]
    fn test_total_with_multiple_products() {
        let mut cart = Cart::new();
        cart.add(&shirt(), 1).unwrap();
        cart.add(&pants(), 3).unwrap();

        assert_eq!(cart.total().unwrap().display_amount(), "179.96");
        let ids: Vec<_> = cart.iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids, vec![ProductId::Number(1), ProductId::Number(2)]);
    }

    #[test]
    fn test_invalid_quantity() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add(&shirt(), 0),
            Err(CommerceError::InvalidQuantity(0))
        ));
        assert!(matches!(
            cart.add(&shirt(), -2),
            Err(CommerceError::InvalidQuantity(-2))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_overflow_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add(&shirt(), i64::MAX).unwrap();
        assert!(matches!(cart.add(&shirt(), 1), Err(CommerceError::Overflow)));
        assert_eq!(cart.count().unwrap(), i64::MAX);
        assert!(matches!(cart.total(), Err(CommerceError::Overflow)));
    }

    #[test]
    fn test_count_overflow_across_items_is_an_error() {
        let mut cart = Cart::new();
        cart.add(&shirt(), i64::MAX).unwrap();
        cart.add(&pants(), 1).unwrap();

        assert!(matches!(cart.count(), Err(CommerceError::Overflow)));
        assert!(matches!(cart.validate(), Err(CommerceError::Overflow)));
    }

    #[test]
    fn test_update_quantity_is_absolute() {
        let mut cart = Cart::new();
        cart.add(&shirt(), 2).unwrap();

        assert!(cart.update_quantity(&ProductId::Number(1), 5));
        assert_eq!(cart.count().unwrap(), 5);
        assert_eq!(cart.total().unwrap().display_amount(), "149.95");
    }

    #[test]
    fn test_update_quantity_below_one_removes() {
        let mut cart = Cart::new();
        cart.add(&shirt(), 1).unwrap();
        cart.add(&pants(), 1).unwrap();

        assert!(cart.update_quantity(&ProductId::Number(1), 0));
        assert!(!cart.contains(&ProductId::Number(1)));

        assert!(cart.update_quantity(&ProductId::Number(2), -1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_missing_ids_are_noops() {
        let mut cart = Cart::new();
        cart.add(&shirt(), 1).unwrap();

        assert!(!cart.remove(&ProductId::Number(42)));
        assert!(!cart.update_quantity(&ProductId::Number(42), 3));
        assert!(!cart.update_quantity(&ProductId::Number(42), 0));
        assert_eq!(cart.count().unwrap(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&shirt(), 1).unwrap();
        cart.add(&pants(), 3).unwrap();
        cart.clear();

        assert_eq!(cart.count().unwrap(), 0);
        assert_eq!(cart.total().unwrap().display_amount(), "0.00");
    }

    #[test]
    fn test_serializes_as_array_of_product_records() {
        let mut cart = Cart::new();
        cart.add(&shirt(), 2).unwrap();

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"id": 1, "title": "Shirt", "price": 29.99, "quantity": 2}])
        );
    }

    #[test]
    fn test_validate() {
        let item: LineItem =
            serde_json::from_value(serde_json::json!({"id": 5, "price": 1.0, "quantity": 1}))
                .unwrap();
        assert!(Cart::from_items(vec![item.clone()]).is_ok());

        assert!(matches!(
            Cart::from_items(vec![item.clone(), item.clone()]),
            Err(CommerceError::DuplicateLineItem(_))
        ));

        let mut zero = item;
        zero.quantity = 0;
        assert!(matches!(
            Cart::from_items(vec![zero]),
            Err(CommerceError::InvalidQuantity(0))
        ));
    }
}
