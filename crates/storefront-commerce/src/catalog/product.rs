//! Product records as served by the catalog.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::INVENTORY_FIELD;
use crate::ids::ProductId;
use crate::money::{self, Money};

/// A product in the catalog.
///
/// Fields the storefront renders are typed; anything else the backend sends
/// (inventory counts, timestamps, ...) is kept in `extra` and survives a
/// serialize round-trip untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product title.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Current unit price.
    #[serde(with = "money::decimal")]
    pub price: Money,
    /// Category slug (e.g. "apparel").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Image URLs, primary image first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Original price when the product is on sale.
    #[serde(
        default,
        with = "money::decimal_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub compare_at_price: Option<Money>,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Create a product with only the required fields set.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            category: None,
            images: Vec::new(),
            compare_at_price: None,
            description: None,
            extra: Map::new(),
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Append an image URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// Set the compare-at (pre-sale) price.
    pub fn with_compare_at_price(mut self, price: Money) -> Self {
        self.compare_at_price = Some(price);
        self
    }

    /// Attach an arbitrary extra field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// First image, used as the thumbnail.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Stock level, when the backend reports one.
    pub fn inventory_quantity(&self) -> Option<i64> {
        self.extra.get(INVENTORY_FIELD).and_then(Value::as_i64)
    }

    /// Whether the product is discounted against its compare-at price.
    pub fn is_on_sale(&self) -> bool {
        match self.compare_at_price {
            Some(compare) => {
                compare.currency == self.price.currency
                    && compare.amount_cents > self.price.amount_cents
            }
            None => false,
        }
    }

    /// Whether the product belongs to `category` (exact match).
    pub fn in_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }
}
