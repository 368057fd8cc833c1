//! Product administration: the write side of the catalog.

use async_trait::async_trait;
use serde_json::Value;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// Extra-field key the stock level is stored under.
pub const INVENTORY_FIELD: &str = "inventory_quantity";

/// The fields an admin fills in on the product form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub title: String,
    pub description: Option<String>,
    pub price: Money,
    pub category: Option<String>,
    pub inventory_quantity: i64,
    pub image_url: String,
}

impl ProductDraft {
    /// Prefill the form from an existing product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price,
            category: product.category.clone(),
            inventory_quantity: product.inventory_quantity().unwrap_or(0),
            image_url: product.primary_image().unwrap_or_default().to_string(),
        }
    }

    /// Check the form before it reaches the backend.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.title.trim().is_empty() {
            return Err(CommerceError::ValidationError("title is required".to_string()));
        }
        if self.price.is_negative() {
            return Err(CommerceError::InvalidAmount(format!(
                "price cannot be negative: {}",
                self.price
            )));
        }
        if self.inventory_quantity < 0 {
            return Err(CommerceError::ValidationError(format!(
                "inventory cannot be negative: {}",
                self.inventory_quantity
            )));
        }
        if self.image_url.trim().is_empty() {
            return Err(CommerceError::ValidationError("image URL is required".to_string()));
        }
        Ok(())
    }

    /// Write the form fields onto `product`. The image list is replaced by
    /// the single form image; unrelated extra fields are kept.
    pub fn apply_to(self, product: &mut Product) {
        product.title = self.title.trim().to_string();
        product.description = self.description.filter(|d| !d.trim().is_empty());
        product.price = self.price;
        product.category = self.category.filter(|c| !c.trim().is_empty());
        product.images = vec![self.image_url.trim().to_string()];
        product
            .extra
            .insert(INVENTORY_FIELD.to_string(), Value::from(self.inventory_quantity));
    }
}

/// Backend that lets the admin screens change the catalog (the hosted
/// database in production).
#[async_trait]
pub trait ProductAdmin: Send + Sync {
    /// Add a product and return it with the id the backend assigned.
    async fn create_product(&self, draft: ProductDraft) -> Result<Product, CommerceError>;

    /// Replace the form fields of an existing product.
    async fn update_product(&self, id: &ProductId, draft: ProductDraft) -> Result<Product, CommerceError>;

    /// Remove a product.
    async fn delete_product(&self, id: &ProductId) -> Result<(), CommerceError>;
}

/// Next free numeric id: one past the largest numeric id in use.
pub fn next_product_id(products: &[Product]) -> Result<ProductId, CommerceError> {
    let max = products
        .iter()
        .filter_map(|p| match p.id {
            ProductId::Number(n) => Some(n),
            ProductId::Text(_) => None,
        })
        .max()
        .unwrap_or(0)
        .max(0);
    max.checked_add(1)
        .map(ProductId::Number)
        .ok_or(CommerceError::Overflow)
}
