//! Catalog backends.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::catalog::{next_product_id, Product, ProductAdmin, ProductDraft};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Source of product records (the hosted database in production).
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// List products, optionally restricted to one category.
    async fn list_products(&self, category: Option<&str>) -> Result<Vec<Product>, CommerceError>;

    /// Fetch a single product.
    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, CommerceError>;
}

/// Catalog held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<Product>>,
}

impl InMemoryCatalog {
    /// Create a catalog over `products`, keeping their order.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    /// Parse a JSON array of product records.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// The built-in demo catalog.
    pub fn sample() -> Self {
        Self::new(sample_products())
    }

    /// All products, in catalog order.
    pub fn products(&self) -> Vec<Product> {
        self.read().clone()
    }

    /// Consume the catalog, returning its products.
    pub fn into_products(self) -> Vec<Product> {
        self.products
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Product>> {
        self.products.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Product>> {
        self.products.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn filtered(&self, category: Option<&str>) -> Vec<Product> {
        let products = self.read();
        match category {
            Some(category) => products
                .iter()
                .filter(|p| p.in_category(category))
                .cloned()
                .collect(),
            None => products.clone(),
        }
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn list_products(&self, category: Option<&str>) -> Result<Vec<Product>, CommerceError> {
        Ok(self.filtered(category))
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, CommerceError> {
        Ok(self.read().iter().find(|p| &p.id == id).cloned())
    }
}

#[async_trait]
impl ProductAdmin for InMemoryCatalog {
    async fn create_product(&self, draft: ProductDraft) -> Result<Product, CommerceError> {
        draft.validate()?;
        let mut products = self.write();
        let mut product = Product::new(next_product_id(&products)?, "", draft.price);
        draft.apply_to(&mut product);
        tracing::debug!(id = %product.id, title = %product.title, "product created");
        products.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: &ProductId, draft: ProductDraft) -> Result<Product, CommerceError> {
        draft.validate()?;
        let mut products = self.write();
        let product = products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
        draft.apply_to(product);
        tracing::debug!(%id, "product updated");
        Ok(product.clone())
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), CommerceError> {
        let mut products = self.write();
        let index = products
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
        products.remove(index);
        tracing::debug!(%id, "product deleted");
        Ok(())
    }
}

/// List products from `catalog`, falling back to the built-in catalog when
/// the backend errors or has nothing to show.
///
/// The fallback is filtered by the same category, so a storefront without a
/// configured backend still renders a browsable shop.
pub async fn fetch_products(catalog: &dyn ProductCatalog, category: Option<&str>) -> Vec<Product> {
    match catalog.list_products(category).await {
        Ok(products) if !products.is_empty() => products,
        Ok(_) => {
            tracing::debug!(?category, "catalog returned no products, using built-in catalog");
            InMemoryCatalog::sample().filtered(category)
        }
        Err(e) => {
            tracing::warn!(?category, error = %e, "catalog fetch failed, using built-in catalog");
            InMemoryCatalog::sample().filtered(category)
        }
    }
}

/// Demo products shown when no catalog backend is configured.
pub fn sample_products() -> Vec<Product> {
    let usd = |dollars: i64| Money::new(dollars * 100, Currency::USD);
    vec![
        Product::new(1, "Merino Wool Crewneck", usd(89))
            .with_category("apparel")
            .with_image("https://images.unsplash.com/photo-1556821840-3a63f95609a7?auto=format&fit=crop&w=800&q=80"),
        Product::new(2, "Linen Blend Trousers", usd(120))
            .with_category("apparel")
            .with_image("https://images.unsplash.com/photo-1594938298603-c8148c4dae35?auto=format&fit=crop&w=800&q=80"),
        Product::new(3, "Canvas Weekender Bag", usd(195))
            .with_category("accessories")
            .with_image("https://images.unsplash.com/photo-1553062407-98eeb64c6a62?auto=format&fit=crop&w=800&q=80"),
        Product::new(4, "Minimal Leather Watch", usd(250))
            .with_category("accessories")
            .with_image("https://images.unsplash.com/photo-1524592094714-0f0654e20314?auto=format&fit=crop&w=800&q=80"),
        Product::new(5, "Suede Chelsea Boots", usd(280))
            .with_category("footwear")
            .with_image("https://images.unsplash.com/photo-1638247025967-b4e38f787b76?auto=format&fit=crop&w=800&q=80"),
        Product::new(6, "White Leather Sneakers", usd(165))
            .with_category("footwear")
            .with_image("https://images.unsplash.com/photo-1549298916-b41d501d3772?auto=format&fit=crop&w=800&q=80"),
        Product::new(7, "Cashmere Scarf", usd(135))
            .with_category("accessories")
            .with_image("https://images.unsplash.com/photo-1520903920243-00d872a2d1c9?auto=format&fit=crop&w=800&q=80"),
        Product::new(8, "Oversized Cotton Tee", usd(55))
            .with_category("apparel")
            .with_compare_at_price(usd(75))
            .with_image("https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?auto=format&fit=crop&w=800&q=80"),
    ]
}
