//! Product catalog module.
//!
//! Contains the product record, the catalog backend abstraction and the
//! admin write side.

mod admin;
mod product;
mod source;

pub use admin::{next_product_id, ProductAdmin, ProductDraft, INVENTORY_FIELD};
pub use product::Product;
pub use source::{fetch_products, sample_products, InMemoryCatalog, ProductCatalog};
