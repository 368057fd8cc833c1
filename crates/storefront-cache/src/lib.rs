//! Type-safe Key-Value persistence layer for the storefront.
//!
//! Provides a simple, ergonomic API for keeping small JSON documents in a
//! Key-Value store. The backend is pluggable: an in-memory map, a directory
//! on disk, or Spin's Key-Value Store when compiled for `wasm32`.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_cache::Cache;
//!
//! let cache = Cache::open_dir(".storefront/storage")?;
//!
//! // Store a value
//! cache.set("shopify-cart", &items)?;
//!
//! // Retrieve a value
//! let items: Option<Vec<LineItem>> = cache.get("shopify-cart")?;
//!
//! // Delete a value
//! cache.delete("shopify-cart")?;
//! ```

mod error;
mod file;
mod kv;
mod memory;
#[cfg(target_arch = "wasm32")]
mod spin;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KvStore};
pub use memory::MemoryStore;
#[cfg(target_arch = "wasm32")]
pub use spin::SpinStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
