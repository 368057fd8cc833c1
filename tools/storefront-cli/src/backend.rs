//! File-backed stand-ins for the hosted catalog and order tables.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_commerce::admin::OrderSummary;
use storefront_commerce::catalog::{
    InMemoryCatalog, Product, ProductAdmin, ProductCatalog, ProductDraft,
};
use storefront_commerce::checkout::{NewOrder, OrderGateway};
use storefront_commerce::{CommerceError, OrderId, ProductId};

/// Catalog read from a JSON array of products on every call. Admin edits
/// rewrite the whole file.
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<InMemoryCatalog, CommerceError> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            CommerceError::CatalogUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        InMemoryCatalog::from_json(&content)
    }

    /// Current contents for an edit; a missing file is an empty catalog.
    fn read_for_update(&self) -> Result<InMemoryCatalog, CommerceError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => InMemoryCatalog::from_json(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(InMemoryCatalog::default()),
            Err(e) => Err(CommerceError::CatalogUnavailable(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn write(&self, catalog: InMemoryCatalog) -> Result<(), CommerceError> {
        let io_err = |e: std::io::Error| {
            CommerceError::CatalogUnavailable(format!("{}: {}", self.path.display(), e))
        };

        let json = serde_json::to_string_pretty(&catalog.into_products())?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(io_err)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(io_err)?;
        tmp.write_all(json.as_bytes()).map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

#[async_trait]
impl ProductCatalog for FileCatalog {
    async fn list_products(&self, category: Option<&str>) -> Result<Vec<Product>, CommerceError> {
        self.read()?.list_products(category).await
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, CommerceError> {
        self.read()?.get_product(id).await
    }
}

#[async_trait]
impl ProductAdmin for FileCatalog {
    async fn create_product(&self, draft: ProductDraft) -> Result<Product, CommerceError> {
        let catalog = self.read_for_update()?;
        let product = catalog.create_product(draft).await?;
        self.write(catalog)?;
        Ok(product)
    }

    async fn update_product(&self, id: &ProductId, draft: ProductDraft) -> Result<Product, CommerceError> {
        let catalog = self.read_for_update()?;
        let product = catalog.update_product(id, draft).await?;
        self.write(catalog)?;
        Ok(product)
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), CommerceError> {
        let catalog = self.read_for_update()?;
        catalog.delete_product(id).await?;
        self.write(catalog)
    }
}

/// One line of the order log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredOrder {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub order: NewOrder,
}

impl StoredOrder {
    pub fn summary(&self) -> OrderSummary {
        OrderSummary {
            id: self.id.clone(),
            total_price: self.order.total_price,
            status: self.order.status,
            created_at: self.created_at,
            email: Some(self.order.shipping_address.email.clone()),
        }
    }
}

/// Order gateway appending one JSON document per line.
pub struct JsonlOrderGateway {
    path: PathBuf,
}

impl JsonlOrderGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All readable orders in the log, oldest first. Lines that fail to
    /// parse are skipped.
    pub fn orders(&self) -> Result<Vec<StoredOrder>, CommerceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(CommerceError::OrderSubmission(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let mut orders = Vec::new();
        for (n, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<StoredOrder>(line) {
                Ok(order) => orders.push(order),
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), line = n + 1, error = %e, "skipping unreadable order")
                }
            }
        }
        Ok(orders)
    }

    /// Dashboard view of every order.
    pub fn summaries(&self) -> Result<Vec<OrderSummary>, CommerceError> {
        Ok(self.orders()?.iter().map(StoredOrder::summary).collect())
    }

    fn append(&self, record: &StoredOrder) -> Result<(), CommerceError> {
        let io_err = |e: std::io::Error| {
            CommerceError::OrderSubmission(format!("{}: {}", self.path.display(), e))
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        file.write_all(line.as_bytes()).map_err(io_err)
    }
}

#[async_trait]
impl OrderGateway for JsonlOrderGateway {
    async fn submit_order(&self, order: &NewOrder) -> Result<OrderId, CommerceError> {
        let next = self
            .orders()?
            .iter()
            .filter_map(|o| o.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| {
                CommerceError::OrderSubmission(format!(
                    "{}: order ids exhausted",
                    self.path.display()
                ))
            })?;

        let record = StoredOrder {
            id: OrderId::new(next.to_string()),
            created_at: Utc::now(),
            order: order.clone(),
        };
        self.append(&record)?;
        tracing::debug!(id = %record.id, path = %self.path.display(), "order written");
        Ok(record.id)
    }
}
