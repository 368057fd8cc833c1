//! CLI configuration.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::cart::CART_STORAGE_KEY;
use storefront_commerce::Currency;

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Local cart storage.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Product catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Order log.
    #[serde(default)]
    pub orders: OrdersConfig,

    /// Shop settings.
    #[serde(default)]
    pub shop: ShopConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Self = if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Check values serde can't.
    pub fn validate(&self) -> Result<()> {
        if self.storage.cart_key.trim().is_empty() {
            bail!("storage.cart_key must not be empty");
        }
        self.shop.currency()?;
        Ok(())
    }
}

/// Where the cart slot lives on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the file-backed key-value store.
    #[serde(default = "default_storage_dir")]
    pub dir: String,

    /// Slot the cart is saved under.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_storage_dir() -> String {
    ".storefront/storage".to_string()
}

fn default_cart_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            cart_key: default_cart_key(),
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON file holding an array of products. The built-in catalog is
    /// used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Order log configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersConfig {
    /// JSON-lines file placed orders are appended to.
    #[serde(default = "default_orders_path")]
    pub path: String,
}

fn default_orders_path() -> String {
    ".storefront/orders.jsonl".to_string()
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            path: default_orders_path(),
        }
    }
}

/// Shop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    /// ISO code of the currency prices are shown in.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    Currency::default().code().to_string()
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

impl ShopConfig {
    /// Parsed display currency.
    pub fn currency(&self) -> Result<Currency> {
        match Currency::from_code(&self.currency) {
            Some(currency) => Ok(currency),
            None => bail!("Unknown currency code: {}", self.currency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.storage.dir, ".storefront/storage");
        assert_eq!(config.storage.cart_key, "shopify-cart");
        assert_eq!(config.orders.path, ".storefront/orders.jsonl");
        assert!(config.catalog.path.is_none());
        assert_eq!(config.shop.currency().unwrap(), Currency::USD);
    }

    #[test]
    fn test_partial_toml() {
        let config: CliConfig = toml::from_str(
            r#"
            [catalog]
            path = "products.json"

            [shop]
            currency = "EUR"
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog.path.as_deref(), Some("products.json"));
        assert_eq!(config.shop.currency().unwrap(), Currency::EUR);
        assert_eq!(config.storage.cart_key, "shopify-cart");
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.json");
        std::fs::write(&path, r#"{"storage": {"dir": "state"}}"#).unwrap();

        let config = CliConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.storage.dir, "state");
    }

    #[test]
    fn test_rejects_unknown_currency() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "[shop]\ncurrency = \"XYZ\"\n").unwrap();

        assert!(CliConfig::load(path.to_str().unwrap()).is_err());
    }
}
