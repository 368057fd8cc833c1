//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use storefront_cache::Cache;
use storefront_commerce::cart::CartStore;
use storefront_commerce::catalog::{fetch_products, InMemoryCatalog, Product, ProductCatalog};
use storefront_commerce::{Currency, Money, ProductId};

use crate::backend::{FileCatalog, JsonlOrderGateway};
use crate::config::CliConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Directory relative config paths are resolved against: the one holding
    /// the config file, or the working directory when there is none.
    pub root: PathBuf,
    currency: Currency,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, root) = if let Some(path) = config_path {
            let config = CliConfig::load(path)?;
            let root = Path::new(path)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| cwd.clone(), |p| cwd.join(p));
            (config, root)
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_else(|| (CliConfig::default(), cwd.clone()))
        };

        let currency = config.shop.currency()?;
        output.debug(&format!("Project root: {}", root.display()));

        Ok(Self {
            config,
            output,
            root,
            currency,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let config_names = ["storefront.toml", ".storefront.toml", "storefront.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some((config, current)),
                        Err(e) => {
                            tracing::warn!(path = %config_path.display(), error = %e, "ignoring unreadable config")
                        }
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the project root.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.root.join(path)
        }
    }

    /// Open the cart store on the configured storage directory.
    pub fn cart_store(&self) -> Result<CartStore> {
        let dir = self.resolve_path(&self.config.storage.dir);
        self.output.debug(&format!("Cart storage: {}", dir.display()));
        let cache = Cache::open_dir(&dir)
            .with_context(|| format!("Failed to open cart storage at {}", dir.display()))?;
        Ok(CartStore::with_key(cache, self.config.storage.cart_key.as_str()))
    }

    /// Configured catalog backend.
    pub fn catalog(&self) -> Box<dyn ProductCatalog> {
        match &self.config.catalog.path {
            Some(path) => Box::new(FileCatalog::new(self.resolve_path(path))),
            None => Box::new(InMemoryCatalog::sample()),
        }
    }

    /// Writable catalog for the admin product commands. Only a configured
    /// catalog file can be edited.
    pub fn product_admin(&self) -> Result<FileCatalog> {
        match &self.config.catalog.path {
            Some(path) => Ok(FileCatalog::new(self.resolve_path(path))),
            None => bail!("No catalog file configured; set `path` under [catalog] to manage products"),
        }
    }

    /// Products to show, falling back to the built-in catalog.
    pub async fn products(&self, category: Option<&str>) -> Vec<Product> {
        fetch_products(self.catalog().as_ref(), category).await
    }

    /// Look up a product among the ones the catalog would list.
    pub async fn find_product(&self, id: &ProductId) -> Option<Product> {
        self.products(None).await.into_iter().find(|p| &p.id == id)
    }

    /// Order log gateway.
    pub fn orders(&self) -> JsonlOrderGateway {
        JsonlOrderGateway::new(self.resolve_path(&self.config.orders.path))
    }

    /// Format a price in the shop's display currency.
    pub fn price(&self, money: &Money) -> String {
        format!("{}{}", self.currency.symbol(), money.display_amount())
    }
}

#[cfg(test)]
impl Context {
    /// Quiet JSON-mode context rooted at `root`.
    pub(crate) fn for_tests(root: &Path, config: CliConfig) -> Self {
        Self {
            config,
            output: Output::new(false, true),
            root: root.to_path_buf(),
            currency: Currency::USD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("storefront.toml"),
            "[storage]\ncart_key = \"cart:test\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, root) = Context::find_config(&nested).unwrap();
        assert_eq!(config.storage.cart_key, "cart:test");
        assert_eq!(root, dir.path());
    }

    #[tokio::test]
    async fn test_cart_store_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = Context::for_tests(dir.path(), CliConfig::default());
        ctx.currency = Currency::EUR;

        let hat = ctx.find_product(&ProductId::Number(7)).await.unwrap();
        let mut store = ctx.cart_store().unwrap();
        store.add_to_cart(&hat, 1).unwrap();

        assert!(dir
            .path()
            .join(".storefront/storage/shopify-cart.json")
            .exists());
        assert_eq!(ctx.price(&store.cart_total().unwrap()), "\u{20ac}135.00");
        assert_eq!(ctx.cart_store().unwrap().cart_count().unwrap(), 1);
    }

    #[test]
    fn test_product_admin_needs_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        assert!(Context::for_tests(dir.path(), config.clone()).product_admin().is_err());

        config.catalog.path = Some("products.json".to_string());
        assert!(Context::for_tests(dir.path(), config).product_admin().is_ok());
    }
}
