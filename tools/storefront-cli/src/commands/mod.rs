//! CLI command implementations.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: Option<CatalogCommand>,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products.
    List {
        /// Only show products in this category.
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show details for a product.
    Show {
        /// Product ID.
        id: String,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart contents.
    Show,
    /// Add a product to the cart.
    Add {
        /// Product ID.
        id: String,
        /// How many to add.
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },
    /// Remove a product from the cart.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Set the quantity of a product; 0 or less removes it.
    Update {
        /// Product ID.
        id: String,
        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Contact email.
    #[arg(long)]
    pub email: String,

    /// First name.
    #[arg(long)]
    pub first_name: String,

    /// Last name.
    #[arg(long)]
    pub last_name: String,

    /// Street address.
    #[arg(long)]
    pub address: String,

    /// City.
    #[arg(long)]
    pub city: String,

    /// ZIP / postal code.
    #[arg(long)]
    pub zip: String,

    /// Signed-in user to attach the order to (guest checkout otherwise).
    #[arg(long)]
    pub user: Option<String>,
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Show product, order and revenue totals.
    Stats,
    /// List orders, newest first.
    Orders {
        /// Show only the last N orders.
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Manage catalog products.
    Products(ProductsArgs),
}

/// Arguments for the admin products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: Option<ProductsCommand>,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List products with their stock.
    List,
    /// Add a product to the catalog file.
    Add(NewProductArgs),
    /// Change fields of a product; unset flags keep their value.
    Edit {
        /// Product ID.
        id: String,
        #[command(flatten)]
        fields: ProductEditArgs,
    },
    /// Delete a product.
    Delete {
        /// Product ID.
        id: String,
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Product form for `admin products add`.
#[derive(Args)]
pub struct NewProductArgs {
    /// Product title.
    #[arg(long)]
    pub title: String,

    /// Unit price, e.g. 29.99.
    #[arg(long, allow_hyphen_values = true)]
    pub price: f64,

    /// Image URL.
    #[arg(long)]
    pub image: String,

    /// Category slug.
    #[arg(long)]
    pub category: Option<String>,

    /// Description.
    #[arg(long)]
    pub description: Option<String>,

    /// Units in stock.
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub stock: i64,
}

/// Product form for `admin products edit`.
#[derive(Args, Default)]
pub struct ProductEditArgs {
    /// Product title.
    #[arg(long)]
    pub title: Option<String>,

    /// Unit price, e.g. 29.99.
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<f64>,

    /// Image URL.
    #[arg(long)]
    pub image: Option<String>,

    /// Category slug.
    #[arg(long)]
    pub category: Option<String>,

    /// Description.
    #[arg(long)]
    pub description: Option<String>,

    /// Units in stock.
    #[arg(long, allow_hyphen_values = true)]
    pub stock: Option<i64>,
}
