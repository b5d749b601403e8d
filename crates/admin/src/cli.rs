use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "storefront-admin",
    about = "Admin client for the storefront commerce backend",
    version
)]
pub struct Cli {
    /// Backend base URL (overrides STOREFRONT_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the admin token
    Login { username: String, password: String },

    /// Change the admin username/password (requires a stored token)
    ChangeCredentials { username: String, password: String },

    /// Forget the stored admin token
    Logout,

    /// Product catalog operations
    Products {
        #[command(subcommand)]
        command: ProductCommand,
    },

    /// Order operations
    Orders {
        #[command(subcommand)]
        command: OrderCommand,
    },

    /// Stock ledger operations
    Stocks {
        #[command(subcommand)]
        command: StockCommand,
    },
}

#[derive(Subcommand)]
pub enum ProductCommand {
    /// List all products
    List,

    /// Create or update a product from a JSON file (stdin when omitted).
    /// Submitted stock is merged into the shared ledger on success.
    Save {
        /// Path to the product JSON
        input: Option<PathBuf>,
    },

    /// Delete a product by id
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum OrderCommand {
    /// List all orders
    List,

    /// Add an order from a JSON file (stdin when omitted)
    Add { input: Option<PathBuf> },

    /// Delete an order by index
    Delete { index: usize },
}

#[derive(Subcommand)]
pub enum StockCommand {
    /// Print the full stock ledger
    Show,

    /// Replace the full stock ledger from a JSON file (stdin when omitted)
    Replace { input: Option<PathBuf> },
}
