//! Admin CLI for the storefront commerce backend.
//!
//! Stands in for the storefront admin UI: every subcommand maps onto one
//! caller-facing client operation and prints the backend's payload as JSON.

mod cli;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use storefront_client::{
    AdminAuth, ApiClient, ClientConfig, FileTokenStore, MemoryTokenStore, TokenStore,
};
use storefront_stocks::{ProductDraft, StockLedger};

use cli::{Cli, Commands, OrderCommand, ProductCommand, StockCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env_or(cli.api_url.clone());
    let store: Arc<dyn TokenStore> = match FileTokenStore::new() {
        Some(store) => Arc::new(store),
        None => {
            tracing::warn!("no data directory available; admin token will not persist");
            Arc::new(MemoryTokenStore::new())
        }
    };
    let client = ApiClient::new(config, Arc::new(AdminAuth::new(store)));

    match cli.command {
        Commands::Login { username, password } => {
            print_payload(&client.login(&username, &password).await?)?;
        }
        Commands::ChangeCredentials { username, password } => {
            print_payload(&client.change_credentials(&username, &password).await?)?;
        }
        Commands::Logout => {
            client.auth().clear_token();
            println!("token cleared");
        }
        Commands::Products { command } => match command {
            ProductCommand::List => print_payload(&client.fetch_products().await?)?,
            ProductCommand::Save { input } => {
                let product: ProductDraft =
                    read_json(input.as_deref()).context("reading product draft")?;
                print_payload(&client.save_product(&product).await?)?;
            }
            ProductCommand::Delete { id } => print_payload(&client.delete_product(&id).await?)?,
        },
        Commands::Orders { command } => match command {
            OrderCommand::List => print_payload(&client.fetch_orders().await?)?,
            OrderCommand::Add { input } => {
                let order: Value = read_json(input.as_deref()).context("reading order")?;
                print_payload(&client.add_order(&order).await?)?;
            }
            OrderCommand::Delete { index } => print_payload(&client.delete_order(index).await?)?,
        },
        Commands::Stocks { command } => match command {
            StockCommand::Show => {
                let ledger = client.fetch_stocks().await?;
                println!("{}", serde_json::to_string_pretty(&ledger)?);
            }
            StockCommand::Replace { input } => {
                let ledger: StockLedger =
                    read_json(input.as_deref()).context("reading stock ledger")?;
                print_payload(&client.replace_stocks(&ledger).await?)?;
            }
        },
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: Option<&Path>) -> anyhow::Result<T> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("invalid JSON input")
}

fn print_payload(payload: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(payload)?);
    Ok(())
}
