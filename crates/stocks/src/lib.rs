//! `storefront-stocks` — stock ledger domain for the storefront admin client.
//!
//! This crate contains **pure domain** logic (no IO, no HTTP): the ledger data
//! model and the reconciliation that merges one product's submitted stock into
//! the shared ledger on every product save.

pub mod ledger;
pub mod product;
pub mod reconcile;

pub use ledger::{CategoryKey, ProductKind, StockLedger, StockRecord};
pub use product::ProductDraft;
pub use reconcile::{random_stock_id, reconcile};
