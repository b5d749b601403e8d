//! `storefront-client` — HTTP integration layer for the storefront admin UI.
//!
//! Issues authenticated requests against the commerce backend for admin login,
//! product catalog, order, and stock management. Product saves run the stock
//! reconciliation from `storefront-stocks` as a read-modify-write over the
//! shared ledger: save product, fetch ledger, reconcile, write the full ledger
//! back. No atomicity across those round-trips; last writer wins.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod response;

pub use auth::{AdminAuth, FileTokenStore, MemoryTokenStore, TokenStore};
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use response::is_success;
