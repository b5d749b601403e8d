//! The API client: one method per backend operation.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, info, warn};

use storefront_stocks::{ProductDraft, StockLedger, reconcile};

use crate::auth::AdminAuth;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::response::{assigned_id, is_success, login_token};

/// HTTP client for the commerce backend.
///
/// Cheap to clone; the connection pool and the auth context are shared. Every
/// method performs its round-trips to completion or failure — there is no
/// retry, no timeout beyond the transport's own, and no cancellation beyond
/// dropping the future.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    auth: Arc<AdminAuth>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, auth: Arc<AdminAuth>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            auth,
        }
    }

    /// The auth context this client attaches to mutating requests.
    pub fn auth(&self) -> &AdminAuth {
        &self.auth
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Attach the bearer credential when one is held; no header otherwise.
    fn with_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// One round-trip: transport failures are [`ApiError::Network`], bodies
    /// that are not JSON are [`ApiError::Parse`]. Status codes are not
    /// inspected; the backend reports failure in-band via `success`.
    async fn send(&self, req: reqwest::RequestBuilder) -> ApiResult<Value> {
        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        debug!(status = %resp.status(), url = %resp.url(), "backend response");
        resp.json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    // --- Admin auth ---

    /// Log in; on success the returned token is held and persisted.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Value> {
        let result = self
            .send(self.http.post(self.url("/admin/login")).json(&json!({
                "username": username,
                "password": password,
            })))
            .await?;

        if is_success(&result) {
            if let Some(token) = login_token(&result) {
                self.auth.set_token(token);
                info!("admin login succeeded");
            }
        }
        Ok(result)
    }

    pub async fn change_credentials(&self, username: &str, password: &str) -> ApiResult<Value> {
        self.send(
            self.with_auth(self.http.post(self.url("/admin/change-credentials")))
                .json(&json!({
                    "username": username,
                    "password": password,
                })),
        )
        .await
    }

    // --- Stocks ---

    /// The full current ledger. A null remote payload is an empty ledger,
    /// never an error.
    pub async fn fetch_stocks(&self) -> ApiResult<StockLedger> {
        let value = self.send(self.http.get(self.url("/stocks"))).await?;
        match value {
            Value::Null => Ok(StockLedger::new()),
            other => serde_json::from_value(other).map_err(|e| ApiError::Parse(e.to_string())),
        }
    }

    /// Replace the entire ledger. No partial-update capability exists; every
    /// mutation resubmits the whole mapping.
    pub async fn replace_stocks(&self, ledger: &StockLedger) -> ApiResult<Value> {
        self.send(self.with_auth(self.http.post(self.url("/stocks"))).json(ledger))
            .await
    }

    // --- Orders ---

    pub async fn fetch_orders(&self) -> ApiResult<Value> {
        self.send(self.http.get(self.url("/orders"))).await
    }

    pub async fn add_order(&self, order: &Value) -> ApiResult<Value> {
        self.send(self.http.post(self.url("/orders")).json(order))
            .await
    }

    pub async fn delete_order(&self, index: usize) -> ApiResult<Value> {
        self.send(self.with_auth(self.http.delete(self.url(&format!("/orders/{index}")))))
            .await
    }

    // --- Products ---

    pub async fn fetch_products(&self) -> ApiResult<Value> {
        self.send(self.http.get(self.url("/products"))).await
    }

    /// Save a product, then merge its submitted stock into the shared ledger.
    ///
    /// Three sequential round-trips (save, ledger fetch, ledger replace) with
    /// no atomicity across them; concurrent saves interleave and the last
    /// ledger writer wins. A save the backend rejects never touches the
    /// ledger, and neither does a save without stock data. Returns the save
    /// payload itself; the ledger write's own outcome is logged, not
    /// returned.
    pub async fn save_product(&self, product: &ProductDraft) -> ApiResult<Value> {
        let result = self
            .send(self.with_auth(self.http.post(self.url("/products"))).json(product))
            .await?;

        if is_success(&result) && product.stock.is_some() {
            let ledger = self.fetch_stocks().await?;
            let updated = reconcile(ledger, product, assigned_id(&result));
            let outcome = self.replace_stocks(&updated).await?;
            if !is_success(&outcome) {
                warn!(%outcome, "backend rejected ledger replacement after product save");
            }
        }

        Ok(result)
    }

    pub async fn delete_product(&self, id: &str) -> ApiResult<Value> {
        self.send(self.with_auth(self.http.delete(self.url(&format!("/products/{id}")))))
            .await
    }
}
