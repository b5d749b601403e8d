use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::ledger::{ProductKind, StockRecord};

/// A product as submitted by the admin UI for create/update.
///
/// Only the fields this layer reads are typed. Everything else (name, price,
/// images, ...) is backend-defined and round-trips untouched through `rest`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Backend-assigned identifier; absent for not-yet-created products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Free-form product type; `tshirt` and `jort` select category handling.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,

    /// The product's desired stock state for this save: variant key -> record.
    /// When absent, the save leaves the ledger untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<BTreeMap<String, StockRecord>>,

    /// Passthrough product attributes this layer neither reads nor rewrites.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl ProductDraft {
    pub fn kind(&self) -> ProductKind {
        ProductKind::resolve(self.product_type.as_deref())
    }
}
