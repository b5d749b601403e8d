use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Opaque stock record: attribute name -> quantity/metadata.
///
/// The shape is backend-defined; this layer copies records wholesale and never
/// inspects their fields.
pub type StockRecord = Map<String, Value>;

/// Reserved ledger keys holding per-variant sub-mappings.
///
/// All tshirt products share the `tshirt` map (keyed by style); all jort
/// products share the `jort` map (keyed by size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Tshirt,
    Jort,
}

impl CategoryKey {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKey::Tshirt => "tshirt",
            CategoryKey::Jort => "jort",
        }
    }
}

impl core::fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a product's stock is keyed in the ledger, resolved once per save from
/// the backend's free-form `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKind {
    /// Stock lives under a shared category key, one record per variant.
    Category(CategoryKey),
    /// Stock lives under the product's own id as a direct entry.
    Generic,
}

impl ProductKind {
    pub fn resolve(product_type: Option<&str>) -> Self {
        match product_type {
            Some("tshirt") => ProductKind::Category(CategoryKey::Tshirt),
            Some("jort") => ProductKind::Category(CategoryKey::Jort),
            _ => ProductKind::Generic,
        }
    }
}

/// The full stock mapping persisted by the backend, covering all products.
///
/// Keys are heterogeneous: a [`CategoryKey`] maps to a JSON object of
/// variant -> record, while any other key is a product id mapping to a record
/// directly. The ledger is not owned by this crate; it is fetched fresh before
/// every reconciliation and written back in full afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockLedger(pub Map<String, Value>);

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The variant map under a category key, if one exists.
    pub fn category(&self, key: CategoryKey) -> Option<&Map<String, Value>> {
        self.0.get(key.as_str()).and_then(Value::as_object)
    }

    /// The direct (product-id-keyed) entry for a product, if one exists.
    pub fn direct(&self, product_id: &str) -> Option<&Value> {
        self.0.get(product_id)
    }

    /// Remove a direct entry; a no-op when the key is absent.
    pub fn remove_direct(&mut self, product_id: &str) {
        self.0.remove(product_id);
    }

    /// Insert/replace the direct entry for a product id with a copy of the
    /// submitted stock mapping.
    pub fn insert_direct(&mut self, product_id: &str, stock: &BTreeMap<String, StockRecord>) {
        let record: Map<String, Value> = stock
            .iter()
            .map(|(variant, rec)| (variant.clone(), Value::Object(rec.clone())))
            .collect();
        self.0.insert(product_id.to_owned(), Value::Object(record));
    }

    /// The mutable variant map under a category key, created empty if absent.
    ///
    /// A pre-existing non-object value under the key is discarded and replaced
    /// by a fresh category object.
    pub fn category_mut(&mut self, key: CategoryKey) -> &mut Map<String, Value> {
        let slot = self
            .0
            .entry(key.as_str().to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        match slot {
            Value::Object(map) => map,
            _ => unreachable!("category slot was just ensured to be an object"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_category_kinds_from_type_strings() {
        assert_eq!(
            ProductKind::resolve(Some("tshirt")),
            ProductKind::Category(CategoryKey::Tshirt)
        );
        assert_eq!(
            ProductKind::resolve(Some("jort")),
            ProductKind::Category(CategoryKey::Jort)
        );
        assert_eq!(ProductKind::resolve(Some("mug")), ProductKind::Generic);
        assert_eq!(ProductKind::resolve(None), ProductKind::Generic);
    }

    #[test]
    fn ledger_serializes_transparently() {
        let ledger: StockLedger =
            serde_json::from_value(json!({"tshirt": {"S": {"qty": 3}}, "p1": {"qty": 9}}))
                .unwrap();
        assert_eq!(ledger.len(), 2);
        assert!(ledger.category(CategoryKey::Tshirt).is_some());
        assert_eq!(ledger.direct("p1"), Some(&json!({"qty": 9})));

        let round = serde_json::to_value(&ledger).unwrap();
        assert_eq!(round, json!({"tshirt": {"S": {"qty": 3}}, "p1": {"qty": 9}}));
    }

    #[test]
    fn category_mut_replaces_non_object_values() {
        let mut ledger: StockLedger = serde_json::from_value(json!({"jort": 7})).unwrap();
        assert!(ledger.category_mut(CategoryKey::Jort).is_empty());
        assert_eq!(
            serde_json::to_value(&ledger).unwrap(),
            json!({"jort": {}})
        );
    }
}
