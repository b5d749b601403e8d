//! Merging one product's submitted stock into the shared ledger.

use rand::Rng;
use serde_json::Value;

use crate::ledger::{ProductKind, StockLedger};
use crate::product::ProductDraft;

const ID_LEN: usize = 8;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random lowercase-alphanumeric id for a product saved without one.
///
/// No collision check against existing ledger keys: at this keyspace size and
/// the write volume of a single-admin tool, collisions are an accepted risk.
pub fn random_stock_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Merge `product`'s submitted stock into `ledger` and return the result.
///
/// `assigned_id` is the id the backend reported for a freshly created product;
/// it is consulted only when the draft itself carries no id.
///
/// Runs once per successful product save, between the ledger fetch and the
/// full-ledger write-back. Pure: no IO, no retries, no awareness of concurrent
/// saves (last writer wins).
pub fn reconcile(
    mut ledger: StockLedger,
    product: &ProductDraft,
    assigned_id: Option<&str>,
) -> StockLedger {
    // Only a save that actually submitted stock touches the ledger.
    let Some(stock) = product.stock.as_ref() else {
        return ledger;
    };

    let product_id = product.id.as_deref().or(assigned_id);

    // Drop any leftover direct entry before the type branch, so a product
    // that changed type (generic -> category) leaves no orphan behind.
    if let Some(id) = product_id {
        ledger.remove_direct(id);
    }

    match product.kind() {
        ProductKind::Category(key) => {
            let variants = ledger.category_mut(key);
            // Stale variants first, then add/update from the submission.
            variants.retain(|variant, _| stock.contains_key(variant));
            for (variant, record) in stock {
                variants.insert(variant.clone(), Value::Object(record.clone()));
            }
        }
        ProductKind::Generic => {
            let id = match product_id {
                Some(id) => id.to_owned(),
                None => random_stock_id(),
            };
            ledger.insert_direct(&id, stock);
        }
    }

    ledger
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{CategoryKey, StockRecord};
    use proptest::prelude::*;
    use serde_json::{Map, json};
    use std::collections::BTreeMap;

    fn ledger_from(v: Value) -> StockLedger {
        serde_json::from_value(v).expect("test ledger literal")
    }

    fn record(qty: u64) -> StockRecord {
        let mut rec = Map::new();
        rec.insert("qty".to_owned(), json!(qty));
        rec
    }

    fn stock_of(pairs: &[(&str, u64)]) -> BTreeMap<String, StockRecord> {
        pairs
            .iter()
            .map(|(k, qty)| ((*k).to_owned(), record(*qty)))
            .collect()
    }

    fn draft(
        id: Option<&str>,
        product_type: Option<&str>,
        stock: Option<BTreeMap<String, StockRecord>>,
    ) -> ProductDraft {
        ProductDraft {
            id: id.map(str::to_owned),
            product_type: product_type.map(str::to_owned),
            stock,
            rest: Map::new(),
        }
    }

    #[test]
    fn tshirt_category_matches_submission_exactly() {
        let ledger = ledger_from(json!({
            "tshirt": {"S": {"qty": 1}, "L": {"qty": 4}},
            "p7": {"a": {"qty": 2}}
        }));
        let product = draft(None, Some("tshirt"), Some(stock_of(&[("S", 10), ("M", 5)])));

        let out = reconcile(ledger, &product, None);

        assert_eq!(
            serde_json::to_value(out.category(CategoryKey::Tshirt).unwrap()).unwrap(),
            json!({"S": {"qty": 10}, "M": {"qty": 5}})
        );
        // Unrelated direct entry untouched.
        assert_eq!(out.direct("p7"), Some(&json!({"a": {"qty": 2}})));
    }

    #[test]
    fn jort_reconciles_independently_of_tshirt() {
        let ledger = ledger_from(json!({
            "tshirt": {"S": {"qty": 1}},
            "jort": {"30": {"qty": 2}, "34": {"qty": 6}}
        }));
        let product = draft(None, Some("jort"), Some(stock_of(&[("30", 9), ("32", 3)])));

        let out = reconcile(ledger, &product, None);

        assert_eq!(
            serde_json::to_value(out.category(CategoryKey::Jort).unwrap()).unwrap(),
            json!({"30": {"qty": 9}, "32": {"qty": 3}})
        );
        assert_eq!(
            serde_json::to_value(out.category(CategoryKey::Tshirt).unwrap()).unwrap(),
            json!({"S": {"qty": 1}})
        );
    }

    #[test]
    fn category_map_is_created_when_absent() {
        let product = draft(None, Some("tshirt"), Some(stock_of(&[("XL", 1)])));
        let out = reconcile(StockLedger::new(), &product, None);
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!({"tshirt": {"XL": {"qty": 1}}})
        );
    }

    #[test]
    fn empty_submission_clears_the_category() {
        let ledger = ledger_from(json!({"jort": {"30": {"qty": 2}}}));
        let product = draft(None, Some("jort"), Some(BTreeMap::new()));
        let out = reconcile(ledger, &product, None);
        assert_eq!(serde_json::to_value(&out).unwrap(), json!({"jort": {}}));
    }

    #[test]
    fn generic_product_replaces_its_direct_entry_only() {
        let ledger = ledger_from(json!({
            "p1": {"old": {"qty": 99}},
            "p2": {"a": {"qty": 1}}
        }));
        let product = draft(Some("p1"), Some("poster"), Some(stock_of(&[("a", 1)])));

        let out = reconcile(ledger, &product, None);

        assert_eq!(out.direct("p1"), Some(&json!({"a": {"qty": 1}})));
        assert_eq!(out.direct("p2"), Some(&json!({"a": {"qty": 1}})));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn backend_assigned_id_is_used_when_draft_has_none() {
        let ledger = ledger_from(json!({"p9": {"x": {"qty": 1}}}));
        let product = draft(None, None, Some(stock_of(&[("a", 4)])));

        let out = reconcile(ledger, &product, Some("p42"));

        assert_eq!(out.direct("p42"), Some(&json!({"a": {"qty": 4}})));
        assert_eq!(out.direct("p9"), Some(&json!({"x": {"qty": 1}})));
    }

    #[test]
    fn missing_id_gets_a_fresh_random_key() {
        let ledger = ledger_from(json!({"p1": {"a": {"qty": 1}}}));
        let product = draft(None, None, Some(stock_of(&[("a", 7)])));

        let out = reconcile(ledger, &product, None);

        assert_eq!(out.len(), 2);
        let (new_key, new_value) = out
            .0
            .iter()
            .find(|(k, _)| k.as_str() != "p1")
            .expect("a new key was inserted");
        assert_eq!(new_key.len(), 8);
        assert!(new_key.bytes().all(|b| ID_ALPHABET.contains(&b)));
        assert_eq!(new_value, &json!({"a": {"qty": 7}}));
        // Pre-existing key untouched.
        assert_eq!(out.direct("p1"), Some(&json!({"a": {"qty": 1}})));
    }

    #[test]
    fn type_change_to_category_removes_the_direct_entry() {
        let ledger = ledger_from(json!({"p1": {"S": {"qty": 3}}}));
        let product = draft(Some("p1"), Some("tshirt"), Some(stock_of(&[("S", 3)])));

        let out = reconcile(ledger, &product, None);

        assert!(out.direct("p1").is_none());
        assert_eq!(
            serde_json::to_value(out.category(CategoryKey::Tshirt).unwrap()).unwrap(),
            json!({"S": {"qty": 3}})
        );
    }

    #[test]
    fn absent_stock_is_a_no_op() {
        let ledger = ledger_from(json!({"tshirt": {"S": {"qty": 1}}, "p1": {"a": {"qty": 2}}}));
        let before = ledger.clone();
        let product = draft(Some("p1"), Some("tshirt"), None);
        assert_eq!(reconcile(ledger, &product, None), before);
    }

    #[test]
    fn reconcile_is_idempotent_for_category_products() {
        let ledger = ledger_from(json!({"tshirt": {"S": {"qty": 1}, "L": {"qty": 2}}}));
        let product = draft(None, Some("tshirt"), Some(stock_of(&[("S", 5), ("M", 6)])));

        let once = reconcile(ledger, &product, None);
        let twice = reconcile(once.clone(), &product, None);
        assert_eq!(once, twice);
    }

    #[test]
    fn random_ids_are_well_formed() {
        let a = random_stock_id();
        let b = random_stock_id();
        assert_eq!(a.len(), 8);
        assert!(a.bytes().all(|c| ID_ALPHABET.contains(&c)));
        // 36^8 keyspace; equal draws would indicate a broken generator.
        assert_ne!(a, b);
    }

    proptest! {
        /// Reconciling the same product twice reaches a fixed point, whenever
        /// the product's ledger key is determined (category, or id known).
        #[test]
        fn reconcile_reaches_a_fixed_point(
            qtys in proptest::collection::btree_map("[a-z]{1,6}", 0u64..1000, 0..6),
            kind in prop_oneof![
                Just(Some("tshirt".to_owned())),
                Just(Some("jort".to_owned())),
                Just(Some("mug".to_owned())),
                Just(None),
            ],
            base_direct in proptest::collection::btree_map("[a-z0-9]{4}", 0u64..100, 0..4),
        ) {
            let stock: BTreeMap<String, StockRecord> =
                qtys.into_iter().map(|(k, q)| (k, record(q))).collect();
            let product = ProductDraft {
                id: Some("prod-under-test".to_owned()),
                product_type: kind,
                stock: Some(stock),
                rest: Map::new(),
            };

            let mut base = StockLedger::new();
            for (id, qty) in &base_direct {
                base.0.insert(id.clone(), json!({"a": {"qty": qty}}));
            }

            let once = reconcile(base, &product, None);
            let twice = reconcile(once.clone(), &product, None);
            prop_assert_eq!(once, twice);
        }
    }
}
