//! Property-based tests for the document transforms.
//!
//! These tests verify that:
//! - `delete` never mutates its inputs
//! - deleting absent keys or out-of-range indices is a no-op
//! - deleting existing keys removes exactly those keys
//! - deleting by key twice is the same as deleting once
//! - `overwrite` and `merge` agree with their defining laws
//! - `merge` unions arrays without reordering or duplicating

use proptest::prelude::*;
use scribe_actions::{ActionRegistry, delete, hash_only_merge, merge, overwrite};
use scribe_types::Document;
use serde_json::{Map, json};

fn arb_scalar() -> impl Strategy<Value = Document> {
    prop_oneof![
        Just(Document::Null),
        any::<bool>().prop_map(Document::Bool),
        any::<i32>().prop_map(|i| json!(i)),
        "[a-z]{0,6}".prop_map(Document::String),
    ]
}

fn arb_document() -> impl Strategy<Value = Document> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Document::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                .prop_map(|m| Document::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn arb_object() -> impl Strategy<Value = Map<String, Document>> {
    prop::collection::btree_map("[a-z]{1,4}", arb_document(), 0..6)
        .prop_map(|m| m.into_iter().collect())
}

/// Delete specs built only from keys, so no array index shifts between runs.
fn arb_key_spec() -> impl Strategy<Value = Document> {
    "[a-z]{1,4}"
        .prop_map(Document::String)
        .prop_recursive(3, 16, 3, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..3).prop_map(Document::Array),
                prop::collection::btree_map("[a-z]{1,4}", inner, 0..3)
                    .prop_map(|m| Document::Object(m.into_iter().collect::<Map<_, _>>())),
            ]
        })
}

fn arb_unique_scalars() -> impl Strategy<Value = Vec<Document>> {
    prop::collection::vec(arb_scalar(), 0..6).prop_map(|items| {
        let mut out: Vec<Document> = Vec::new();
        for item in items {
            if !out.contains(&item) {
                out.push(item);
            }
        }
        out
    })
}

proptest! {
    #[test]
    fn delete_does_not_mutate_inputs(base in arb_document(), spec in arb_document()) {
        let base_before = base.clone();
        let spec_before = spec.clone();
        let _ = delete(&base, &spec);
        prop_assert_eq!(base, base_before);
        prop_assert_eq!(spec, spec_before);
    }

    #[test]
    fn delete_absent_key_is_noop(obj in arb_object()) {
        let base = Document::Object(obj);
        // Generated keys are lowercase letters only, so this key never exists.
        let spec = json!("ABSENT");
        prop_assert_eq!(delete(&base, &spec), base);
    }

    #[test]
    fn delete_out_of_range_index_is_noop(items in prop::collection::vec(arb_document(), 0..6)) {
        let base = Document::Array(items.clone());
        let spec = json!(items.len() + 3);
        prop_assert_eq!(delete(&base, &spec), base);
    }

    #[test]
    fn delete_existing_keys_removes_exactly_those(obj in arb_object(), pick in 0usize..6) {
        let keys: Vec<String> = obj.keys().cloned().collect();
        let doomed: Vec<String> = keys.iter().take(pick).cloned().collect();
        let base = Document::Object(obj.clone());
        let spec = Document::Array(doomed.iter().cloned().map(Document::String).collect());

        let out = delete(&base, &spec);
        let out_map = out.as_object().expect("still an object");

        for key in &keys {
            if doomed.contains(key) {
                prop_assert!(!out_map.contains_key(key));
            } else {
                prop_assert_eq!(out_map.get(key), obj.get(key));
            }
        }
    }

    #[test]
    fn delete_by_key_is_idempotent(base in arb_document(), spec in arb_key_spec()) {
        let once = delete(&base, &spec);
        prop_assert_eq!(delete(&once, &spec), once);
    }

    #[test]
    fn overwrite_with_null_is_identity(base in arb_document()) {
        prop_assert_eq!(overwrite(&base, &Document::Null), base);
    }

    #[test]
    fn overwrite_params_keys_always_win(base in arb_object(), params in arb_object()) {
        let out = overwrite(&Document::Object(base.clone()), &Document::Object(params.clone()));
        let out_map = out.as_object().expect("object");
        for (k, v) in &params {
            prop_assert_eq!(out_map.get(k), Some(v));
        }
        for (k, v) in &base {
            if !params.contains_key(k) {
                prop_assert_eq!(out_map.get(k), Some(v));
            }
        }
    }

    #[test]
    fn merge_with_empty_map_is_identity(obj in arb_object()) {
        let base = Document::Object(obj);
        prop_assert_eq!(merge(&base, &json!({})), base.clone());
        prop_assert_eq!(hash_only_merge(&base, &json!({})), base);
    }

    #[test]
    fn merge_unions_arrays_in_order(
        existing in arb_unique_scalars(),
        incoming in prop::collection::vec(arb_scalar(), 0..6),
    ) {
        let base = json!({ "list": existing.clone() });
        let out = merge(&base, &json!({ "list": incoming.clone() }));
        let list = out["list"].as_array().expect("array").clone();

        prop_assert_eq!(&list[..existing.len()], &existing[..]);
        for item in &incoming {
            prop_assert!(list.contains(item));
        }
        for (i, item) in list.iter().enumerate() {
            prop_assert!(!list[i + 1..].contains(item), "duplicate {}", item);
        }
    }

    #[test]
    fn registry_apply_matches_direct_call(base in arb_document(), spec in arb_document()) {
        let registry = ActionRegistry::builtin();
        let via_registry = registry.apply("delete", &base, &spec).expect("registered");
        prop_assert_eq!(via_registry, delete(&base, &spec));
    }
}
