//! Deep merge variants.
//!
//! `merge` follows the classic configuration-management deep merge: maps are
//! merged recursively, arrays are unioned (existing order first, duplicates
//! dropped), and any other value in `params` replaces the one in `base`.
//! `hash_only_merge` merges maps recursively but replaces arrays wholesale.
//! In both, a null in `params` never replaces an existing value.

use crate::Action;
use scribe_types::Document;

pub struct MergeAction;

impl MergeAction {
    pub const NAME: &'static str = "merge";
}

impl Action for MergeAction {
    fn transform(&self, base: &Document, params: &Document) -> Document {
        merge(base, params)
    }
}

pub struct HashOnlyMergeAction;

impl HashOnlyMergeAction {
    pub const NAME: &'static str = "hash_only_merge";
}

impl Action for HashOnlyMergeAction {
    fn transform(&self, base: &Document, params: &Document) -> Document {
        hash_only_merge(base, params)
    }
}

pub fn merge(base: &Document, params: &Document) -> Document {
    deep_merge(params.clone(), base.clone())
}

pub fn hash_only_merge(base: &Document, params: &Document) -> Document {
    hash_only(base.clone(), params.clone())
}

fn deep_merge(source: Document, dest: Document) -> Document {
    if dest.is_null() {
        return source;
    }

    match source {
        Document::Null => dest,
        Document::Object(src) => match dest {
            Document::Object(mut out) => {
                for (key, value) in src {
                    let merged = match out.remove(&key) {
                        Some(existing) if is_truthy(&existing) => deep_merge(value, existing),
                        _ => value,
                    };
                    out.insert(key, merged);
                }
                Document::Object(out)
            }
            _ => Document::Object(src),
        },
        Document::Array(src) => match dest {
            Document::Array(existing) => Document::Array(union(existing, src)),
            _ => Document::Array(src),
        },
        scalar => scalar,
    }
}

fn hash_only(onto: Document, with: Document) -> Document {
    match (onto, with) {
        (Document::Object(mut out), Document::Object(src)) => {
            for (key, value) in src {
                let merged = match out.remove(&key) {
                    Some(existing) => hash_only(existing, value),
                    None => value,
                };
                out.insert(key, merged);
            }
            Document::Object(out)
        }
        (onto, Document::Null) => onto,
        (_, with) => with,
    }
}

fn union(first: Vec<Document>, second: Vec<Document>) -> Vec<Document> {
    let mut out: Vec<Document> = Vec::with_capacity(first.len() + second.len());
    for item in first.into_iter().chain(second) {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

fn is_truthy(value: &Document) -> bool {
    !matches!(value, Document::Null | Document::Bool(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn merge_recurses_into_maps() {
        let base = json!({ "default_attributes": { "a": 1, "nested": { "x": 1 } } });
        let params = json!({ "default_attributes": { "b": 2, "nested": { "y": 2 } } });
        assert_eq!(
            merge(&base, &params),
            json!({ "default_attributes": { "a": 1, "b": 2, "nested": { "x": 1, "y": 2 } } })
        );
    }

    #[test]
    fn merge_unions_arrays() {
        let base = json!({ "run_list": ["recipe[a]", "recipe[b]"] });
        let params = json!({ "run_list": ["recipe[b]", "recipe[c]"] });
        assert_eq!(
            merge(&base, &params),
            json!({ "run_list": ["recipe[a]", "recipe[b]", "recipe[c]"] })
        );
    }

    #[test]
    fn merge_params_scalar_wins() {
        assert_eq!(merge(&json!({ "a": 1 }), &json!({ "a": 2 })), json!({ "a": 2 }));
        assert_eq!(merge(&json!({ "a": { "x": 1 } }), &json!({ "a": "s" })), json!({ "a": "s" }));
    }

    #[test]
    fn merge_null_params_keep_base() {
        assert_eq!(merge(&json!({ "a": 1 }), &json!(null)), json!({ "a": 1 }));
        assert_eq!(merge(&json!({ "a": 1 }), &json!({ "a": null })), json!({ "a": 1 }));
    }

    #[test]
    fn merge_replaces_falsy_existing_values() {
        assert_eq!(
            merge(&json!({ "a": false }), &json!({ "a": { "x": 1 } })),
            json!({ "a": { "x": 1 } })
        );
    }

    #[test]
    fn hash_only_merge_replaces_arrays() {
        let base = json!({ "run_list": ["recipe[a]"], "attrs": { "x": 1 } });
        let params = json!({ "run_list": ["recipe[c]"], "attrs": { "y": 2 } });
        assert_eq!(
            hash_only_merge(&base, &params),
            json!({ "run_list": ["recipe[c]"], "attrs": { "x": 1, "y": 2 } })
        );
    }

    #[test]
    fn hash_only_merge_keeps_base_for_null() {
        assert_eq!(
            hash_only_merge(&json!({ "a": 1 }), &json!({ "a": null })),
            json!({ "a": 1 })
        );
        assert_eq!(hash_only_merge(&json!([1]), &json!(null)), json!([1]));
    }

    #[test]
    fn hash_only_merge_replaces_non_map_base() {
        assert_eq!(hash_only_merge(&json!("x"), &json!({ "a": 1 })), json!({ "a": 1 }));
    }
}
