use crate::Action;
use scribe_types::Document;

/// Shallow overwrite: top-level keys of `params` replace those of `base`.
pub struct OverwriteAction;

impl OverwriteAction {
    pub const NAME: &'static str = "overwrite";
}

impl Action for OverwriteAction {
    fn transform(&self, base: &Document, params: &Document) -> Document {
        overwrite(base, params)
    }
}

/// Maps are unioned one level deep with `params` winning; nested values are
/// replaced, not merged. A null `params` keeps `base`; anything else replaces
/// `base` outright.
pub fn overwrite(base: &Document, params: &Document) -> Document {
    match (base, params) {
        (Document::Object(base_map), Document::Object(params_map)) => {
            let mut out = base_map.clone();
            for (key, value) in params_map {
                out.insert(key.clone(), value.clone());
            }
            Document::Object(out)
        }
        (_, Document::Null) => base.clone(),
        _ => params.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::overwrite;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn maps_merge_one_level_with_params_winning() {
        assert_eq!(
            overwrite(&json!({ "a": 1 }), &json!({ "a": 2, "b": 3 })),
            json!({ "a": 2, "b": 3 })
        );
    }

    #[test]
    fn nested_values_are_replaced_not_merged() {
        let base = json!({ "a": 1, "b": [1, 2, 3], "c": { "x": 1, "y": 2 } });
        let params = json!({ "b": [4], "c": { "z": 1, "y": 3 }, "d": 3 });
        assert_eq!(
            overwrite(&base, &params),
            json!({ "a": 1, "b": [4], "c": { "z": 1, "y": 3 }, "d": 3 })
        );
    }

    #[test]
    fn null_params_return_base() {
        assert_eq!(overwrite(&json!({ "a": 1 }), &json!(null)), json!({ "a": 1 }));
        assert_eq!(overwrite(&json!("foo"), &json!(null)), json!("foo"));
    }

    #[test]
    fn non_map_base_is_replaced() {
        assert_eq!(overwrite(&json!("scalar"), &json!({ "a": 1 })), json!({ "a": 1 }));
        assert_eq!(overwrite(&json!([1, 2]), &json!({ "a": 1 })), json!({ "a": 1 }));
    }
}
