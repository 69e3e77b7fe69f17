#![no_main]

//! Every built-in action on arbitrary documents: no panics, inputs untouched.

use libfuzzer_sys::fuzz_target;
use scribe_actions::ActionRegistry;
use scribe_types::Document;

#[derive(Debug, arbitrary::Arbitrary)]
struct ActionInput {
    action: ActionChoice,
    base_json: String,
    params_json: String,
}

#[derive(Debug, arbitrary::Arbitrary)]
enum ActionChoice {
    Overwrite,
    Delete,
    Merge,
    HashOnlyMerge,
}

impl ActionChoice {
    fn name(&self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::Delete => "delete",
            Self::Merge => "merge",
            Self::HashOnlyMerge => "hash_only_merge",
        }
    }
}

fuzz_target!(|input: ActionInput| {
    let (Ok(base), Ok(params)) = (
        serde_json::from_str::<Document>(&input.base_json),
        serde_json::from_str::<Document>(&input.params_json),
    ) else {
        return;
    };

    let base_before = base.clone();
    let params_before = params.clone();

    let registry = ActionRegistry::builtin();
    let out = registry
        .apply(input.action.name(), &base, &params)
        .expect("built-in action");

    assert_eq!(base, base_before);
    assert_eq!(params, params_before);
    let _ = serde_json::to_string_pretty(&out);
});
