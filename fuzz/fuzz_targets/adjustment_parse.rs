#![no_main]

//! Arbitrary bytes through adjustment file parsing and validation.

use libfuzzer_sys::fuzz_target;
use scribe_core::ActionRegistry;
use scribe_core::validate::{validate_adjustment, validate_file};
use scribe_types::{AdjustmentFile, Document};

fuzz_target!(|data: &[u8]| {
    let Ok(parsed) = serde_json::from_slice::<Document>(data) else {
        return;
    };

    let _ = serde_json::from_value::<AdjustmentFile>(parsed.clone());

    let registry = ActionRegistry::builtin();
    if let Ok(entries) = validate_file(&parsed) {
        for entry in entries {
            if let Ok(adjustment) = validate_adjustment(entry, &registry) {
                let query = adjustment.query("name");
                assert!(query.contains(':'));
            }
        }
    }
});
