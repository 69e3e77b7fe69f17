//! Shape checks run before anything is applied.

use crate::error::AdjustIssue;
use scribe_actions::ActionRegistry;
use scribe_types::{Adjustment, Document, REQUIRED_ADJUSTMENT_KEYS};

/// Checks that a parsed adjustment file is a map holding an `adjustments`
/// sequence, and returns that sequence.
pub fn validate_file(parsed: &Document) -> Result<&[Document], AdjustIssue> {
    let map = parsed.as_object().ok_or(AdjustIssue::FileNotAMap)?;
    match map.get("adjustments") {
        Some(Document::Array(entries)) => Ok(entries.as_slice()),
        _ => Err(AdjustIssue::MissingAdjustmentList),
    }
}

/// Checks one raw entry and turns it into an [`Adjustment`].
///
/// Keys are checked in `action`, `type`, `search`, `adjustment` order and the
/// first problem found is returned.
pub fn validate_adjustment(
    entry: &Document,
    registry: &ActionRegistry,
) -> Result<Adjustment, AdjustIssue> {
    let map = entry.as_object().ok_or(AdjustIssue::AdjustmentNotAMap)?;

    for key in REQUIRED_ADJUSTMENT_KEYS {
        if !map.contains_key(key) {
            return Err(AdjustIssue::MissingKey { key });
        }
    }

    let string_field = |key: &'static str| -> Result<String, AdjustIssue> {
        map.get(key)
            .and_then(Document::as_str)
            .map(str::to_string)
            .ok_or(AdjustIssue::NotAString { key })
    };

    let action = string_field("action")?;
    if !registry.contains(&action) {
        return Err(AdjustIssue::UnknownAction { name: action });
    }

    Ok(Adjustment {
        action,
        doc_type: string_field("type")?,
        search: string_field("search")?,
        adjustment: map.get("adjustment").cloned().unwrap_or(Document::Null),
    })
}
