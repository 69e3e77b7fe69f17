use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Errors collected while processing one adjustment file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileErrorReport {
    pub name: String,

    /// File-level failure (unreadable, malformed, wrong shape).
    #[serde(default)]
    pub general: Option<String>,

    /// Per-adjustment failures keyed by the entry's index in the file.
    #[serde(default)]
    pub adjustments: BTreeMap<usize, String>,
}

impl FileErrorReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            general: None,
            adjustments: BTreeMap::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.general.is_some() || !self.adjustments.is_empty()
    }

    /// Records an error against an adjustment. The first message for an index
    /// wins; later failures of the same entry are dropped.
    pub fn record_adjustment(&mut self, index: usize, message: impl Into<String>) {
        self.adjustments.entry(index).or_insert_with(|| message.into());
    }
}
