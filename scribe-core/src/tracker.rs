//! Change tracking across adjustments.
//!
//! The first time an identity is seen its matched document becomes the
//! `original`. Later adjustments to the same identity start from the stored
//! `adjusted` document, so edits chain in declaration order even when the
//! search port hands back a stale copy.

use scribe_types::{ChangeRecord, Document};
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct ChangeTracker {
    records: Vec<ChangeRecord>,
    index: HashMap<String, usize>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the document the next adjustment of `identity` must start from.
    pub fn touch(&mut self, identity: &str, matched: Document) -> Document {
        if let Some(&i) = self.index.get(identity) {
            debug!(identity, "identity already tracked, chaining");
            return self.records[i].adjusted.clone();
        }
        self.index.insert(identity.to_string(), self.records.len());
        self.records.push(ChangeRecord::new(identity, matched.clone()));
        matched
    }

    pub fn record(&mut self, identity: &str, adjusted: Document) {
        match self.index.get(identity) {
            Some(&i) => self.records[i].adjusted = adjusted,
            None => warn!(identity, "record called for an untracked identity"),
        }
    }

    /// Every tracked document in first-touch order.
    pub fn all_changes(&self) -> &[ChangeRecord] {
        &self.records
    }

    pub fn into_changes(self) -> Vec<ChangeRecord> {
        self.records
    }
}
