use crate::Document;
use serde::{Deserialize, Serialize};

/// Pending change to one logical document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// `type:name` of the document.
    pub identity: String,

    /// The document as first matched in this run. Never replaced.
    pub original: Document,

    /// Cumulative result of every adjustment applied so far.
    pub adjusted: Document,
}

impl ChangeRecord {
    pub fn new(identity: impl Into<String>, original: Document) -> Self {
        Self {
            identity: identity.into(),
            adjusted: original.clone(),
            original,
        }
    }

    pub fn is_modified(&self) -> bool {
        self.original != self.adjusted
    }
}
