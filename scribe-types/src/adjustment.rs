use crate::Document;
use serde::{Deserialize, Serialize};

/// Parsed contents of one adjustment file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentFile {
    #[serde(default)]
    pub author_name: String,

    #[serde(default)]
    pub author_email: String,

    #[serde(default)]
    pub description: String,

    /// Raw entries; each one is validated separately before it becomes an
    /// [`Adjustment`].
    #[serde(default)]
    pub adjustments: Vec<Document>,
}

/// A single declarative edit: run `action` with `adjustment` as parameters on
/// every `type` document matched by `search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub action: String,

    #[serde(rename = "type")]
    pub doc_type: String,

    pub search: String,

    /// Opaque parameters handed to the action.
    pub adjustment: Document,
}

impl Adjustment {
    /// The search query sent to the search port.
    ///
    /// A search without a field selector is shorthand for a lookup on
    /// `name_field`.
    pub fn query(&self, name_field: &str) -> String {
        if self.search.contains(':') {
            self.search.clone()
        } else {
            format!("{name_field}:{}", self.search)
        }
    }
}
