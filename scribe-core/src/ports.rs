//! Port traits abstracting all I/O away from the pipeline.

use scribe_types::Document;

/// Finds documents of one type matching a query such as `name:prod*`.
pub trait SearchPort {
    fn query(&self, doc_type: &str, query: &str) -> anyhow::Result<Vec<Document>>;
}

/// Persists an adjusted document.
pub trait StorePort {
    fn save(&self, doc_type: &str, document: &Document) -> anyhow::Result<()>;
}

/// Records the current state of the chronicle under a message.
pub trait ChroniclePort {
    fn record_state(&self, message: &str) -> anyhow::Result<()>;
}
