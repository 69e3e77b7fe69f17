//! Shared DTOs for the scribe workspace.
//!
//! # Design constraints
//! - Adjustment files are written by hand, so parsing stays tolerant: optional
//!   metadata defaults to empty strings and unknown fields are ignored.
//! - Documents are untyped trees; see [`Document`].

pub mod adjustment;
pub mod change;
pub mod report;
pub mod run;
pub mod template;

pub use adjustment::{Adjustment, AdjustmentFile};
pub use change::ChangeRecord;
pub use report::FileErrorReport;
pub use run::RunReport;
pub use template::{DocumentKind, UnknownDocumentKind};

/// One configuration object (environment, node, role, ...).
///
/// `serde_json::Value` is already the tagged union the engine needs: objects,
/// arrays and scalars are matched exhaustively by every transform. Object keys
/// are kept sorted, which makes pretty-printed output stable for diffs.
pub type Document = serde_json::Value;

/// Schema identifiers.
pub mod schema {
    pub const SCRIBE_RUN_V1: &str = "scribe.run.v1";
}

/// Keys every adjustment entry must carry, in validation order.
pub const REQUIRED_ADJUSTMENT_KEYS: [&str; 4] = ["action", "type", "search", "adjustment"];

/// Builds the identity key of a document: `type:name`.
pub fn identity(doc_type: &str, name: &str) -> String {
    format!("{doc_type}:{name}")
}
