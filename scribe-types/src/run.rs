use crate::FileErrorReport;
use serde::{Deserialize, Serialize};

/// Machine-readable record of one `scribe adjust` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub schema: String,
    pub dry_run: bool,
    pub success: bool,

    /// One entry per input file, in processing order.
    #[serde(default)]
    pub files: Vec<FileErrorReport>,

    #[serde(default)]
    pub descriptions: Vec<String>,

    /// Identities whose adjusted document differs from the original.
    #[serde(default)]
    pub changed: Vec<String>,

    /// Documents handed to the store (zero for dry runs and aborted runs).
    pub saved: u64,
}

impl RunReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            schema: crate::schema::SCRIBE_RUN_V1.to_string(),
            dry_run,
            success: true,
            files: vec![],
            descriptions: vec![],
            changed: vec![],
            saved: 0,
        }
    }

    pub fn files_with_errors(&self) -> usize {
        self.files.iter().filter(|f| f.has_errors()).count()
    }
}
