//! Clap-free settings for the adjust pipeline.

/// Placeholder replaced by the current time in commit messages.
pub const TIME_PLACEHOLDER: &str = "%TIME%";

pub const DEFAULT_COMMIT_MESSAGE: &str = "Recording configuration state as of %TIME%";

/// Settings for one adjust run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustSettings {
    /// Compute diffs instead of saving.
    pub dry_run: bool,

    // Chronicle
    pub document: bool,
    pub commit_message: String,

    // Identity
    pub type_field: String,
    pub name_field: String,
}

impl Default for AdjustSettings {
    fn default() -> Self {
        Self {
            dry_run: false,
            document: false,
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            type_field: "chef_type".to_string(),
            name_field: "name".to_string(),
        }
    }
}
