use scribe_actions::ActionError;
use thiserror::Error;

/// A problem recorded against a file or a single adjustment.
///
/// These never abort a run; the pipeline stores their messages in the
/// file's error report and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdjustIssue {
    #[error("File does not exist!")]
    FileNotFound,

    #[error("Malformed JSON!")]
    MalformedInput,

    #[error("Adjustment file must contain a JSON hash!")]
    FileNotAMap,

    #[error("Adjustment file must contain an array of adjustments!")]
    MissingAdjustmentList,

    #[error("Adjustment must be a JSON hash!")]
    AdjustmentNotAMap,

    #[error("Adjustment hash must contain {key}!")]
    MissingKey { key: &'static str },

    #[error("Adjustment field {key} must be a string!")]
    NotAString { key: &'static str },

    #[error("Incorrect action!")]
    UnknownAction { name: String },

    #[error("Search for `{query}` failed: {message}")]
    SearchFailed { query: String, message: String },

    #[error("Matched document has no string `{field}` field!")]
    MissingIdentity { field: String },
}

impl From<ActionError> for AdjustIssue {
    fn from(err: ActionError) -> Self {
        match err {
            ActionError::UnknownAction { name } => Self::UnknownAction { name },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_report_format() {
        assert_eq!(
            AdjustIssue::MissingKey { key: "search" }.to_string(),
            "Adjustment hash must contain search!"
        );
        assert_eq!(
            AdjustIssue::UnknownAction {
                name: "explode".to_string()
            }
            .to_string(),
            "Incorrect action!"
        );
    }

    #[test]
    fn search_failure_names_the_query() {
        let issue = AdjustIssue::SearchFailed {
            query: "name:web*".to_string(),
            message: "index offline".to_string(),
        };
        assert_eq!(issue.to_string(), "Search for `name:web*` failed: index offline");
    }
}
