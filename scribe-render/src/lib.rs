//! Rendering helpers for human-readable run output.
//!
//! - Unified diffs between the original and adjusted version of a document.
//! - A markdown summary of a run.

use diffy::PatchFormatter;
use scribe_types::{ChangeRecord, Document, RunReport};
use tracing::debug;

/// Diff of one tracked document, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityDiff {
    pub identity: String,
    /// Unified diff body; empty when the document did not change.
    pub diff: String,
}

/// Pretty-printed JSON used on both sides of a diff.
///
/// Object keys come out sorted because documents use serde_json's ordered
/// map, so two renderings of equal documents are byte-identical.
pub fn document_text(doc: &Document) -> String {
    let mut s = serde_json::to_string_pretty(doc).unwrap_or_else(|_| doc.to_string());
    s.push('\n');
    s
}

pub fn diff_change(change: &ChangeRecord) -> IdentityDiff {
    let diff = if change.is_modified() {
        let old = document_text(&change.original);
        let new = document_text(&change.adjusted);
        let patch = diffy::create_patch(&old, &new);
        PatchFormatter::new().fmt_patch(&patch).to_string()
    } else {
        String::new()
    };
    IdentityDiff {
        identity: change.identity.clone(),
        diff,
    }
}

pub fn diff_changes(changes: &[ChangeRecord]) -> Vec<IdentityDiff> {
    changes.iter().map(diff_change).collect()
}

/// Concatenates diffs with an identity header each; unchanged documents are
/// skipped.
pub fn render_patch(diffs: &[IdentityDiff]) -> String {
    let mut out = String::new();
    for d in diffs {
        if d.diff.is_empty() {
            debug!(identity = %d.identity, "no changes to render");
            continue;
        }
        out.push_str(&format!("=== {}\n", d.identity));
        out.push_str(&d.diff);
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

pub fn render_summary_md(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str("# scribe adjust\n\n");
    out.push_str(&format!(
        "- Mode: {}\n- Status: {}\n- Files: {} ({} with errors)\n- Changed documents: {}\n- Saved: {}\n\n",
        if report.dry_run { "dry-run" } else { "commit" },
        if report.success { "ok" } else { "failed" },
        report.files.len(),
        report.files_with_errors(),
        report.changed.len(),
        report.saved
    ));

    out.push_str("## Descriptions\n\n");
    if report.descriptions.is_empty() {
        out.push_str("_None._\n");
    } else {
        for d in &report.descriptions {
            out.push_str(&format!("- {}\n", d));
        }
    }
    out.push('\n');

    out.push_str("## Changed documents\n\n");
    if report.changed.is_empty() {
        out.push_str("_None._\n");
    } else {
        for identity in &report.changed {
            out.push_str(&format!("- `{}`\n", identity));
        }
    }

    let failed: Vec<_> = report.files.iter().filter(|f| f.has_errors()).collect();
    if !failed.is_empty() {
        out.push_str("\n## Errors\n\n");
        for f in failed {
            out.push_str(&format!("### {}\n\n", f.name));
            if let Some(general) = &f.general {
                out.push_str(&format!("- {}\n", general));
            }
            for (index, message) in &f.adjustments {
                out.push_str(&format!("- Adjustment {}: {}\n", index, message));
            }
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scribe_types::FileErrorReport;
    use serde_json::json;

    fn change(original: Document, adjusted: Document) -> ChangeRecord {
        ChangeRecord {
            identity: "environment:test_env".to_string(),
            original,
            adjusted,
        }
    }

    #[test]
    fn unchanged_document_has_empty_diff() {
        let doc = json!({ "name": "test_env" });
        let d = diff_change(&change(doc.clone(), doc));
        assert_eq!(d.identity, "environment:test_env");
        assert!(d.diff.is_empty());
    }

    #[test]
    fn changed_document_shows_removed_and_added_lines() {
        let d = diff_change(&change(
            json!({ "a": 1, "name": "test_env" }),
            json!({ "a": 2, "name": "test_env" }),
        ));
        assert!(d.diff.contains("-  \"a\": 1,"));
        assert!(d.diff.contains("+  \"a\": 2,"));
        assert!(d.diff.contains("@@"));
    }

    #[test]
    fn document_text_sorts_keys() {
        let text = document_text(&json!({ "b": 1, "a": { "z": 1, "y": 2 } }));
        let a = text.find("\"a\"").unwrap();
        let b = text.find("\"b\"").unwrap();
        let y = text.find("\"y\"").unwrap();
        let z = text.find("\"z\"").unwrap();
        assert!(a < b);
        assert!(y < z);
    }

    #[test]
    fn render_patch_skips_unchanged_and_adds_headers() {
        let diffs = vec![
            IdentityDiff {
                identity: "node:a".to_string(),
                diff: String::new(),
            },
            IdentityDiff {
                identity: "node:b".to_string(),
                diff: "@@ -1 +1 @@\n-x\n+y\n".to_string(),
            },
        ];
        assert_eq!(render_patch(&diffs), "=== node:b\n@@ -1 +1 @@\n-x\n+y\n");
    }

    #[test]
    fn summary_lists_errors_per_file() {
        let mut report = RunReport::new(true);
        report.success = false;
        let mut bad = FileErrorReport::new("spec2.json");
        bad.record_adjustment(1, "Incorrect action!");
        report.files = vec![FileErrorReport::new("spec1.json"), bad];
        report.descriptions = vec!["Foo".to_string()];

        let md = render_summary_md(&report);
        assert!(md.contains("- Mode: dry-run"));
        assert!(md.contains("- Files: 2 (1 with errors)"));
        assert!(md.contains("### spec2.json"));
        assert!(md.contains("- Adjustment 1: Incorrect action!"));
        assert!(!md.contains("### spec1.json"));
    }
}
