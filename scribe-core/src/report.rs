//! Error accumulation for a batch of adjustment files.

use crate::error::AdjustIssue;
use scribe_types::FileErrorReport;

pub const ERRORS_HEADER: &str = "ERRORS OCCURED:";

#[derive(Debug, Default)]
pub struct ErrorReporter {
    reports: Vec<FileErrorReport>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a fresh report; subsequent records go to it.
    pub fn begin(&mut self, name: &str) {
        self.reports.push(FileErrorReport::new(name));
    }

    pub fn current(&self) -> Option<&FileErrorReport> {
        self.reports.last()
    }

    pub fn record_general(&mut self, issue: &AdjustIssue) {
        if let Some(report) = self.reports.last_mut() {
            report.general = Some(issue.to_string());
        }
    }

    pub fn record_adjustment(&mut self, index: usize, issue: &AdjustIssue) {
        if let Some(report) = self.reports.last_mut() {
            report.record_adjustment(index, issue.to_string());
        }
    }

    pub fn has_errors(&self) -> bool {
        self.reports.iter().any(FileErrorReport::has_errors)
    }

    pub fn reports(&self) -> &[FileErrorReport] {
        &self.reports
    }

    pub fn into_reports(self) -> Vec<FileErrorReport> {
        self.reports
    }

    /// Report lines for every file with errors, headed by [`ERRORS_HEADER`].
    /// Empty when nothing failed.
    pub fn error_lines(&self) -> Vec<String> {
        if !self.has_errors() {
            return Vec::new();
        }
        let mut lines = vec![ERRORS_HEADER.to_string()];
        for report in self.reports.iter().filter(|r| r.has_errors()) {
            lines.push(report.name.clone());
            if let Some(general) = &report.general {
                lines.push(format!("\t{general}"));
            }
            for (index, message) in &report.adjustments {
                lines.push(format!("\t[Adjustment {index}]: {message}"));
            }
        }
        lines
    }

    pub fn format_all(&self) -> String {
        self.error_lines().join("\n")
    }
}
