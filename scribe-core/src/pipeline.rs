//! The adjust pipeline, extracted from the CLI.
//!
//! Files are processed in order, adjustments in order, matches in search
//! order. Problems are recorded and processing continues; the commit gate
//! runs once after every file has been seen.

use crate::error::AdjustIssue;
use crate::ports::{ChroniclePort, SearchPort, StorePort};
use crate::report::ErrorReporter;
use crate::settings::{AdjustSettings, TIME_PLACEHOLDER};
use crate::tracker::ChangeTracker;
use crate::validate::{validate_adjustment, validate_file};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Local, TimeZone};
use fs_err as fs;
use scribe_actions::ActionRegistry;
use scribe_render::{IdentityDiff, diff_changes};
use scribe_types::{Adjustment, AdjustmentFile, ChangeRecord, Document, RunReport, identity};
use tracing::{debug, info, warn};

pub const WITH_ERRORS_SUFFIX: &str = " [with errors]";

/// The ports a run talks to.
pub struct AdjustPorts<'a> {
    pub search: &'a dyn SearchPort,
    pub store: &'a dyn StorePort,
    /// Only consulted when `AdjustSettings::document` is set.
    pub chronicle: Option<&'a dyn ChroniclePort>,
}

/// Outcome of `run_adjust`.
#[derive(Debug, Clone)]
pub struct AdjustOutcome {
    pub success: bool,
    /// Formatted error report; empty when nothing failed.
    pub error_lines: Vec<String>,
    pub descriptions: Vec<String>,
    /// Dry-run diffs in first-touch order. Empty for committing runs.
    pub diffs: Vec<IdentityDiff>,
    pub saved: u64,
    pub report: RunReport,
}

/// Mutable state of one run. Created at `run_adjust` entry and dropped when
/// it returns.
pub struct RunContext<'a> {
    settings: &'a AdjustSettings,
    registry: &'a ActionRegistry,
    search: &'a dyn SearchPort,
    tracker: ChangeTracker,
    reporter: ErrorReporter,
    descriptions: Vec<String>,
}

impl<'a> RunContext<'a> {
    pub fn new(
        settings: &'a AdjustSettings,
        registry: &'a ActionRegistry,
        search: &'a dyn SearchPort,
    ) -> Self {
        Self {
            settings,
            registry,
            search,
            tracker: ChangeTracker::new(),
            reporter: ErrorReporter::new(),
            descriptions: Vec::new(),
        }
    }

    pub fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    pub fn reporter(&self) -> &ErrorReporter {
        &self.reporter
    }

    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    /// Reads, validates and applies one adjustment file.
    pub fn process_file(&mut self, path: &Utf8Path) {
        self.reporter.begin(path.as_str());

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                debug!(path = %path, error = %err, "cannot read adjustment file");
                self.reporter.record_general(&AdjustIssue::FileNotFound);
                return;
            }
        };
        self.process_source(&text);
    }

    /// Processes adjustment file contents already read by the caller. The
    /// current report must have been opened.
    fn process_source(&mut self, text: &str) {
        let parsed: Document = match serde_json::from_str(text) {
            Ok(doc) => doc,
            Err(err) => {
                debug!(error = %err, "adjustment file is not valid JSON");
                self.reporter.record_general(&AdjustIssue::MalformedInput);
                return;
            }
        };

        let entries = match validate_file(&parsed) {
            Ok(entries) => entries,
            Err(issue) => {
                self.reporter.record_general(&issue);
                return;
            }
        };

        let total = entries.len();
        for (index, entry) in entries.iter().enumerate() {
            let result = validate_adjustment(entry, self.registry)
                .and_then(|adjustment| self.apply_adjustment(&adjustment));
            if let Err(issue) = result {
                warn!(index, issue = %issue, "adjustment failed");
                self.reporter.record_adjustment(index, &issue);
            }
        }

        let failed = self
            .reporter
            .current()
            .map_or(0, |report| report.adjustments.len());
        let description = serde_json::from_value::<AdjustmentFile>(parsed)
            .map(|file| file.description)
            .unwrap_or_default();
        if failed == 0 {
            self.descriptions.push(description);
        } else if failed < total {
            self.descriptions
                .push(format!("{description}{WITH_ERRORS_SUFFIX}"));
        }
    }

    /// Runs one validated adjustment against every matching document.
    ///
    /// Stops at the first failing match; matches already adjusted stay
    /// recorded.
    pub fn apply_adjustment(&mut self, adjustment: &Adjustment) -> Result<(), AdjustIssue> {
        let query = adjustment.query(&self.settings.name_field);
        let matches = self
            .search
            .query(&adjustment.doc_type, &query)
            .map_err(|err| AdjustIssue::SearchFailed {
                query: query.clone(),
                message: format!("{err:#}"),
            })?;
        debug!(
            doc_type = %adjustment.doc_type,
            query = %query,
            matches = matches.len(),
            "search complete"
        );

        for matched in matches {
            let id = self.identity_of(&matched)?;
            let base = self.tracker.touch(&id, matched);
            let adjusted = self
                .registry
                .apply(&adjustment.action, &base, &adjustment.adjustment)?;
            debug!(identity = %id, action = %adjustment.action, "adjusted");
            self.tracker.record(&id, adjusted);
        }
        Ok(())
    }

    fn identity_of(&self, doc: &Document) -> Result<String, AdjustIssue> {
        let field = |name: &str| {
            doc.get(name)
                .and_then(Document::as_str)
                .ok_or_else(|| AdjustIssue::MissingIdentity {
                    field: name.to_string(),
                })
        };
        Ok(identity(
            field(&self.settings.type_field)?,
            field(&self.settings.name_field)?,
        ))
    }
}

/// Run a batch of adjustment files.
///
/// `Err` is reserved for runtime failures of the chronicle; recorded problems
/// and save failures come back as an unsuccessful outcome.
pub fn run_adjust(
    settings: &AdjustSettings,
    paths: &[Utf8PathBuf],
    registry: &ActionRegistry,
    ports: &AdjustPorts<'_>,
) -> anyhow::Result<AdjustOutcome> {
    let mut ctx = RunContext::new(settings, registry, ports.search);
    for path in paths {
        info!(path = %path, "processing adjustment file");
        ctx.process_file(path);
    }
    finish(ctx, ports, Local::now())
}

fn finish(
    ctx: RunContext<'_>,
    ports: &AdjustPorts<'_>,
    now: DateTime<Local>,
) -> anyhow::Result<AdjustOutcome> {
    let settings = ctx.settings;
    let failed = ctx.reporter.has_errors();
    let mut error_lines = ctx.reporter.error_lines();
    let descriptions = ctx.descriptions;
    let changes = ctx.tracker.into_changes();

    let mut report = RunReport::new(settings.dry_run);
    report.files = ctx.reporter.into_reports();
    report.descriptions = descriptions.clone();
    report.changed = changes
        .iter()
        .filter(|c| c.is_modified())
        .map(|c| c.identity.clone())
        .collect();

    let mut diffs = Vec::new();
    let mut saved = 0;
    let mut success = !failed;

    if settings.dry_run {
        diffs = diff_changes(&changes);
    } else if failed {
        warn!("errors recorded, nothing will be saved");
    } else {
        let chronicle = ports.chronicle.filter(|_| settings.document);
        if let Some(chronicle) = chronicle {
            chronicle.record_state(&commit_message(&settings.commit_message, now))?;
        }

        let save_errors = save_all(settings, &changes, ports.store, &mut saved);
        if save_errors.is_empty() {
            if let Some(chronicle) = chronicle {
                chronicle.record_state(&descriptions.join("\n"))?;
            }
        } else {
            success = false;
            error_lines.push("SAVE FAILURES:".to_string());
            error_lines.extend(save_errors.into_iter().map(|e| format!("\t{e}")));
        }
    }

    report.success = success;
    report.saved = saved;
    info!(success, saved, changed = report.changed.len(), "adjust finished");

    Ok(AdjustOutcome {
        success,
        error_lines,
        descriptions,
        diffs,
        saved,
        report,
    })
}

/// Saves every tracked document. All saves are attempted; failures are
/// returned as messages.
fn save_all(
    settings: &AdjustSettings,
    changes: &[ChangeRecord],
    store: &dyn StorePort,
    saved: &mut u64,
) -> Vec<String> {
    let mut errors = Vec::new();
    for change in changes {
        // The adjusted document normally still declares its type; fall back
        // to the identity prefix when an action removed it.
        let doc_type = change
            .adjusted
            .get(&settings.type_field)
            .and_then(Document::as_str)
            .or_else(|| change.identity.split_once(':').map(|(t, _)| t))
            .unwrap_or_default();
        match store.save(doc_type, &change.adjusted) {
            Ok(()) => {
                debug!(identity = %change.identity, "saved");
                *saved += 1;
            }
            Err(err) => errors.push(format!("{}: {err:#}", change.identity)),
        }
    }
    errors
}

/// Expands the time placeholder in a chronicle commit message.
pub fn commit_message<Tz: TimeZone>(template: &str, now: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    template.replace(
        TIME_PLACEHOLDER,
        &now.format("%Y-%m-%d %H:%M:%S %z").to_string(),
    )
}
