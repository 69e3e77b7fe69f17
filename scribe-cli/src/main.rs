use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use fs_err as fs;
use scribe_cli::config::{self, AdjustOverrides, ConfigMerger};
use scribe_core::adapters::{FsChronicleSearch, FsChronicleStore, ShellChronicle};
use scribe_core::ports::ChroniclePort;
use scribe_core::{ActionRegistry, AdjustOutcome, AdjustPorts, run_adjust};
use scribe_render::{render_patch, render_summary_md};
use scribe_types::DocumentKind;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

const NO_FILES: &str = "At least one adjustment file needs to be specified!";

#[derive(Debug, Parser)]
#[command(
    name = "scribe",
    version,
    about = "Declarative bulk edits for mirrored configuration documents."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply adjustment files to chronicle documents, or generate templates.
    Adjust(AdjustArgs),
}

#[derive(Debug, Parser)]
struct AdjustArgs {
    /// Adjustment files, processed in order.
    files: Vec<Utf8PathBuf>,

    /// Write an adjustment file template to each FILE instead of applying.
    #[arg(short, long, default_value_t = false)]
    generate: bool,

    /// Document type for generated templates (environment, node, role).
    #[arg(short = 'T', long = "type", default_value = "environment")]
    doc_type: String,

    /// Print diffs instead of saving.
    #[arg(short = 'n', long, default_value_t = false)]
    dry_run: bool,

    /// Record the chronicle state before and after saving.
    #[arg(short, long, default_value_t = false)]
    document: bool,

    /// Chronicle directory (default: [chronicle].path or .chronicle).
    #[arg(long, env = "SCRIBE_CHRONICLE_PATH")]
    chronicle_path: Option<Utf8PathBuf>,

    /// Message for the state recorded before saving; `%TIME%` is expanded.
    #[arg(long)]
    commit_message: Option<String>,

    /// Config file (default: ./scribe.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Write a markdown summary of the run.
    #[arg(long)]
    summary: Option<Utf8PathBuf>,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    // Diffs go to stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Adjust(args) => cmd_adjust(args),
    }
}

fn cmd_adjust(args: AdjustArgs) -> anyhow::Result<ExitCode> {
    if args.files.is_empty() {
        bail!(NO_FILES);
    }

    if args.generate {
        let kind: DocumentKind = args.doc_type.parse()?;
        for file in &args.files {
            generate_template(file, kind)?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    let file_config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(Utf8Path::new(".")).context("load scribe.toml config")?,
    };
    let merged = ConfigMerger::new(file_config).merge_adjust_args(&AdjustOverrides {
        dry_run: args.dry_run,
        document: args.document,
        chronicle_path: args.chronicle_path.clone(),
        commit_message: args.commit_message.clone(),
    });
    debug!(
        "merged config: chronicle={}, dry_run={}, document={}",
        merged.chronicle_path, merged.settings.dry_run, merged.settings.document
    );

    let search = FsChronicleSearch::new(merged.chronicle_path.clone());
    let store = FsChronicleStore::new(
        merged.chronicle_path.clone(),
        merged.settings.name_field.clone(),
    );
    let chronicle = ShellChronicle::new(merged.chronicle_path.clone());
    let ports = AdjustPorts {
        search: &search,
        store: &store,
        chronicle: Some(&chronicle as &dyn ChroniclePort),
    };

    let outcome = run_adjust(
        &merged.settings,
        &args.files,
        &ActionRegistry::builtin(),
        &ports,
    )?;

    print_outcome(&outcome);

    if let Some(path) = &args.summary {
        fs::write(path, render_summary_md(&outcome.report))
            .with_context(|| format!("write {}", path))?;
        info!("wrote summary to {}", path);
    }

    Ok(if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}

fn generate_template(path: &Utf8Path, kind: DocumentKind) -> anyhow::Result<()> {
    let template = serde_json::to_string_pretty(&kind.file_template())
        .context("serialize adjustment template")?;
    fs::write(path, template).with_context(|| format!("write {}", path))?;
    info!("wrote {} template to {}", kind, path);
    Ok(())
}

fn print_outcome(outcome: &AdjustOutcome) {
    for line in &outcome.error_lines {
        eprintln!("{line}");
    }
    if outcome.report.dry_run {
        print!("{}", render_patch(&outcome.diffs));
    } else if outcome.success {
        println!("Saved {} document(s).", outcome.saved);
    }
}
