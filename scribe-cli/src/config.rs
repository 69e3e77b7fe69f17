//! Configuration file loading for scribe.
//!
//! Discovers and loads `scribe.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use scribe_core::AdjustSettings;
use scribe_core::settings::DEFAULT_COMMIT_MESSAGE;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "scribe.toml";

pub const DEFAULT_CHRONICLE_PATH: &str = ".chronicle";

/// Top-level configuration from scribe.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScribeConfig {
    pub chronicle: ChronicleConfig,
    pub identity: IdentityConfig,
    pub adjust: AdjustConfig,
}

/// Where the chronicle lives and how its state is recorded.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChronicleConfig {
    pub path: Utf8PathBuf,

    /// `%TIME%` is replaced by the current time.
    pub commit_message: String,
}

impl Default for ChronicleConfig {
    fn default() -> Self {
        Self {
            path: Utf8PathBuf::from(DEFAULT_CHRONICLE_PATH),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
        }
    }
}

/// Document fields that make up an identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub type_field: String,
    pub name_field: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        let settings = AdjustSettings::default();
        Self {
            type_field: settings.type_field,
            name_field: settings.name_field,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdjustConfig {
    /// Record the chronicle state before and after saving.
    pub document: bool,
}

/// Discover the scribe.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

pub fn load_config(path: &Utf8Path) -> anyhow::Result<ScribeConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<ScribeConfig> {
    let config: ScribeConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<ScribeConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(ScribeConfig::default()),
    }
}

/// CLI values that can override the config file.
#[derive(Debug, Clone, Default)]
pub struct AdjustOverrides {
    pub dry_run: bool,
    pub document: bool,
    pub chronicle_path: Option<Utf8PathBuf>,
    pub commit_message: Option<String>,
}

/// Settings for one adjust run after merging.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub chronicle_path: Utf8PathBuf,
    pub settings: AdjustSettings,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: ScribeConfig,
}

impl ConfigMerger {
    pub fn new(config: ScribeConfig) -> Self {
        Self { config }
    }

    /// Merge with adjust command CLI arguments.
    ///
    /// Boolean flags turn a setting on; they cannot turn off one enabled in
    /// the config file. Values given on the command line replace file values.
    pub fn merge_adjust_args(self, cli: &AdjustOverrides) -> MergedConfig {
        let ScribeConfig {
            chronicle,
            identity,
            adjust,
        } = self.config;

        MergedConfig {
            chronicle_path: cli.chronicle_path.clone().unwrap_or(chronicle.path),
            settings: AdjustSettings {
                dry_run: cli.dry_run,
                document: cli.document || adjust.document,
                commit_message: cli
                    .commit_message
                    .clone()
                    .unwrap_or(chronicle.commit_message),
                type_field: identity.type_field,
                name_field: identity.name_field,
            },
        }
    }
}
