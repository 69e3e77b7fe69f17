//! BDD harness (cucumber-rs).
//!
//! This crate keeps scenario tests isolated from the production crates. The
//! helpers below build chronicle and adjustment-file fixtures.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde_json::{Value, json};

/// Chronicle directory name used by scenarios (the CLI default).
pub const CHRONICLE_DIR: &str = ".chronicle";

pub fn chronicle_file(root: &Utf8Path, doc_type: &str, name: &str) -> Utf8PathBuf {
    root.join(CHRONICLE_DIR)
        .join(format!("{doc_type}s"))
        .join(format!("{name}.json"))
}

pub fn environment(name: &str, default_attributes: Value) -> Value {
    json!({
        "chef_type": "environment",
        "json_class": "Chef::Environment",
        "name": name,
        "description": "",
        "cookbook_versions": {},
        "default_attributes": default_attributes,
        "override_attributes": {}
    })
}

pub fn adjustment_file(description: &str, adjustments: Vec<Value>) -> Value {
    json!({
        "author_name": "Scenario",
        "author_email": "scenario@example.com",
        "description": description,
        "adjustments": adjustments
    })
}

pub fn adjustment(action: &str, doc_type: &str, search: &str, params: Value) -> Value {
    json!({
        "action": action,
        "type": doc_type,
        "search": search,
        "adjustment": params
    })
}

pub fn write_json(path: &Utf8Path, value: &Value) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = serde_json::to_string_pretty(value).context("serialize fixture")?;
    fs::write(path, text)?;
    Ok(())
}

pub fn read_json(path: &Utf8Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).with_context(|| format!("parse {path}"))
}
