//! Default port implementations.
//!
//! The chronicle layout is one pretty-printed JSON file per document under a
//! pluralised type directory: `<chronicle>/environments/production.json`.

use crate::ports::{ChroniclePort, SearchPort, StorePort};
use crate::query::Query;
use anyhow::{Context, anyhow, bail};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::glob;
use scribe_types::Document;
use std::process::Command;
use std::sync::Mutex;
use tracing::debug;

/// Directory holding documents of `doc_type` inside a chronicle.
pub fn collection_dir(root: &Utf8Path, doc_type: &str) -> Utf8PathBuf {
    root.join(format!("{doc_type}s"))
}

/// Serialized form written to the chronicle: pretty JSON with sorted keys and
/// a trailing newline.
pub fn chronicle_json(document: &Document) -> anyhow::Result<String> {
    let mut out = serde_json::to_string_pretty(document).context("serialize document")?;
    out.push('\n');
    Ok(out)
}

/// Searches the documents mirrored in a chronicle directory.
#[derive(Debug, Clone)]
pub struct FsChronicleSearch {
    pub root: Utf8PathBuf,
}

impl FsChronicleSearch {
    pub fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }
}

impl SearchPort for FsChronicleSearch {
    fn query(&self, doc_type: &str, query: &str) -> anyhow::Result<Vec<Document>> {
        let query = Query::parse(query)?;
        let dir = collection_dir(&self.root, doc_type);
        if !dir.is_dir() {
            debug!(dir = %dir, "collection directory missing, no matches");
            return Ok(Vec::new());
        }

        let pattern = dir.join("*.json");
        let mut paths = Vec::new();
        for entry in glob(pattern.as_str()).with_context(|| format!("glob {pattern}"))? {
            let path = entry.map_err(|e| anyhow!("glob error: {e}"))?;
            let path = Utf8PathBuf::from_path_buf(path)
                .map_err(|p| anyhow!("non-utf8 path: {}", p.display()))?;
            paths.push(path);
        }
        paths.sort();

        let mut out = Vec::new();
        for path in paths {
            let text = fs::read_to_string(&path)?;
            let doc: Document =
                serde_json::from_str(&text).with_context(|| format!("parse {path}"))?;
            if query.matches(&doc) {
                debug!(path = %path, "search match");
                out.push(doc);
            }
        }
        Ok(out)
    }
}

/// Writes adjusted documents back into a chronicle directory.
#[derive(Debug, Clone)]
pub struct FsChronicleStore {
    pub root: Utf8PathBuf,
    pub name_field: String,
}

impl FsChronicleStore {
    pub fn new(root: Utf8PathBuf, name_field: impl Into<String>) -> Self {
        Self {
            root,
            name_field: name_field.into(),
        }
    }
}

impl StorePort for FsChronicleStore {
    fn save(&self, doc_type: &str, document: &Document) -> anyhow::Result<()> {
        let name = document
            .get(&self.name_field)
            .and_then(Document::as_str)
            .ok_or_else(|| anyhow!("document has no string `{}` field", self.name_field))?;
        ensure_path_segment("type", doc_type)?;
        ensure_path_segment("name", name)?;

        let dir = collection_dir(&self.root, doc_type);
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{name}.json"));
        fs::write(&path, chronicle_json(document)?)?;
        debug!(path = %path, "saved document");
        Ok(())
    }
}

/// Rejects values that would leave their directory when joined into a path.
fn ensure_path_segment(what: &str, value: &str) -> anyhow::Result<()> {
    if value.is_empty() || value.contains(['/', '\\']) || value == "." || value == ".." {
        bail!("refusing to save document with unsafe {what} `{value}`");
    }
    Ok(())
}

/// Records chronicle state as a git commit.
#[derive(Debug, Clone)]
pub struct ShellChronicle {
    pub root: Utf8PathBuf,
}

impl ShellChronicle {
    pub fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    fn git(&self, args: &[&str]) -> anyhow::Result<std::process::Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .with_context(|| format!("run git {} in {}", args.join(" "), self.root))
    }
}

impl ChroniclePort for ShellChronicle {
    fn record_state(&self, message: &str) -> anyhow::Result<()> {
        let add = self.git(&["add", "."])?;
        if !add.status.success() {
            bail!(
                "git add failed in {}: {}",
                self.root,
                String::from_utf8_lossy(&add.stderr).trim()
            );
        }

        let commit = self.git(&["commit", "-m", message])?;
        match commit.status.code() {
            Some(0) => debug!(root = %self.root, "recorded chronicle state"),
            // Nothing to commit.
            Some(1) => debug!(root = %self.root, "chronicle unchanged"),
            _ => bail!(
                "git commit failed in {}: {}",
                self.root,
                String::from_utf8_lossy(&commit.stderr).trim()
            ),
        }
        Ok(())
    }
}

/// In-memory document catalog serving as both search and store, for
/// embedding and testing.
///
/// Documents are filtered by their type field on search; saves replace the
/// document with the same type and name or append a new one.
#[derive(Debug)]
pub struct InMemoryCatalog {
    type_field: String,
    name_field: String,
    documents: Mutex<Vec<Document>>,
    saves: Mutex<Vec<(String, Document)>>,
}

impl InMemoryCatalog {
    pub fn new(documents: Vec<Document>) -> Self {
        Self::with_fields(documents, "chef_type", "name")
    }

    pub fn with_fields(
        documents: Vec<Document>,
        type_field: impl Into<String>,
        name_field: impl Into<String>,
    ) -> Self {
        Self {
            type_field: type_field.into(),
            name_field: name_field.into(),
            documents: Mutex::new(documents),
            saves: Mutex::new(Vec::new()),
        }
    }

    /// Current catalog contents.
    pub fn documents(&self) -> Vec<Document> {
        self.documents.lock().map(|d| d.clone()).unwrap_or_default()
    }

    /// Every `save` call so far, in order.
    pub fn saves(&self) -> Vec<(String, Document)> {
        self.saves.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn field<'a>(doc: &'a Document, field: &str) -> Option<&'a str> {
        doc.get(field).and_then(Document::as_str)
    }
}

impl SearchPort for InMemoryCatalog {
    fn query(&self, doc_type: &str, query: &str) -> anyhow::Result<Vec<Document>> {
        let query = Query::parse(query)?;
        let docs = self
            .documents
            .lock()
            .map_err(|_| anyhow!("catalog lock poisoned"))?;
        Ok(docs
            .iter()
            .filter(|d| Self::field(d, &self.type_field) == Some(doc_type))
            .filter(|d| query.matches(d))
            .cloned()
            .collect())
    }
}

impl StorePort for InMemoryCatalog {
    fn save(&self, doc_type: &str, document: &Document) -> anyhow::Result<()> {
        let name = Self::field(document, &self.name_field)
            .ok_or_else(|| anyhow!("document has no string `{}` field", self.name_field))?;

        let mut docs = self
            .documents
            .lock()
            .map_err(|_| anyhow!("catalog lock poisoned"))?;
        let existing = docs.iter_mut().find(|d| {
            Self::field(d, &self.type_field) == Some(doc_type)
                && Self::field(d, &self.name_field) == Some(name)
        });
        match existing {
            Some(slot) => *slot = document.clone(),
            None => docs.push(document.clone()),
        }

        self.saves
            .lock()
            .map_err(|_| anyhow!("catalog lock poisoned"))?
            .push((doc_type.to_string(), document.clone()));
        Ok(())
    }
}

/// Chronicle that only remembers the messages it was asked to record.
#[derive(Debug, Default)]
pub struct InMemoryChronicle {
    messages: Mutex<Vec<String>>,
}

impl InMemoryChronicle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl ChroniclePort for InMemoryChronicle {
    fn record_state(&self, message: &str) -> anyhow::Result<()> {
        self.messages
            .lock()
            .map_err(|_| anyhow!("chronicle lock poisoned"))?
            .push(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        (temp, root)
    }

    fn env(name: &str) -> Document {
        json!({ "chef_type": "environment", "name": name, "default_attributes": {} })
    }

    #[test]
    fn fs_store_writes_pretty_sorted_json() {
        let (_temp, root) = temp_root();
        let store = FsChronicleStore::new(root.clone(), "name");
        store
            .save("environment", &json!({ "name": "prod", "b": 1, "a": 2 }))
            .expect("save");

        let written = std::fs::read_to_string(root.join("environments/prod.json")).expect("read");
        assert_eq!(written, "{\n  \"a\": 2,\n  \"b\": 1,\n  \"name\": \"prod\"\n}\n");
    }

    #[test]
    fn fs_store_rejects_missing_or_unsafe_names() {
        let (_temp, root) = temp_root();
        let store = FsChronicleStore::new(root, "name");
        assert!(store.save("node", &json!({ "x": 1 })).is_err());
        assert!(store.save("node", &json!({ "name": "../evil" })).is_err());
    }

    #[test]
    fn fs_store_rejects_unsafe_types() {
        let (_temp, root) = temp_root();
        let store = FsChronicleStore::new(root.join("chronicle"), "name");
        for doc_type in ["../escape", "/tmp/abs", "a\\b", "", ".", ".."] {
            let err = store
                .save(doc_type, &json!({ "name": "victim" }))
                .expect_err("unsafe type accepted");
            assert!(err.to_string().contains("unsafe type"), "{err}");
        }
        assert!(!root.join("escapes").exists());
        assert!(!root.join("chronicle").exists());
    }

    #[test]
    fn fs_search_matches_in_path_order() {
        let (_temp, root) = temp_root();
        let store = FsChronicleStore::new(root.clone(), "name");
        for name in ["web2", "db1", "web1"] {
            store.save("environment", &env(name)).expect("save");
        }

        let search = FsChronicleSearch::new(root);
        let names = |docs: Vec<Document>| -> Vec<String> {
            docs.iter()
                .map(|d| d["name"].as_str().unwrap_or_default().to_string())
                .collect()
        };

        assert_eq!(
            names(search.query("environment", "name:web*").expect("query")),
            vec!["web1", "web2"]
        );
        assert_eq!(
            names(search.query("environment", "*:*").expect("query")),
            vec!["db1", "web1", "web2"]
        );
    }

    #[test]
    fn fs_search_missing_collection_is_empty() {
        let (_temp, root) = temp_root();
        let search = FsChronicleSearch::new(root);
        assert!(search.query("role", "name:x").expect("query").is_empty());
    }

    #[test]
    fn fs_search_reports_malformed_documents() {
        let (_temp, root) = temp_root();
        std::fs::create_dir_all(root.join("roles")).expect("mkdir");
        std::fs::write(root.join("roles/broken.json"), "{").expect("write");
        let search = FsChronicleSearch::new(root);
        assert!(search.query("role", "*:*").is_err());
    }

    #[test]
    fn in_memory_catalog_filters_by_type() {
        let catalog = InMemoryCatalog::new(vec![
            env("prod"),
            json!({ "chef_type": "role", "name": "prod" }),
        ]);
        let found = catalog.query("role", "name:prod").expect("query");
        assert_eq!(found, vec![json!({ "chef_type": "role", "name": "prod" })]);
    }

    #[test]
    fn in_memory_catalog_save_replaces_by_identity() {
        let catalog = InMemoryCatalog::new(vec![env("prod")]);
        let mut updated = env("prod");
        updated["default_attributes"] = json!({ "a": 1 });
        catalog.save("environment", &updated).expect("save");

        assert_eq!(catalog.documents(), vec![updated.clone()]);
        assert_eq!(catalog.saves(), vec![("environment".to_string(), updated)]);
    }

    #[test]
    fn in_memory_chronicle_keeps_messages() {
        let chronicle = InMemoryChronicle::new();
        chronicle.record_state("one").expect("record");
        chronicle.record_state("two").expect("record");
        assert_eq!(chronicle.messages(), vec!["one", "two"]);
    }
}
