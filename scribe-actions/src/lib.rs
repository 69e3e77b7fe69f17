//! Action registry: the named transforms an adjustment can request.
//!
//! Actions are pure `(base, params) -> Document` functions. They never see
//! files, searches or identities; the pipeline owns all of that.

mod delete;
mod error;
mod merge;
mod overwrite;

pub use delete::{DeleteAction, delete};
pub use error::ActionError;
pub use merge::{HashOnlyMergeAction, MergeAction, hash_only_merge, merge};
pub use overwrite::{OverwriteAction, overwrite};

use scribe_types::Document;
use std::collections::BTreeMap;
use tracing::debug;

pub trait Action: Send + Sync {
    /// Returns the transformed document. `base` and `params` are borrowed and
    /// must come back untouched.
    fn transform(&self, base: &Document, params: &Document) -> Document;
}

impl<F> Action for F
where
    F: Fn(&Document, &Document) -> Document + Send + Sync,
{
    fn transform(&self, base: &Document, params: &Document) -> Document {
        self(base, params)
    }
}

/// Name -> action lookup, resolved when an adjustment is validated.
pub struct ActionRegistry {
    actions: BTreeMap<String, Box<dyn Action>>,
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl ActionRegistry {
    /// A registry with no actions.
    pub fn empty() -> Self {
        Self {
            actions: BTreeMap::new(),
        }
    }

    /// A registry with `overwrite`, `delete`, `merge` and `hash_only_merge`.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(OverwriteAction::NAME, OverwriteAction);
        registry.register(DeleteAction::NAME, DeleteAction);
        registry.register(MergeAction::NAME, MergeAction);
        registry.register(HashOnlyMergeAction::NAME, HashOnlyMergeAction);
        registry
    }

    /// Registers `action` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, action: impl Action + 'static) {
        self.actions.insert(name.into(), Box::new(action));
    }

    pub fn resolve(&self, name: &str) -> Result<&dyn Action, ActionError> {
        self.actions
            .get(name)
            .map(|a| a.as_ref())
            .ok_or_else(|| ActionError::UnknownAction {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn apply(
        &self,
        name: &str,
        base: &Document,
        params: &Document,
    ) -> Result<Document, ActionError> {
        let action = self.resolve(name)?;
        debug!(action = name, "applying action");
        Ok(action.transform(base, params))
    }
}
