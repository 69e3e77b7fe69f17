//! Adjustment file templates for `scribe adjust --generate`.

use crate::{AdjustmentFile, Document};
use serde_json::json;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Document collections the chronicle mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Environment,
    Node,
    Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Incorrect adjustment type! Only 'node', 'environment' or 'role' allowed.")]
pub struct UnknownDocumentKind(pub String);

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [Self::Environment, Self::Node, Self::Role];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::Node => "node",
            Self::Role => "role",
        }
    }

    /// A single `merge` adjustment with empty parameters for this kind.
    pub fn adjustment_template(self) -> Document {
        let params = match self {
            Self::Environment | Self::Role => json!({
                "default_attributes": {},
                "override_attributes": {}
            }),
            Self::Node => json!({
                "normal": {},
                "run_list": []
            }),
        };
        json!({
            "action": "merge",
            "type": self.as_str(),
            "search": "",
            "adjustment": params
        })
    }

    /// A complete adjustment file with one template entry.
    pub fn file_template(self) -> AdjustmentFile {
        AdjustmentFile {
            adjustments: vec![self.adjustment_template()],
            ..AdjustmentFile::default()
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = UnknownDocumentKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownDocumentKind(s.to_string()))
    }
}
