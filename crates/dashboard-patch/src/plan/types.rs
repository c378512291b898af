//! Plan file types.

use std::path::{Path, PathBuf};

use json_doc_patch::{Record, SaveOptions};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("failed to read plan {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML plan: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON plan: {0}")]
    Json(#[from] serde_json::Error),
    #[error("plan has no operations")]
    Empty,
    #[error("operation #{index}: {reason}")]
    InvalidOp { index: usize, reason: String },
}

// ── Plan ──────────────────────────────────────────────────────────────────

/// A declarative list of patch operations against one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plan {
    /// Short name shown in logs.
    #[serde(default)]
    pub name: Option<String>,
    /// Document to patch. Relative paths are resolved against the directory
    /// holding the plan file.
    #[serde(default)]
    pub document: Option<PathBuf>,
    #[serde(default)]
    pub format: SaveOptions,
    #[serde(default)]
    pub ops: Vec<PlanOp>,
}

impl Plan {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed plan")
    }

    /// The document path named by the plan, resolved against `plan_dir`.
    pub fn document_path(&self, plan_dir: &Path) -> Option<PathBuf> {
        self.document.as_ref().map(|doc| {
            if doc.is_absolute() {
                doc.clone()
            } else {
                plan_dir.join(doc)
            }
        })
    }
}

/// One plan operation, tagged by its `op` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PlanOp {
    /// Insert `record` into `collection` unless its id is already present.
    Upsert {
        collection: String,
        #[serde(default)]
        label: Option<String>,
        record: Record,
    },
    /// Overwrite `fields` on the record `id` of `collection`.
    Update {
        collection: String,
        #[serde(default)]
        label: Option<String>,
        id: String,
        fields: Map<String, Value>,
    },
}

impl PlanOp {
    pub fn collection(&self) -> &str {
        match self {
            PlanOp::Upsert { collection, .. } | PlanOp::Update { collection, .. } => collection,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            PlanOp::Upsert { record, .. } => record.id(),
            PlanOp::Update { id, .. } => id,
        }
    }

    /// The label, or `collection/id` when none was given.
    pub fn describe(&self) -> String {
        let label = match self {
            PlanOp::Upsert { label, .. } | PlanOp::Update { label, .. } => label,
        };
        match label {
            Some(label) => label.clone(),
            None => format!("{}/{}", self.collection(), self.id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn describe_falls_back_to_collection_and_id() {
        let op: PlanOp = serde_json::from_value(json!({
            "op": "update", "collection": "queries", "id": "Q1", "fields": {"text": "t"}
        }))
        .unwrap();
        assert_eq!(op.describe(), "queries/Q1");
        assert_eq!(op.id(), "Q1");
    }

    #[test]
    fn label_wins_over_fallback() {
        let op: PlanOp = serde_json::from_value(json!({
            "op": "upsert", "collection": "tiles", "label": "HAG tile", "record": {"id": "T"}
        }))
        .unwrap();
        assert_eq!(op.describe(), "HAG tile");
        assert_eq!(op.collection(), "tiles");
    }

    #[test]
    fn document_path_is_relative_to_plan_dir() {
        let plan = Plan {
            name: None,
            document: Some(PathBuf::from("dash.json")),
            format: SaveOptions::default(),
            ops: Vec::new(),
        };
        assert_eq!(
            plan.document_path(Path::new("/plans")),
            Some(PathBuf::from("/plans/dash.json"))
        );
        assert_eq!(plan.display_name(), "unnamed plan");
    }
}
