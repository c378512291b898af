//! Applying a plan to a loaded document.

use std::fmt;

use json_doc_patch::{update_field, upsert, Document, PatchError, UpdateOutcome, UpsertOutcome};
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::types::{Plan, PlanOp};

/// What happened to one plan operation.
#[derive(Debug, Clone, PartialEq)]
pub enum OpStatus {
    Inserted,
    AlreadyPresent,
    /// Holds the previous values of the overwritten fields and the new ones.
    Updated {
        previous: Map<String, Value>,
        current: Map<String, Value>,
    },
    /// The update target does not exist.
    Missing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpReport {
    pub index: usize,
    pub collection: String,
    pub id: String,
    pub label: String,
    pub status: OpStatus,
}

impl OpReport {
    pub fn changed(&self) -> bool {
        matches!(self.status, OpStatus::Inserted | OpStatus::Updated { .. })
    }
}

impl fmt::Display for OpReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            OpStatus::Inserted => write!(f, "✓ Added {}", self.label),
            OpStatus::AlreadyPresent => {
                write!(f, "✓ {} already exists (ID: {})", self.label, self.id)
            }
            OpStatus::Updated { previous, current } => {
                write!(f, "✓ Updated {} (ID: {})", self.label, self.id)?;
                for (key, new) in current {
                    match (previous.get(key), new) {
                        (Some(Value::String(old)), Value::String(new)) => write!(
                            f,
                            "\n    {key}: {} -> {} chars",
                            old.chars().count(),
                            new.chars().count()
                        )?,
                        (Some(_), _) => write!(f, "\n    {key}: replaced")?,
                        (None, _) => write!(f, "\n    {key}: added")?,
                    }
                }
                Ok(())
            }
            OpStatus::Missing => write!(
                f,
                "✗ {} not found (ID: {} in `{}`)",
                self.label, self.id, self.collection
            ),
        }
    }
}

/// Outcome of every operation of a plan, in plan order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanReport {
    pub ops: Vec<OpReport>,
}

impl PlanReport {
    /// True when at least one operation modified the document.
    pub fn changed(&self) -> bool {
        self.ops.iter().any(OpReport::changed)
    }

    /// Update operations whose target record was absent.
    pub fn missing(&self) -> Vec<&OpReport> {
        self.ops
            .iter()
            .filter(|op| op.status == OpStatus::Missing)
            .collect()
    }
}

/// Applies every operation of `plan` to `doc`, in order.
///
/// A missing update target is recorded in the report and does not stop the
/// remaining operations. A [`PatchError`] aborts immediately; `doc` may then
/// hold the effects of the operations before it and should be discarded.
pub fn apply_plan(doc: &mut Document, plan: &Plan) -> Result<PlanReport, PatchError> {
    let mut report = PlanReport::default();
    for (index, op) in plan.ops.iter().enumerate() {
        let status = match op {
            PlanOp::Upsert {
                collection, record, ..
            } => match upsert(doc, collection, record.clone())? {
                UpsertOutcome::Inserted => OpStatus::Inserted,
                UpsertOutcome::AlreadyPresent => OpStatus::AlreadyPresent,
            },
            PlanOp::Update {
                collection,
                id,
                fields,
                ..
            } => match update_field(doc, collection, id, fields.clone())? {
                UpdateOutcome::Updated { previous } => OpStatus::Updated {
                    previous,
                    current: fields.clone(),
                },
                UpdateOutcome::NotFound => OpStatus::Missing,
            },
        };
        let entry = OpReport {
            index,
            collection: op.collection().to_owned(),
            id: op.id().to_owned(),
            label: op.describe(),
            status,
        };
        if entry.status == OpStatus::Missing {
            warn!(index, collection = %entry.collection, id = %entry.id, "update target not found");
        } else {
            info!(index, collection = %entry.collection, id = %entry.id, changed = entry.changed(), "applied operation");
        }
        report.ops.push(entry);
    }
    Ok(report)
}
