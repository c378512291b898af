//! Reading plans from TOML or JSON.

use std::fs;
use std::path::Path;

use super::types::{Plan, PlanError, PlanOp};

/// Reads a plan file. `.json` files are parsed as JSON, everything else as
/// TOML.
pub fn read_plan(path: &Path) -> Result<Plan, PlanError> {
    let text = fs::read_to_string(path).map_err(|source| PlanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        from_json_str(&text)
    } else {
        from_toml_str(&text)
    }
}

pub fn from_toml_str(text: &str) -> Result<Plan, PlanError> {
    validate(toml::from_str(text)?)
}

pub fn from_json_str(text: &str) -> Result<Plan, PlanError> {
    validate(serde_json::from_str(text)?)
}

fn validate(plan: Plan) -> Result<Plan, PlanError> {
    if plan.ops.is_empty() {
        return Err(PlanError::Empty);
    }
    for (index, op) in plan.ops.iter().enumerate() {
        let invalid = |reason: &str| PlanError::InvalidOp {
            index,
            reason: reason.to_owned(),
        };
        if op.collection().is_empty() {
            return Err(invalid("collection name is empty"));
        }
        if op.id().is_empty() {
            return Err(invalid("id is empty"));
        }
        if let PlanOp::Update { fields, .. } = op {
            if fields.is_empty() {
                return Err(invalid("update lists no fields"));
            }
        }
    }
    Ok(plan)
}
