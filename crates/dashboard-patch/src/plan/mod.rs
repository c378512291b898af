//! Patch plans: declarative lists of upsert/update operations.
//!
//! A plan is read from TOML or JSON, validated, and applied to a
//! [`json_doc_patch::Document`] in order.

pub mod apply;
pub mod codec;
pub mod types;

pub use apply::{apply_plan, OpReport, OpStatus, PlanReport};
pub use codec::{from_json_str, from_toml_str, read_plan};
pub use types::{Plan, PlanError, PlanOp};
