//! dashboard-patch — apply declarative tile/query plans to dashboard JSON files.
//!
//! Plans (see [`plan`]) list upsert and update operations. The [`runner`]
//! loads the target document, applies the plan with [`json_doc_patch`], and
//! saves the result only when something changed.

pub mod cli;
pub mod logging;
pub mod plan;
pub mod runner;

pub use plan::{apply_plan, read_plan, OpReport, OpStatus, Plan, PlanError, PlanOp, PlanReport};
pub use runner::{apply, validate, ApplyRequest, ApplySummary, RunError, ValidateSummary};
