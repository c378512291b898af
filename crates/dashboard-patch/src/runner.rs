//! Load → apply → save driver shared by the CLI commands.

use std::path::{Path, PathBuf};

use json_doc_patch::{load, save, DocumentError, PatchError};
use thiserror::Error;
use tracing::{info, info_span};

use crate::plan::{apply_plan, read_plan, Plan, PlanError, PlanReport};

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Patch(#[from] PatchError),
    #[error("no document given: pass --document or set `document` in the plan")]
    NoDocument,
}

/// Inputs of one `apply` run.
#[derive(Debug, Clone, Default)]
pub struct ApplyRequest {
    pub plan: PathBuf,
    /// Overrides the plan's `document` entry.
    pub document: Option<PathBuf>,
    /// Apply in memory only.
    pub dry_run: bool,
    /// Save even when some update targets were missing.
    pub allow_missing: bool,
}

#[derive(Debug, Clone)]
pub struct ApplySummary {
    pub document: PathBuf,
    pub report: PlanReport,
    pub saved: bool,
}

impl ApplySummary {
    /// Whether the run should exit successfully.
    pub fn succeeded(&self, allow_missing: bool) -> bool {
        allow_missing || self.report.missing().is_empty()
    }
}

/// Result of `validate`: predicted outcomes plus duplicate ids per collection.
#[derive(Debug, Clone)]
pub struct ValidateSummary {
    pub document: PathBuf,
    pub report: PlanReport,
    pub duplicates: Vec<(String, Vec<String>)>,
}

impl ValidateSummary {
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.report.missing().is_empty()
    }
}

fn resolve(plan_path: &Path, override_doc: Option<&Path>) -> Result<(Plan, PathBuf), RunError> {
    let plan = read_plan(plan_path)?;
    let plan_dir = plan_path.parent().unwrap_or_else(|| Path::new("."));
    let document = match override_doc {
        Some(path) => path.to_path_buf(),
        None => plan.document_path(plan_dir).ok_or(RunError::NoDocument)?,
    };
    Ok((plan, document))
}

/// Applies the plan and saves the document.
///
/// Nothing is written when the run is a dry run, when no operation changed the
/// document, or when an update target was missing and `allow_missing` is off.
pub fn apply(request: &ApplyRequest) -> Result<ApplySummary, RunError> {
    let (plan, document) = resolve(&request.plan, request.document.as_deref())?;
    let span = info_span!("apply", plan = plan.display_name());
    let _guard = span.enter();

    let mut doc = load(&document)?;
    let report = apply_plan(&mut doc, &plan)?;

    let blocked = !request.allow_missing && !report.missing().is_empty();
    let saved = if request.dry_run {
        info!("dry run, not saving");
        false
    } else if blocked {
        info!(missing = report.missing().len(), "update targets missing, not saving");
        false
    } else if !report.changed() {
        info!("document already up to date");
        false
    } else {
        save(&doc, &document, &plan.format)?;
        true
    };

    Ok(ApplySummary {
        document,
        report,
        saved,
    })
}

/// Checks a plan against its document without writing anything.
pub fn validate(plan_path: &Path, document: Option<&Path>) -> Result<ValidateSummary, RunError> {
    let (plan, document) = resolve(plan_path, document)?;
    let span = info_span!("validate", plan = plan.display_name());
    let _guard = span.enter();

    let original = load(&document)?;
    let mut collections: Vec<&str> = plan.ops.iter().map(|op| op.collection()).collect();
    collections.sort_unstable();
    collections.dedup();
    let duplicates: Vec<(String, Vec<String>)> = collections
        .into_iter()
        .filter_map(|name| {
            let ids = original.duplicate_ids(name);
            (!ids.is_empty()).then(|| (name.to_owned(), ids))
        })
        .collect();

    let mut scratch = original;
    let report = apply_plan(&mut scratch, &plan)?;

    Ok(ValidateSummary {
        document,
        report,
        duplicates,
    })
}
