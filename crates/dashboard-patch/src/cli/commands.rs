//! Command implementations.

use std::process::ExitCode;

use anyhow::{Context, Result};

use super::{ApplyArgs, Cli, Commands, ValidateArgs};
use crate::runner::{self, ApplyRequest};

/// Runs the parsed command and maps its outcome to an exit code.
pub fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Apply(args) => run_apply(args),
        Commands::Validate(args) => run_validate(args),
    }
}

fn exit(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

pub fn run_apply(args: ApplyArgs) -> Result<ExitCode> {
    let request = ApplyRequest {
        plan: args.plan,
        document: args.document,
        dry_run: args.dry_run,
        allow_missing: args.allow_missing,
    };
    let summary = runner::apply(&request)
        .with_context(|| format!("applying plan {}", request.plan.display()))?;

    println!("File: {}\n", summary.document.display());
    for op in &summary.report.ops {
        println!("{op}");
    }
    println!();

    if summary.saved {
        println!("✓ Dashboard updated successfully: {}", summary.document.display());
    } else if request.dry_run {
        println!("Dry run: {} not written", summary.document.display());
    } else if !summary.report.missing().is_empty() && !request.allow_missing {
        println!(
            "✗ {} update target(s) missing, {} left unchanged",
            summary.report.missing().len(),
            summary.document.display()
        );
    } else {
        println!("✓ Dashboard already up to date: {}", summary.document.display());
    }
    Ok(exit(summary.succeeded(request.allow_missing)))
}

pub fn run_validate(args: ValidateArgs) -> Result<ExitCode> {
    let summary = runner::validate(&args.plan, args.document.as_deref())
        .with_context(|| format!("validating plan {}", args.plan.display()))?;

    println!("File: {}\n", summary.document.display());
    for op in &summary.report.ops {
        println!("{op}");
    }
    for (collection, ids) in &summary.duplicates {
        println!("✗ duplicate ids in `{collection}`: {}", ids.join(", "));
    }
    println!();
    if summary.is_clean() {
        println!("✓ Plan is valid");
    } else {
        println!("✗ Plan has problems");
    }
    Ok(exit(summary.is_clean()))
}
