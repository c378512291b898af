//! Command-line interface.

pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// dashboard-patch - apply tile/query patch plans to dashboard JSON files.
#[derive(Parser, Debug)]
#[command(name = "dashboard-patch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error). Overrides RUST_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply a plan and save the document.
    Apply(ApplyArgs),
    /// Check a plan against the document without writing.
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Plan file (.toml or .json).
    #[arg(short, long, env = "DASHBOARD_PATCH_PLAN")]
    pub plan: PathBuf,
    /// Dashboard JSON file; overrides the plan's `document`.
    #[arg(short, long, env = "DASHBOARD_PATCH_DOCUMENT")]
    pub document: Option<PathBuf>,
    /// Apply in memory and print the report without saving.
    #[arg(long)]
    pub dry_run: bool,
    /// Save and succeed even if some update targets are missing.
    #[arg(long)]
    pub allow_missing: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Plan file (.toml or .json).
    #[arg(short, long, env = "DASHBOARD_PATCH_PLAN")]
    pub plan: PathBuf,
    /// Dashboard JSON file; overrides the plan's `document`.
    #[arg(short, long, env = "DASHBOARD_PATCH_DOCUMENT")]
    pub document: Option<PathBuf>,
}
