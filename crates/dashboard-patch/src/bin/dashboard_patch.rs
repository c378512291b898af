//! `dashboard-patch` — apply a patch plan to a dashboard JSON file.
//!
//! Usage:
//!   dashboard-patch apply --plan plans/hag_web_service_tile.toml --document BCTelemetryDashboard.json
//!   dashboard-patch validate --plan plans/hag_web_service_function_names.toml -d BCTelemetryDashboard.json

use std::process::ExitCode;

use clap::Parser;
use dashboard_patch::cli::{commands, Cli};
use dashboard_patch::logging::init_tracing;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match commands::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
