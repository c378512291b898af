//! Tracing subscriber setup for the binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when neither `--log-level` nor `RUST_LOG` is set. The
/// report goes to stdout; diagnostics stay quiet unless asked for.
const DEFAULT_FILTER: &str = "warn";

/// Builds the filter from an explicit level, falling back to `RUST_LOG`.
pub fn filter(level: Option<&str>) -> EnvFilter {
    let parsed = match level {
        Some(level) => EnvFilter::try_new(level).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    };
    parsed.unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs a stderr fmt subscriber. Does nothing if one is already set.
pub fn init_tracing(level: Option<&str>) {
    let _ = tracing_subscriber::registry()
        .with(filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
