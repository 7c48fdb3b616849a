//! Tracing subscriber setup.

use anuvad_settings::{LogFormat, LoggingSettings};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

/// Build the level filter: `RUST_LOG` when set, otherwise `default_directive`.
pub fn build_filter(default_directive: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .with_context(|| format!("invalid log filter '{default_directive}'"))
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init_tracing(settings: &LoggingSettings) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(build_filter(&settings.level)?);
    let installed = match settings.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
