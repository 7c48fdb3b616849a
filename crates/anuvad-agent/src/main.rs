//! `anuvad` server binary.

use anuvad_agent::cli::Cli;
use anuvad_agent::logging::init_tracing;
use anuvad_agent::wiring::build_translator;
use anuvad_server::{ServerConfig, metrics, start};
use anyhow::Context;
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = cli.resolve_settings()?;
    init_tracing(&settings.logging)?;

    info!(version = env!("CARGO_PKG_VERSION"), "starting anuvad");

    let metrics_handle = if cli.no_metrics {
        None
    } else {
        Some(metrics::install_recorder().context("failed to install metrics recorder")?)
    };

    let translator =
        build_translator(&settings.translator).context("failed to build translator")?;

    let server = start(ServerConfig::from(&settings.server), translator, metrics_handle)
        .await
        .context("failed to start server")?;
    info!(addr = %server.local_addr(), "anuvad ready");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl+c")?;

    info!("shutting down");
    server.shutdown().await.context("server shutdown failed")?;
    Ok(())
}
