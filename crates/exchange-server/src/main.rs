//! TCP exchange server binary.
//!
//! Logs go to stderr (`RUST_LOG`, default `info`); notifications are
//! written to stdout, one line each.

use std::sync::Arc;

use exchange_server::config::Config;
use exchange_server::{server, StdoutSink};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        max_clients = config.max_clients,
        queue_capacity = config.queue_capacity,
        "starting exchange-server"
    );

    let stop = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    server::run(config, Arc::new(StdoutSink::new()), stop).await
}
