use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use staticd::config::Config;
use staticd::server::{RequestDispatcher, listener};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::load().context("failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.server.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .init();

    let server_config = cfg
        .server_config()
        .context("invalid static file configuration")?;
    let dispatcher = Arc::new(RequestDispatcher::new(server_config));

    tokio::select! {
        res = listener::run(&cfg.server.listen_addr, dispatcher) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
