//! Multi-game bowling server speaking line-delimited JSON over TCP.

use std::sync::Arc;

use anyhow::Result;

use ancient_bowling::adapter::{run_server, GameRegistry, ServerConfig};
use ancient_bowling::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info");

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        max_line_bytes = config.max_line_bytes,
        "starting bowling server"
    );

    let registry = Arc::new(GameRegistry::new());
    run_server(config, registry, None).await
}
