//! Server command handler.

use kahovitz::{AppState, KahovitzConfig, KahovitzResult, serve};

/// Handle the `serve` command
pub async fn run_server(
    mut config: KahovitzConfig,
    host: Option<String>,
    port: Option<u16>,
) -> KahovitzResult<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::from_env(config);

    tracing::info!(%addr, "Kahovitz server starting. Press Ctrl+C to stop.");
    serve(state, &addr).await
}
