//! Listener lifecycle.

use crate::{AppState, router};
use kahovitz_error::{KahovitzResult, ServerError, ServerErrorKind};
use std::time::Duration;
use tracing::{info, instrument};

/// Bind `addr` and serve until the process is stopped.
///
/// Also starts the session sweep for the state's store.
///
/// # Errors
///
/// Returns error if the address cannot be bound or the server fails.
#[instrument(skip(state))]
pub async fn serve(state: AppState, addr: &str) -> KahovitzResult<()> {
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind {
            addr: addr.to_string(),
            reason: e.to_string(),
        })
    })?;
    info!(%addr, "Kahovitz listening");

    let sweep_every = Duration::from_secs(state.config().sessions.sweep_interval_secs.max(1));
    let sweeper = state.sessions().spawn_sweeper(sweep_every);

    let result = axum::serve(listener, router(state))
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())).into());
    sweeper.abort();
    result
}
