//! Server loop and router assembly.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use blitz_auth::{DecisionEngine, ReloadableStore};
use blitz_config::Config;

use crate::error::GatewayError;
use crate::handler::handle_auth;
use crate::state::AppState;

/// Run the gateway with a cancellation token for graceful shutdown.
///
/// Binds the configured listen address, then serves until `shutdown` fires.
pub async fn run_with_shutdown(
    config: Config,
    store: Arc<ReloadableStore>,
    shutdown: CancellationToken,
) -> Result<(), GatewayError> {
    let listen: SocketAddr = config
        .server
        .listen
        .parse()
        .map_err(|_| GatewayError::Config("invalid listen address".into()))?;

    let listener = TcpListener::bind(listen).await?;
    serve(listener, config, store, shutdown).await
}

/// Serve on an already-bound listener.
///
/// Split out from [`run_with_shutdown`] so tests can bind an ephemeral port
/// and learn the address before the server starts.
pub async fn serve(
    listener: TcpListener,
    config: Config,
    store: Arc<ReloadableStore>,
    shutdown: CancellationToken,
) -> Result<(), GatewayError> {
    let engine = DecisionEngine::new(store)
        .mismatch_delay(Duration::from_secs(config.auth.mismatch_delay_secs))
        .lookup_timeout(Duration::from_secs(config.auth.lookup_timeout_secs));

    let state = AppState {
        engine: Arc::new(engine),
    };

    let app = Router::new()
        .route(&config.server.auth_path, post(handle_auth))
        .with_state(state);

    info!(
        address = %listener.local_addr()?,
        path = %config.server.auth_path,
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            info!("shutdown signal received, draining connections");
        })
        .await?;

    Ok(())
}
