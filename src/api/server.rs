//! HTTP server lifecycle.
//!
//! Pattern: bind → spawn background task → return handle with shutdown
//! channel. `serve` wires that handle to ctrl-c for the binary; tests
//! start on an ephemeral port and shut down explicitly.

use std::net::SocketAddr;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::app_router;
use crate::api::types::ApiContext;

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("failed to read bound address: {0}")]
    LocalAddr(#[source] std::io::Error),
}

/// Handle to a running API server.
pub struct ApiServer {
    pub local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ApiServer {
    /// Bind `addr` and serve the full router in a background task.
    pub async fn start(addr: SocketAddr, ctx: ApiContext) -> Result<Self, ServeError> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| ServeError::Bind { addr, source })?;
        let local_addr = listener.local_addr().map_err(ServeError::LocalAddr)?;

        let app = app_router(ctx);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let shutdown_signal = async move {
                let _ = shutdown_rx.await;
                tracing::info!("API server received shutdown signal");
            };

            tracing::info!(%local_addr, "API server started");

            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal)
                .await
            {
                tracing::error!("API server error: {e}");
            }

            tracing::info!("API server stopped");
        });

        Ok(Self {
            local_addr,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Signal the server to shut down gracefully.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Wait for the background task to finish.
    pub async fn wait(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

/// Bind `addr` and serve until ctrl-c.
pub async fn serve(addr: SocketAddr, ctx: ApiContext) -> Result<(), ServeError> {
    let mut server = ApiServer::start(addr, ctx).await?;

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }

    server.shutdown();
    server.wait().await;
    Ok(())
}
