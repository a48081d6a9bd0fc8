//! Server lifecycle: bind, serve in a background task, shut down on signal.
//!
//! bind → spawn background task → return handle with shutdown channel.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::care_records_router;
use crate::config::{Config, ConfigError};
use crate::core_state::{CoreError, CoreState};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Record store unavailable: {0}")]
    Core(#[from] CoreError),

    #[error("Network error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle to a running server.
pub struct RunningServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl RunningServer {
    /// Ask the server to stop accepting connections and drain in-flight ones.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Server shutdown signal sent");
        }
    }

    /// Wait for the serve task to finish.
    pub async fn stopped(self) {
        if let Err(e) = self.task.await {
            tracing::error!("Server task ended abnormally: {e}");
        }
    }
}

/// Bind `addr` and serve the full router from a background task.
///
/// Port 0 picks an ephemeral port; the bound address is on the handle.
pub async fn start_server_on(
    core: Arc<CoreState>,
    public_dir: Option<PathBuf>,
    addr: SocketAddr,
) -> Result<RunningServer, ServerError> {
    let listener = TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;

    let app = care_records_router(core, public_dir);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Server received shutdown signal");
        };

        tracing::info!(%addr, "Server listening");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
        {
            tracing::error!("Server error: {e}");
        }

        tracing::info!("Server stopped");
    });

    Ok(RunningServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

/// Open the record store, serve on every interface at the configured port,
/// and return once Ctrl+C or SIGTERM has drained the server.
pub async fn run_until_shutdown(config: &Config) -> Result<(), ServerError> {
    let core = Arc::new(CoreState::open(&config.database)?);
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));

    let mut server = start_server_on(core, config.public_dir.clone(), addr).await?;

    shutdown_signal().await;
    server.shutdown();
    server.stopped().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
