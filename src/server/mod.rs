//! Local dashboard server — serves the embedded page and the JSON API on
//! the loopback interface.
//!
//! Pattern: bind → spawn background task → return handle with shutdown
//! channel.

pub mod error;
pub mod handlers;
pub mod page;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::sync::oneshot;
use tower_http::cors::CorsLayer;

use crate::analysis::{Analyzer, RunOptions};
use crate::intake::MAX_UPLOAD_BYTES;
use crate::session::SessionState;

/// Multipart bodies are slightly larger than the file they carry.
const BODY_LIMIT_SLACK: u64 = 5 * 1024 * 1024;

/// Shared application state behind every handler.
pub struct AppState {
    pub session: Arc<SessionState>,
    pub analyzer: Arc<Analyzer>,
    pub options: RunOptions,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self::with_options(analyzer, RunOptions::default())
    }

    pub fn with_options(analyzer: Analyzer, options: RunOptions) -> Self {
        Self {
            session: Arc::new(SessionState::new()),
            analyzer: Arc::new(analyzer),
            options,
        }
    }
}

/// Build the dashboard router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/api/health", get(handlers::health))
        .route("/api/files", post(handlers::upload_file))
        .route("/api/session", get(handlers::session_view))
        .route("/api/session/analyze", post(handlers::start_analysis))
        .layer(DefaultBodyLimit::max((MAX_UPLOAD_BYTES + BODY_LIMIT_SLACK) as usize))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Handle to the running dashboard server.
pub struct ServerHandle {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ServerHandle {
    /// Shut down the server gracefully.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Dashboard server shutdown signal sent");
        }
    }
}

/// Bind the dashboard server and spawn it in a background task.
///
/// Port 0 selects an ephemeral port (used by tests).
pub async fn start_server(
    state: Arc<AppState>,
    ip: IpAddr,
    port: u16,
) -> Result<ServerHandle, String> {
    let listener = tokio::net::TcpListener::bind(SocketAddr::new(ip, port))
        .await
        .map_err(|e| format!("Failed to bind dashboard server: {e}"))?;

    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    let app = router(state);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Dashboard server received shutdown signal");
        };

        tracing::info!(%addr, "Dashboard server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Dashboard server error: {e}");
        }

        tracing::info!("Dashboard server stopped");
    });

    Ok(ServerHandle {
        addr,
        shutdown_tx: Some(shutdown_tx),
    })
}
