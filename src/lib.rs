pub mod analysis;
pub mod config;
pub mod intake;
pub mod report;
pub mod server;
pub mod session;

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::analysis::{Analyzer, HeuristicAnalyzer, RemoteClient, RunOptions};
use crate::server::AppState;

/// Initialize tracing from RUST_LOG, falling back to the app default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Start the dashboard and run until interrupted.
pub async fn run() -> Result<(), String> {
    init_tracing();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let app_config = config::AppConfig::from_env();
    let analyzer = if app_config.offline {
        tracing::info!("Offline mode — using the built-in heuristic analyzer");
        Analyzer::Heuristic(HeuristicAnalyzer::new())
    } else {
        tracing::info!(backend = %app_config.backend_url, "Using remote analysis backend");
        Analyzer::Remote(
            RemoteClient::from_config(&app_config).map_err(|e| e.to_string())?,
        )
    };

    let state = Arc::new(AppState::with_options(
        analyzer,
        RunOptions {
            timeout: config::ANALYZE_TIMEOUT,
            settle_delay: Duration::from_secs(1),
        },
    ));

    let mut handle = server::start_server(
        state,
        IpAddr::V4(Ipv4Addr::LOCALHOST),
        app_config.port,
    )
    .await?;

    tracing::info!("Dashboard ready at http://{}/", handle.addr);

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Failed to listen for shutdown signal: {e}"))?;

    tracing::info!("Shutting down");
    handle.shutdown();
    Ok(())
}
