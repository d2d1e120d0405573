//! Pomodoro - the world's most minimalist pomodoro timer
//!
//! This is the main entry point for the pomodoro server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro::{
    config::Config,
    state::AppState,
    api::create_router,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, session={}min, break={}min",
          config.host, config.port, config.session_length, config.break_length);

    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.session_length,
        config.break_length,
    ));

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /           - Timer page");
    info!("  POST /start-stop - Start or pause the countdown");
    info!("  POST /skip       - Switch between session and break");
    info!("  POST /reset      - Pause and rewind the current phase");
    info!("  GET  /status     - Current timer and server status");
    info!("  GET  /events     - Live timer updates (server-sent events)");
    info!("  GET  /health     - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Release the ticker before the state goes away
    if let Err(e) = state.shutdown() {
        tracing::error!("Failed to stop timer: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
