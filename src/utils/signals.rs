//! Signal handling for graceful shutdown

use std::{future::Future, io};
use futures::stream::StreamExt;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use tracing::{info, warn};

/// Wait for SIGTERM or SIGINT. Falls back to tokio's ctrl-c listener if
/// the signal handlers cannot be registered.
pub async fn shutdown_signal() {
    let mut signals = match Signals::new([SIGTERM, SIGINT]) {
        Ok(signals) => signals,
        Err(e) => {
            warn!("Failed to register signal handlers: {}, listening for ctrl-c only", e);
            wait_for_ctrl_c(tokio::signal::ctrl_c()).await;
            return;
        }
    };

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
    signals.handle().close();
}

/// Resolve once the ctrl-c listener fires. Never resolves if the listener
/// fails, so the server keeps running instead of shutting down at once.
async fn wait_for_ctrl_c<F>(listener: F)
where
    F: Future<Output = io::Result<()>>,
{
    match listener.await {
        Ok(()) => info!("Received ctrl-c"),
        Err(e) => {
            warn!("Failed to listen for ctrl-c: {}, running until killed", e);
            std::future::pending::<()>().await;
        }
    }
}
