//! OS signal handling.

use crate::lifecycle::Shutdown;

/// Trigger shutdown when Ctrl+C is received.
pub fn spawn_signal_listener(shutdown: Shutdown) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::error!("Failed to install Ctrl+C handler");
            return;
        }
        tracing::info!("Shutdown signal received");
        shutdown.trigger();
    });
}
