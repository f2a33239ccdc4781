//! Signal handling for graceful shutdown.
//!
//! SIGINT (Ctrl+C) and SIGTERM cancel a [`CancellationToken`]. The server
//! shares that token with the upstream client, so transports stop accepting
//! work and pending retry backoffs abort.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Cancel `token` when the process receives SIGINT or SIGTERM.
pub fn cancel_on_shutdown(token: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            _ = wait_for_shutdown_signal() => token.cancel(),
            _ = token.cancelled() => {}
        }
    });
}

/// Wait for either SIGINT or SIGTERM.
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
