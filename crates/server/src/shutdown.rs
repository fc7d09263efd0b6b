//! Ctrl+C driven shutdown

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Cancels its token when the process receives Ctrl+C (SIGINT)
#[derive(Clone)]
pub struct ShutdownController {
    token: CancellationToken,
}

impl ShutdownController {
    /// Spawn the signal listener; must be called inside a tokio runtime
    pub fn with_ctrl_c() -> Self {
        let token = CancellationToken::new();
        let signal_token = token.clone();

        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, shutting down gracefully");
                    signal_token.cancel();
                }
                Err(e) => warn!(%e, "Failed to listen for Ctrl+C"),
            }
        });

        Self { token }
    }

    /// Token handed to the server's `run`
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}
