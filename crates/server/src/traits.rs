//! Server lifecycle traits
//!
//! [`Server`] is the lifecycle every server exposes; [`ServerExt`] adds
//! spawning and Ctrl+C handling on top of it.

use async_trait::async_trait;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;

use crate::error::Result;

/// Core server trait that all server implementations must implement.
///
/// Implemented by [`HttpServer`](crate::http::HttpServer); tests implement
/// it with a stub that just waits for cancellation.
#[async_trait]
pub trait Server: Send + Sync + 'static {
    /// Returns the server's name for logging and identification.
    ///
    fn name(&self) -> &str;

    /// Returns the address the server is bound to, if running.
    ///
    /// Returns `None` if the server is not currently running or has not
    /// yet bound to an address.
    fn address(&self) -> Option<SocketAddr>;

    /// Returns true if the server is currently running.
    fn is_running(&self) -> bool;

    /// Runs the server until the shutdown token is cancelled.
    ///
    /// In-flight requests are drained before returning `Ok(())`. Binding
    /// failures are returned immediately.
    async fn run(&self, shutdown: CancellationToken) -> Result<()>;
}

/// Extension trait providing convenience methods for servers.
///
/// This trait is automatically implemented for all types that implement [`Server`].
/// It provides common patterns for spawning and running servers.
pub trait ServerExt: Server + Sized {
    /// Spawns the server on a new task and returns a handle and shutdown token.
    ///
    fn spawn(self) -> (tokio::task::JoinHandle<Result<()>>, CancellationToken) {
        let token = CancellationToken::new();
        let token_clone = token.clone();
        let handle = tokio::spawn(async move { self.run(token_clone).await });
        (handle, token)
    }

    /// Runs the server with automatic Ctrl+C handling.
    ///
    /// Ctrl+C (SIGINT) triggers graceful shutdown.
    fn run_with_ctrl_c(self) -> impl std::future::Future<Output = Result<()>> + Send {
        async move {
            let shutdown = crate::shutdown::ShutdownController::with_ctrl_c();
            self.run(shutdown.token()).await
        }
    }
}

// Blanket implementation for all Server types
impl<T: Server + Sized> ServerExt for T {}
