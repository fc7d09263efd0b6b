//! HTTP server lifecycle for Souperb
//!
//! [`HttpServer`] runs an assembled axum router under the [`Server`] trait,
//! stopping gracefully when its `CancellationToken` is cancelled. The crate
//! also carries the `/health` route and the request-metrics middleware every
//! router is wrapped in.

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod middleware;
pub mod shutdown;
pub mod traits;

pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use health::{health_handler, health_router, HealthStatus};
pub use http::HttpServer;
pub use middleware::track_metrics;
pub use shutdown::ShutdownController;
pub use traits::{Server, ServerExt};
