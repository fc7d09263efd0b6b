//! Observability infrastructure for Souperb
//!
//! This crate provides:
//! - Structured logging via tracing
//! - Prometheus metrics and HTTP request instrumentation
//!
//! # Quick Start
//!
//! ```ignore
//! use observability::{init_logging, LogFormat};
//!
//! init_logging("souperb", LogFormat::Pretty)?;
//!
//! // Optional
//! observability::metrics::init_metrics(9090)?;
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LogFormat};
pub use metrics::{init_metrics, record_http_request, RequestTimer};
