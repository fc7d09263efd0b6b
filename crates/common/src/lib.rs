//! Common types and utilities for Souperb
//!
//! This crate provides the pieces every HTTP-facing crate shares: the
//! API error type that renders as `{"error": ...}` and the `{"data": ...}`
//! success envelope.
//!
//! # Modules
//!
//! - [`error`] - API error type and its HTTP rendering
//! - [`response`] - Success envelopes

pub mod error;
pub mod response;

pub use error::{ApiError, ApiResult};
pub use response::DataResponse;
