//! Gateway error types

use common::ApiError;
use storage::StoreError;
use thiserror::Error;

/// Errors produced by the Resource Gateway
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Unknown column '{column}' for table {table}")]
    UnknownColumn { table: String, column: String },

    /// Request input the gateway refuses before touching the store
    #[error("{0}")]
    Invalid(String),

    #[error("Refusing unscoped {operation} on {table}: a filter is required")]
    UnscopedWrite {
        operation: &'static str,
        table: String,
    },

    /// The store refused a write
    #[error("{0}")]
    Rejected(String),

    /// Lookup, transport, or decoding failure
    #[error("{0}")]
    Store(String),
}

/// Result type for gateway operations
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

impl GatewayError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    /// Map a store error from a write: refusals are the caller's fault
    pub fn from_write(err: StoreError) -> Self {
        if err.is_rejection() {
            Self::Rejected(err.to_string())
        } else {
            Self::Store(err.to_string())
        }
    }
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        Self::Store(err.to_string())
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Store(msg) => ApiError::Internal(msg),
            other => ApiError::Validation(other.to_string()),
        }
    }
}
