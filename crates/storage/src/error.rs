//! Storage error types

use thiserror::Error;

/// PostgREST code returned when a single-row request matched zero (or more
/// than one) rows
pub const NO_ROWS_CODE: &str = "PGRST116";

/// Errors that can occur during storage operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store evaluated the request and refused it
    #[error("{message}")]
    Rejected {
        code: Option<String>,
        message: String,
    },

    /// The store could not be reached or failed on its side
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with something we could not decode
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Result type for storage operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Create a rejection with an optional store error code
    pub fn rejected(code: Option<&str>, message: impl Into<String>) -> Self {
        Self::Rejected {
            code: code.map(str::to_string),
            message: message.into(),
        }
    }

    /// The sentinel for "no single row matched"
    pub fn no_rows(matched: usize) -> Self {
        Self::rejected(
            Some(NO_ROWS_CODE),
            format!("JSON object requested, multiple (or no) rows returned ({matched} rows)"),
        )
    }

    /// True when this is the "no single row matched" sentinel
    pub fn is_no_rows(&self) -> bool {
        matches!(self, Self::Rejected { code: Some(code), .. } if code == NO_ROWS_CODE)
    }

    /// True when the store evaluated and refused the request, as opposed to
    /// transport or decoding failures
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// The store error code, if any
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Rejected { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
