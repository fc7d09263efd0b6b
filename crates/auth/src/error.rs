//! Auth error types

use thiserror::Error;

/// Errors that can occur when talking to the auth service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Tokens are missing, expired, or revoked
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// The auth service refused the request
    #[error("Auth request rejected: {0}")]
    Rejected(String),

    /// The auth service could not be reached
    #[error("Auth service unavailable: {0}")]
    Unavailable(String),
}

/// Result type for auth operations
pub type AuthResult<T> = std::result::Result<T, AuthError>;
