//! Language model error types

use common::ApiError;
use thiserror::Error;

/// Seconds to wait when the upstream gives no usable `Retry-After`
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 30;

/// Errors from the hosted language model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The model is still being loaded upstream
    #[error("Model is loading, please try again in a few seconds")]
    Loading { retry_after: u64 },

    /// Non-success response from the inference API
    #[error("Hugging Face API error: {0}")]
    Upstream(String),

    /// Success response without usable generated text
    #[error("Invalid response format from Hugging Face API")]
    InvalidResponse,

    /// The inference API could not be reached
    #[error("Failed to reach model: {0}")]
    Transport(String),
}

/// Result type for model operations
pub type ModelResult<T> = std::result::Result<T, ModelError>;

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        let message = err.to_string();
        match err {
            ModelError::Loading { retry_after } => ApiError::unavailable(message, retry_after),
            _ => ApiError::internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_mapping() {
        let api: ApiError = ModelError::Loading { retry_after: 20 }.into();
        assert_eq!(
            api,
            ApiError::unavailable("Model is loading, please try again in a few seconds", 20)
        );

        let api: ApiError = ModelError::Upstream("Unknown error".into()).into();
        assert_eq!(api, ApiError::internal("Hugging Face API error: Unknown error"));

        let api: ApiError = ModelError::InvalidResponse.into();
        assert_eq!(
            api,
            ApiError::internal("Invalid response format from Hugging Face API")
        );
    }
}
