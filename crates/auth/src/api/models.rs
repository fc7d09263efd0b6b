//! API models for the password reset endpoints

use serde::{Deserialize, Serialize};

/// Minimum password length accepted by the reset route
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Path of the page the reset email links back to
pub const RESET_PASSWORD_PATH: &str = "/reset-password";

/// Request body for `POST /api/auth/forgot-password`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: Option<String>,
}

/// Request body for `POST /api/auth/reset-password`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Plain `{"message": ...}` body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
