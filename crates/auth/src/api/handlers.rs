//! API handlers for the password reset endpoints

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use common::{ApiError, ApiResult};
use std::sync::Arc;

use crate::api::models::*;
use crate::client::AuthClient;

/// State shared by the password reset handlers
#[derive(Clone)]
pub struct AccountState {
    pub auth: Arc<dyn AuthClient>,
    /// Public site origin, used to build the reset link
    pub site_url: String,
}

impl AccountState {
    pub fn new(auth: Arc<dyn AuthClient>, site_url: impl Into<String>) -> Self {
        Self {
            auth,
            site_url: site_url.into(),
        }
    }

    fn reset_redirect(&self) -> String {
        format!(
            "{}{}",
            self.site_url.trim_end_matches('/'),
            RESET_PASSWORD_PATH
        )
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Request a password reset email
///
/// Answers identically whether or not the account exists.
pub async fn forgot_password(
    State(state): State<AccountState>,
    payload: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(req) = payload?;
    let email = non_empty(req.email).ok_or_else(|| ApiError::validation("Email is required"))?;

    state
        .auth
        .reset_password_for_email(&email, &state.reset_redirect())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Password reset email failed");
            ApiError::internal("Failed to send password reset email. Please try again.")
        })?;

    Ok(Json(MessageResponse::new(
        "If an account exists with this email, you will receive a password reset link.",
    )))
}

/// Set a new password using the recovery token from the reset email
pub async fn reset_password(
    State(state): State<AccountState>,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(req) = payload?;

    let (Some(password), Some(access_token)) =
        (non_empty(req.password), non_empty(req.access_token))
    else {
        return Err(ApiError::validation(
            "Password and access token are required",
        ));
    };

    // Length in UTF-16 code units, as the browser form measures it
    if password.encode_utf16().count() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::validation(
            "Password must be at least 6 characters long",
        ));
    }

    state
        .auth
        .update_password(&access_token, &password)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Password update refused");
            ApiError::validation("Failed to reset password. The link may have expired.")
        })?;

    tracing::info!("Password reset completed");
    Ok(Json(MessageResponse::new("Password reset successful")))
}
