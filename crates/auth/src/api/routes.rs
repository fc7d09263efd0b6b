//! API routes for the password reset flow

use axum::{routing::post, Router};

use crate::api::handlers::*;

/// Create the password reset router
pub fn create_router(state: AccountState) -> Router {
    Router::new()
        .route("/api/auth/forgot-password", post(forgot_password))
        .route("/api/auth/reset-password", post(reset_password))
        .with_state(state)
}
