//! API routes for chat

use axum::{routing::post, Router};

use crate::api::handlers::*;

/// Create the chat router
pub fn create_router(state: ChatState) -> Router {
    Router::new()
        .route("/api/chat", post(chat).delete(clear_chat))
        .with_state(state)
}
