//! API handlers for `/api/chat`

use auth::{AuthClient, AuthHandle, AuthenticatedSession};
use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    Json,
};
use common::{ApiError, ApiResult};
use std::sync::Arc;

use crate::api::models::*;
use crate::model::{GenerationParameters, LanguageModel};
use crate::persona::{format_instruction, CARROQUEEN_PROMPT};

/// State shared by the chat handlers
#[derive(Clone)]
pub struct ChatState {
    pub auth: Arc<dyn AuthClient>,
    pub model: Arc<dyn LanguageModel>,
    pub parameters: GenerationParameters,
    pub system_prompt: String,
}

impl ChatState {
    /// State with the CarroQueen persona and default sampling parameters
    pub fn new(auth: Arc<dyn AuthClient>, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            auth,
            model,
            parameters: GenerationParameters::default(),
            system_prompt: CARROQUEEN_PROMPT.to_string(),
        }
    }

    pub fn with_parameters(mut self, parameters: GenerationParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }
}

impl FromRef<ChatState> for AuthHandle {
    fn from_ref(state: &ChatState) -> Self {
        AuthHandle::new(state.auth.clone())
    }
}

/// Ask CarroQueen for a soup prescription
pub async fn chat(
    AuthenticatedSession(session): AuthenticatedSession,
    State(state): State<ChatState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatResponse>> {
    let Json(req) = payload?;
    let message = req
        .message
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::validation("Message is required"))?;

    let system = req
        .system_prompt
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| state.system_prompt.clone());
    let prompt = format_instruction(&system, &message);

    tracing::debug!(user_id = %session.user.id, "Forwarding chat message to model");
    let reply = state.model.generate(&prompt, &state.parameters).await?;

    Ok(Json(ChatResponse {
        response: reply.trim().to_string(),
    }))
}

/// Acknowledge a chat reset; no history is kept server-side
pub async fn clear_chat(
    AuthenticatedSession(_): AuthenticatedSession,
) -> Json<ClearChatResponse> {
    Json(ClearChatResponse { success: true })
}
