//! API models for `/api/chat`

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/chat`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    /// Replaces the configured persona for this request
    #[serde(default, rename = "systemPrompt")]
    pub system_prompt: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearChatResponse {
    pub success: bool,
}
