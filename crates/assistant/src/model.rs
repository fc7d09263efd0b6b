//! Language model client - trait and mock implementation

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{ModelError, ModelResult};

/// Sampling parameters sent with every generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub repetition_penalty: f64,
    /// Whether the upstream echoes the prompt back
    pub return_full_text: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_new_tokens: 250,
            temperature: 0.7,
            top_p: 0.95,
            repetition_penalty: 1.1,
            return_full_text: false,
        }
    }
}

/// Client trait for a hosted text-generation model
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a completion for a fully formatted instruction prompt
    async fn generate(&self, prompt: &str, parameters: &GenerationParameters)
        -> ModelResult<String>;
}

// ==================== Mock Implementation ====================

/// Mock language model for testing
pub struct MockLanguageModel {
    reply: RwLock<ModelResult<String>>,
    calls: AtomicUsize,
    last_prompt: RwLock<Option<String>>,
}

impl MockLanguageModel {
    /// Create a mock that answers with a fixed line
    pub fn new() -> Self {
        Self {
            reply: RwLock::new(Ok("CarroQueen prescribes a hearty minestrone.".to_string())),
            calls: AtomicUsize::new(0),
            last_prompt: RwLock::new(None),
        }
    }

    /// Configure the generated text
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        *self.reply.write() = Ok(reply.into());
        self
    }

    /// Configure every call to fail
    pub fn with_error(self, error: ModelError) -> Self {
        *self.reply.write() = Err(error);
        self
    }

    /// Number of generate calls made
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The prompt of the most recent call
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.read().clone()
    }
}

impl Default for MockLanguageModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn generate(
        &self,
        prompt: &str,
        _parameters: &GenerationParameters,
    ) -> ModelResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.write() = Some(prompt.to_string());
        self.reply.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_parameters_wire_shape() {
        let value = serde_json::to_value(GenerationParameters::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "max_new_tokens": 250,
                "temperature": 0.7,
                "top_p": 0.95,
                "repetition_penalty": 1.1,
                "return_full_text": false
            })
        );
    }

    #[tokio::test]
    async fn test_mock_records_calls() {
        let model = MockLanguageModel::new().with_reply("Sip slowly.");

        let reply = model
            .generate("prompt", &GenerationParameters::default())
            .await
            .unwrap();

        assert_eq!(reply, "Sip slowly.");
        assert_eq!(model.call_count(), 1);
        assert_eq!(model.last_prompt().as_deref(), Some("prompt"));
    }
}
