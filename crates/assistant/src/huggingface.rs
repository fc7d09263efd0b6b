//! Hugging Face inference API client

use async_trait::async_trait;
use reqwest::{header::RETRY_AFTER, Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::error::{ModelError, ModelResult, DEFAULT_RETRY_AFTER_SECS};
use crate::model::{GenerationParameters, LanguageModel};

/// Mistral 7B Instruct on the hosted inference API
pub const DEFAULT_MODEL_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2";

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParameters,
}

/// Text-generation client for a single model endpoint
#[derive(Clone)]
pub struct HuggingFaceClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HuggingFaceClient {
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        Self::with_client(Client::new(), endpoint, api_key)
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(endpoint: &str, api_key: &str, timeout: Duration) -> ModelResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModelError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, endpoint, api_key))
    }

    fn with_client(client: Client, endpoint: &str, api_key: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

/// Leading digits of `Retry-After` in seconds, so `"12.5"` and `"12s"` read as 12
fn retry_after(headers: &reqwest::header::HeaderMap) -> u64 {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| {
            let v = v.trim_start();
            let end = v.find(|c: char| !c.is_ascii_digit()).unwrap_or(v.len());
            v[..end].parse().ok()
        })
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// First element's `generated_text`, if the body is a non-empty array and the
/// text is non-empty
fn generated_text(body: &Value) -> Option<&str> {
    body.as_array()?
        .first()?
        .get("generated_text")?
        .as_str()
        .filter(|text| !text.is_empty())
}

#[async_trait]
impl LanguageModel for HuggingFaceClient {
    async fn generate(
        &self,
        prompt: &str,
        parameters: &GenerationParameters,
    ) -> ModelResult<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&InferenceRequest {
                inputs: prompt,
                parameters,
            })
            .send()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::SERVICE_UNAVAILABLE {
            let retry_after = retry_after(response.headers());
            tracing::info!(retry_after, "Model is loading upstream");
            return Err(ModelError::Loading { retry_after });
        }

        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            let reason = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_string();
            tracing::error!(%status, %reason, "Hugging Face API error");
            return Err(ModelError::Upstream(reason));
        }

        generated_text(&body)
            .map(str::to_string)
            .ok_or(ModelError::InvalidResponse)
    }
}
