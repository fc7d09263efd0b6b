//! Wiring of collaborators and routers into one application

use anyhow::Result;
use assistant::{api::ChatState, GenerationParameters, HuggingFaceClient, LanguageModel};
use auth::{api::AccountState, AuthClient, SupabaseAuthClient};
use axum::{middleware::from_fn, Router};
use config::SouperbConfig;
use gateway::ResourceGateway;
use server::{health_router, track_metrics};
use std::sync::Arc;
use std::time::Duration;
use storage::{PostgrestStore, TableStore};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

/// External collaborators, built once at startup
pub struct Components {
    pub store: Arc<dyn TableStore>,
    pub auth: Arc<dyn AuthClient>,
    pub model: Arc<dyn LanguageModel>,
}

impl Components {
    /// Build the HTTP clients for the hosted store, its auth service, and
    /// the model endpoint
    pub fn from_config(config: &SouperbConfig) -> Result<Self> {
        let store_url = &config.store.url;
        let anon_key = &config.store.anon_key;

        let (store, auth): (Arc<dyn TableStore>, Arc<dyn AuthClient>) =
            match config.store.timeout_seconds.map(Duration::from_secs) {
                Some(timeout) => (
                    Arc::new(PostgrestStore::with_timeout(store_url, anon_key, timeout)?),
                    Arc::new(SupabaseAuthClient::with_timeout(store_url, anon_key, timeout)?),
                ),
                None => (
                    Arc::new(PostgrestStore::new(store_url, anon_key)),
                    Arc::new(SupabaseAuthClient::new(store_url, anon_key)),
                ),
            };

        let model: Arc<dyn LanguageModel> =
            match config.model.timeout_seconds.map(Duration::from_secs) {
                Some(timeout) => Arc::new(HuggingFaceClient::with_timeout(
                    &config.model.endpoint,
                    &config.model.api_key,
                    timeout,
                )?),
                None => Arc::new(HuggingFaceClient::new(
                    &config.model.endpoint,
                    &config.model.api_key,
                )),
            };

        Ok(Self { store, auth, model })
    }
}

fn generation_parameters(config: &SouperbConfig) -> GenerationParameters {
    GenerationParameters {
        max_new_tokens: config.model.max_new_tokens,
        temperature: config.model.temperature,
        top_p: config.model.top_p,
        repetition_penalty: config.model.repetition_penalty,
        ..GenerationParameters::default()
    }
}

/// Assemble every route behind request metrics, tracing, and request ids
pub fn build_router(config: &SouperbConfig, components: Components) -> Router {
    let gateway = ResourceGateway::new(components.store)
        .with_unscoped_writes(config.gateway.allow_unscoped_writes);

    let account = AccountState::new(components.auth.clone(), config.site.url.clone());

    let mut chat = ChatState::new(components.auth, components.model)
        .with_parameters(generation_parameters(config));
    if let Some(prompt) = &config.model.system_prompt {
        chat = chat.with_system_prompt(prompt.clone());
    }

    health_router()
        .merge(gateway::api::create_router(gateway))
        .merge(auth::api::create_router(account))
        .merge(assistant::api::create_router(chat))
        .route_layer(from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
