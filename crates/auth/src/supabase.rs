//! GoTrue (Supabase auth) HTTP client

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::client::AuthClient;
use crate::error::{AuthError, AuthResult};
use crate::types::{AuthUser, Session};

/// Error body shapes GoTrue uses across versions
#[derive(Debug, Default, Deserialize)]
struct GoTrueErrorBody {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl GoTrueErrorBody {
    fn into_message(self) -> Option<String> {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .or(self.error)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    user: AuthUser,
}

/// Auth client talking to `{base_url}/auth/v1`
#[derive(Clone)]
pub struct SupabaseAuthClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseAuthClient {
    /// Create a new client with the project's public (anon) key
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: &str, api_key: &str, timeout: Duration) -> AuthResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    fn with_client(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> AuthResult<Response> {
        let response = request
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<GoTrueErrorBody>()
            .await
            .unwrap_or_default()
            .into_message()
            .unwrap_or_else(|| format!("auth service responded with {status}"));

        if status.is_server_error() {
            Err(AuthError::Unavailable(message))
        } else {
            Err(AuthError::Rejected(message))
        }
    }

    async fn fetch_user(&self, access_token: &str) -> AuthResult<AuthUser> {
        let request = self.client.get(self.url("user")).bearer_auth(access_token);
        self.send(request)
            .await?
            .json::<AuthUser>()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))
    }

    async fn refresh(&self, refresh_token: &str) -> AuthResult<Session> {
        let request = self
            .client
            .post(self.url("token"))
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": refresh_token }));

        let token = self
            .send(request)
            .await?
            .json::<TokenResponse>()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        Ok(Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            user: token.user,
        })
    }
}

#[async_trait]
impl AuthClient for SupabaseAuthClient {
    async fn set_session(&self, access_token: &str, refresh_token: &str) -> AuthResult<Session> {
        match self.fetch_user(access_token).await {
            Ok(user) => Ok(Session {
                access_token: access_token.to_string(),
                refresh_token: refresh_token.to_string(),
                user,
            }),
            Err(AuthError::Rejected(reason)) => {
                tracing::debug!(%reason, "Access token rejected, refreshing session");
                self.refresh(refresh_token)
                    .await
                    .map_err(|e| match e {
                        AuthError::Rejected(msg) => AuthError::InvalidSession(msg),
                        other => other,
                    })
            }
            Err(e) => Err(e),
        }
    }

    async fn reset_password_for_email(&self, email: &str, redirect_to: &str) -> AuthResult<()> {
        let request = self
            .client
            .post(self.url("recover"))
            .query(&[("redirect_to", redirect_to)])
            .json(&json!({ "email": email }));

        self.send(request).await.map(|_| ())
    }

    async fn update_password(&self, access_token: &str, password: &str) -> AuthResult<()> {
        let request = self
            .client
            .put(self.url("user"))
            .bearer_auth(access_token)
            .json(&json!({ "password": password }));

        self.send(request).await.map(|_| ())
    }
}
