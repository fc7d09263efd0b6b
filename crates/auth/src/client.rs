//! Auth client - trait and implementations

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::error::{AuthError, AuthResult};
use crate::types::{AuthUser, Session};

/// Client trait for the hosted auth service - protocol agnostic
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Materialize a session from the cookie tokens
    ///
    /// The access token is validated first; if the service rejects it, the
    /// refresh token is exchanged for a new session.
    async fn set_session(&self, access_token: &str, refresh_token: &str) -> AuthResult<Session>;

    /// Ask the service to email a password reset link
    ///
    /// The service answers the same way whether or not the account exists.
    async fn reset_password_for_email(&self, email: &str, redirect_to: &str) -> AuthResult<()>;

    /// Set a new password for the user the (recovery) access token belongs to
    async fn update_password(&self, access_token: &str, password: &str) -> AuthResult<()>;
}

// ==================== In-Memory Implementation ====================

#[derive(Debug, Clone)]
struct StoredSession {
    refresh_token: String,
    user: AuthUser,
}

/// In-memory auth client for tests and local runs
pub struct InMemoryAuthClient {
    sessions: RwLock<HashMap<String, StoredSession>>,
    recovery_tokens: RwLock<HashMap<String, AuthUser>>,
    reset_requests: RwLock<Vec<(String, String)>>,
    password_updates: RwLock<Vec<(String, String)>>,
    failure: RwLock<Option<AuthError>>,
}

impl InMemoryAuthClient {
    /// Create a client with no sessions
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            recovery_tokens: RwLock::new(HashMap::new()),
            reset_requests: RwLock::new(Vec::new()),
            password_updates: RwLock::new(Vec::new()),
            failure: RwLock::new(None),
        }
    }

    /// Register a valid session
    pub fn with_session(self, access_token: &str, refresh_token: &str, user_id: &str) -> Self {
        self.sessions.write().insert(
            access_token.to_string(),
            StoredSession {
                refresh_token: refresh_token.to_string(),
                user: AuthUser {
                    id: user_id.to_string(),
                    email: None,
                },
            },
        );
        self
    }

    /// Register a recovery token as issued by a reset email
    pub fn with_recovery_token(self, token: &str, user_id: &str) -> Self {
        self.recovery_tokens.write().insert(
            token.to_string(),
            AuthUser {
                id: user_id.to_string(),
                email: None,
            },
        );
        self
    }

    /// Make every subsequent call fail with `error`
    pub fn with_failure(self, error: AuthError) -> Self {
        *self.failure.write() = Some(error);
        self
    }

    /// Reset emails requested so far, as `(email, redirect_to)`
    pub fn reset_requests(&self) -> Vec<(String, String)> {
        self.reset_requests.read().clone()
    }

    /// Password updates applied so far, as `(user_id, password)`
    pub fn password_updates(&self) -> Vec<(String, String)> {
        self.password_updates.read().clone()
    }

    fn check_failure(&self) -> AuthResult<()> {
        match self.failure.read().as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryAuthClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthClient for InMemoryAuthClient {
    async fn set_session(&self, access_token: &str, refresh_token: &str) -> AuthResult<Session> {
        self.check_failure()?;

        let sessions = self.sessions.read();
        if let Some(stored) = sessions.get(access_token) {
            return Ok(Session {
                access_token: access_token.to_string(),
                refresh_token: stored.refresh_token.clone(),
                user: stored.user.clone(),
            });
        }

        // Access token unknown: fall back to the refresh token.
        sessions
            .iter()
            .find(|(_, stored)| stored.refresh_token == refresh_token)
            .map(|(access, stored)| Session {
                access_token: access.clone(),
                refresh_token: stored.refresh_token.clone(),
                user: stored.user.clone(),
            })
            .ok_or_else(|| AuthError::InvalidSession("unknown tokens".to_string()))
    }

    async fn reset_password_for_email(&self, email: &str, redirect_to: &str) -> AuthResult<()> {
        self.check_failure()?;

        self.reset_requests
            .write()
            .push((email.to_string(), redirect_to.to_string()));
        Ok(())
    }

    async fn update_password(&self, access_token: &str, password: &str) -> AuthResult<()> {
        self.check_failure()?;

        let user = self
            .recovery_tokens
            .read()
            .get(access_token)
            .cloned()
            .or_else(|| {
                self.sessions
                    .read()
                    .get(access_token)
                    .map(|s| s.user.clone())
            })
            .ok_or_else(|| AuthError::Rejected("invalid or expired token".to_string()))?;

        self.password_updates
            .write()
            .push((user.id, password.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn test_set_session_by_access_or_refresh() {
        let client = InMemoryAuthClient::new().with_session("acc", "ref", "user-1");

        let session = client.set_session("acc", "whatever").await.unwrap();
        assert_eq!(session.user.id, "user-1");

        let refreshed = client.set_session("expired", "ref").await.unwrap();
        assert_eq!(refreshed.access_token, "acc");

        let err = client.set_session("nope", "nope").await.unwrap_err();
        assert_matches!(err, AuthError::InvalidSession(_));
    }

    #[tokio::test]
    async fn test_reset_requests_are_recorded_for_any_email() {
        let client = InMemoryAuthClient::new();

        client
            .reset_password_for_email("ghost@example.com", "https://souperb.test/reset-password")
            .await
            .unwrap();

        assert_eq!(
            client.reset_requests(),
            vec![(
                "ghost@example.com".to_string(),
                "https://souperb.test/reset-password".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_update_password_requires_known_token() {
        let client = InMemoryAuthClient::new().with_recovery_token("recovery", "user-9");

        client.update_password("recovery", "hunter22").await.unwrap();
        assert_eq!(
            client.password_updates(),
            vec![("user-9".to_string(), "hunter22".to_string())]
        );

        let err = client.update_password("stale", "hunter22").await.unwrap_err();
        assert_matches!(err, AuthError::Rejected(_));
    }
}
