//! Cookie session extractor

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use common::ApiError;
use std::sync::Arc;

use crate::client::AuthClient;
use crate::types::Session;

/// Cookie carrying the access token
pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";

/// Cookie carrying the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "sb-refresh-token";

/// Shared auth client, pulled out of router state by [`AuthenticatedSession`]
#[derive(Clone)]
pub struct AuthHandle(pub Arc<dyn AuthClient>);

impl AuthHandle {
    pub fn new(client: Arc<dyn AuthClient>) -> Self {
        Self(client)
    }
}

/// A request that carried a valid session in its cookies
///
/// Rejects with 401 when either cookie is missing or the auth service does
/// not accept the tokens.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedSession
where
    AuthHandle: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let (Some(access), Some(refresh)) = (
            jar.get(ACCESS_TOKEN_COOKIE),
            jar.get(REFRESH_TOKEN_COOKIE),
        ) else {
            return Err(ApiError::Unauthorized);
        };

        let AuthHandle(client) = AuthHandle::from_ref(state);
        match client.set_session(access.value(), refresh.value()).await {
            Ok(session) => Ok(Self(session)),
            Err(e) => {
                tracing::debug!(error = %e, "Session rejected");
                Err(ApiError::Unauthorized)
            }
        }
    }
}
