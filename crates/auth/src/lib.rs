//! Session validation and password reset for Souperb
//!
//! Authentication itself is delegated to the hosted auth service (GoTrue).
//! This crate wraps it behind [`AuthClient`] and exposes:
//!
//! - the cookie-based [`AuthenticatedSession`] extractor guarding the chat routes
//! - the forgot/reset password routes
//!
//! # Feature Flags
//!
//! - `api` - Enable the HTTP routes and the session extractor
//! - `client` - Enable the GoTrue HTTP client

pub mod client;
pub mod error;
pub mod types;

#[cfg(feature = "api")]
pub mod api;
#[cfg(feature = "api")]
pub mod session;

#[cfg(feature = "client")]
pub mod supabase;

pub use client::{AuthClient, InMemoryAuthClient};
pub use error::{AuthError, AuthResult};
pub use types::{AuthUser, Session};

#[cfg(feature = "api")]
pub use session::{AuthHandle, AuthenticatedSession, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};

#[cfg(feature = "client")]
pub use supabase::SupabaseAuthClient;
