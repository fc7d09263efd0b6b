//! HTTP API for the password reset flow

pub mod handlers;
pub mod models;
pub mod routes;

pub use handlers::AccountState;
pub use routes::create_router;
