//! HTTP API for the chat endpoint

pub mod handlers;
pub mod models;
pub mod routes;

pub use handlers::ChatState;
pub use routes::create_router;
