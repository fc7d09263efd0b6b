//! API routes for the Resource Gateway

use axum::{routing::get, Router};

use crate::api::handlers::*;
use crate::service::ResourceGateway;

/// Create the gateway router
pub fn create_router(gateway: ResourceGateway) -> Router {
    Router::new()
        .route(
            "/api/supabase/:table",
            get(read_row)
                .post(create_row)
                .patch(update_rows)
                .delete(delete_rows),
        )
        .with_state(gateway)
}
