//! Request metrics middleware

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use observability::RequestTimer;

/// Label used when no route matched
const UNMATCHED_ROUTE: &str = "unmatched";

/// Records `http_requests_total` and `http_request_duration_seconds`
///
/// Install with `Router::route_layer(axum::middleware::from_fn(track_metrics))`
/// so the matched route template is available as the label.
pub async fn track_metrics(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());

    let mut timer = RequestTimer::start(request.method().as_str(), route);
    let response = next.run(request).await;
    timer.set_status(response.status().as_u16());

    response
}
