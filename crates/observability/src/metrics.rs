//! Prometheus metrics infrastructure
//!
//! Metrics are recorded through the `metrics` facade. Until [`init_metrics`]
//! installs the Prometheus recorder every call here is a no-op, so library
//! code and tests can record unconditionally.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// Total HTTP requests by method, route, and status
pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";

/// HTTP request latency by method and route
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

/// Initialize the Prometheus metrics exporter
///
/// This starts an HTTP listener on the specified port that exposes metrics
/// at `/metrics`.
///
/// # Example
///
/// ```ignore
/// observability::metrics::init_metrics(9090)?;
/// // Metrics available at http://localhost:9090/metrics
/// ```
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    tracing::info!(%addr, "Metrics server listening");
    Ok(())
}

/// Record one completed HTTP request
///
/// `route` should be the matched route template (`/api/supabase/:table`), not
/// the raw path, to keep label cardinality bounded.
pub fn record_http_request(method: &str, route: &str, status: u16, duration: Duration) {
    counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        HTTP_REQUEST_DURATION_SECONDS,
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Times a request and records it on drop
///
/// # Example
///
/// ```ignore
/// let mut timer = RequestTimer::start("GET", "/health");
/// // ... handle request ...
/// timer.set_status(200);
/// ```
pub struct RequestTimer {
    method: String,
    route: String,
    start: Instant,
    status: u16,
}

impl RequestTimer {
    /// Start timing a request; the status defaults to 500 until set
    pub fn start(method: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            route: route.into(),
            start: Instant::now(),
            status: 500,
        }
    }

    /// Set the status code (call before drop)
    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        record_http_request(&self.method, &self.route, self.status, self.start.elapsed());
    }
}
