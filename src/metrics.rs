//! Prometheus request metrics for the REST server.
//!
//! The validation engine keeps no counters; these series describe HTTP
//! traffic only and live in a registry owned by the server.
//!
//! | Series | Type | Labels |
//! |--------|------|--------|
//! | `card_validation_requests_total` | counter | `method`, `endpoint`, `status` |
//! | `card_validation_duration_seconds` | histogram | `method`, `endpoint` |
//! | `card_validation_errors_total` | counter | `error_type` |

use std::time::Duration;

use axum::http::StatusCode;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

/// `error_type` label for responses with a 4xx or 5xx status.
pub const HTTP_ERROR: &str = "http_error";

/// Request metrics backed by a private registry.
///
/// Cloning shares the underlying series.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration: HistogramVec,
    errors_total: IntCounterVec,
}

impl Metrics {
    /// Creates and registers the request series.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new(
                "card_validation_requests_total",
                "Total number of card validation requests",
            ),
            &["method", "endpoint", "status"],
        )?;
        let request_duration = HistogramVec::new(
            HistogramOpts::new(
                "card_validation_duration_seconds",
                "Duration of card validation requests",
            ),
            &["method", "endpoint"],
        )?;
        let errors_total = IntCounterVec::new(
            Opts::new(
                "card_validation_errors_total",
                "Total number of card validation errors",
            ),
            &["error_type"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration.clone()))?;
        registry.register(Box::new(errors_total.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            request_duration,
            errors_total,
        })
    }

    /// Records one finished request.
    pub fn observe(&self, method: &str, endpoint: &str, status: StatusCode, elapsed: Duration) {
        self.requests_total
            .with_label_values(&[method, endpoint, status.as_str()])
            .inc();
        self.request_duration
            .with_label_values(&[method, endpoint])
            .observe(elapsed.as_secs_f64());

        if status.is_client_error() || status.is_server_error() {
            self.errors_total.with_label_values(&[HTTP_ERROR]).inc();
        }
    }

    /// Renders every series in the Prometheus text format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_counts_requests() {
        let metrics = Metrics::new().unwrap();
        metrics.observe("POST", "/api/v1/validate", StatusCode::OK, Duration::from_millis(3));
        metrics.observe("POST", "/api/v1/validate", StatusCode::OK, Duration::from_millis(5));

        let count = metrics
            .requests_total
            .with_label_values(&["POST", "/api/v1/validate", "200"])
            .get();
        assert_eq!(count, 2);
        assert_eq!(metrics.errors_total.with_label_values(&[HTTP_ERROR]).get(), 0);
    }

    #[test]
    fn test_error_statuses_count_as_errors() {
        let metrics = Metrics::new().unwrap();
        metrics.observe("POST", "/api/v1/validate", StatusCode::BAD_REQUEST, Duration::ZERO);
        metrics.observe("POST", "/api/v1/validate", StatusCode::UNPROCESSABLE_ENTITY, Duration::ZERO);
        metrics.observe("GET", "/health", StatusCode::INTERNAL_SERVER_ERROR, Duration::ZERO);

        assert_eq!(metrics.errors_total.with_label_values(&[HTTP_ERROR]).get(), 3);
    }

    #[test]
    fn test_render_text_format() {
        let metrics = Metrics::new().unwrap();
        metrics.observe("GET", "/health", StatusCode::OK, Duration::from_millis(1));

        let text = metrics.render().unwrap();
        assert!(text.contains("# TYPE card_validation_requests_total counter"));
        assert!(text.contains("# TYPE card_validation_duration_seconds histogram"));
        assert!(text.contains("endpoint=\"/health\""));
    }

    #[test]
    fn test_registries_are_independent() {
        let a = Metrics::new().unwrap();
        let b = Metrics::new().unwrap();
        a.observe("GET", "/health", StatusCode::OK, Duration::ZERO);

        assert_eq!(
            b.requests_total
                .with_label_values(&["GET", "/health", "200"])
                .get(),
            0
        );
    }
}
