//! REST API for card validation.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/v1/validate` | Validate (and enrich) one card number |
//! | `GET` | `/health` | Liveness check |
//! | `GET` | `/swagger-ui` | Interactive API documentation |
//! | `GET` | `/metrics` | Prometheus metrics, when enabled |
//!
//! [`router`] and [`router_with_metrics`] build the complete application so
//! it can be served by the `card-validator-server` binary or driven
//! in-process by tests.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::card::{BankInfo, CardType, CountryInfo, ValidationResult};
use crate::error::SanitizeError;
use crate::metrics::Metrics;
use crate::validate::Validator;

/// Header carrying the per-request identifier.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Card Validator API",
        description = "Payment card validation: sanitization, network detection, Luhn checksum and best-effort BIN enrichment.",
        license(name = "MIT")
    ),
    tags(
        (name = "Validation", description = "Card number validation endpoints"),
        (name = "System", description = "Health and status endpoints")
    ),
    paths(validate_card, health),
    components(schemas(
        ValidateRequest,
        ValidationResult,
        CardType,
        CountryInfo,
        BankInfo,
        ErrorResponse,
        HealthResponse,
    ))
)]
struct ApiDoc;

/// Body of `POST /api/v1/validate`.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({"card_number": "4111 1111 1111 1111"}))]
pub struct ValidateRequest {
    /// Card number to validate. Separators such as spaces or dashes are ignored.
    pub card_number: String,
}

/// Error body returned for rejected requests.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable reason.
    pub error: String,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status, always `healthy`.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Errors a handler can answer with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// `card_number` was missing or empty.
    #[error("card number is required")]
    MissingCardNumber,
    /// The input could not be sanitized.
    #[error(transparent)]
    Sanitize(#[from] SanitizeError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingCardNumber => StatusCode::BAD_REQUEST,
            Self::Sanitize(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Validate a card number
#[utoipa::path(
    post,
    path = "/api/v1/validate",
    request_body = ValidateRequest,
    responses(
        (status = 200, description = "Validation result", body = ValidationResult),
        (status = 400, description = "Card number missing", body = ErrorResponse),
        (status = 422, description = "Card number could not be sanitized", body = ErrorResponse)
    ),
    tag = "Validation"
)]
async fn validate_card(
    State(validator): State<Validator>,
    Json(req): Json<ValidateRequest>,
) -> Result<Json<ValidationResult>, ApiError> {
    if req.card_number.is_empty() {
        return Err(ApiError::MissingCardNumber);
    }

    let result = validator.validate_card(&req.card_number).await.map_err(|e| {
        tracing::debug!(error = %e, "rejected card number");
        e
    })?;
    Ok(Json(result))
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "System"
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn metrics_text(State(metrics): State<Metrics>) -> Response {
    match metrics.render() {
        Ok(body) => (
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; version=0.0.4"),
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn track_metrics(State(metrics): State<Metrics>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let start = Instant::now();
    let response = next.run(req).await;
    metrics.observe(method.as_str(), &endpoint, response.status(), start.elapsed());
    response
}

/// Builds the application router with documentation and middleware.
pub fn router(validator: Validator) -> Router {
    build(validator, None)
}

/// Like [`router`], with request metrics recorded into `metrics` and
/// served at `/metrics`.
pub fn router_with_metrics(validator: Validator, metrics: Metrics) -> Router {
    build(validator, Some(metrics))
}

fn build(validator: Validator, metrics: Option<Metrics>) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    let mut app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/v1/validate", post(validate_card))
        .route("/health", get(health))
        .with_state(validator);

    if let Some(metrics) = metrics {
        app = app
            .route("/metrics", get(metrics_text).with_state(metrics.clone()))
            .route_layer(middleware::from_fn_with_state(metrics, track_metrics));
    }

    app.layer(cors)
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

/// Returns the OpenAPI document served at `/api-docs/openapi.json`.
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
