//! REST API tests, driven in-process through the router.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use card_validator::metrics::Metrics;
use card_validator::{server, Validator};

fn app() -> Router {
    server::router(Validator::offline())
}

fn validate_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/validate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn metrics_request() -> Request<Body> {
    Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_validate_valid_card() {
    let response = app()
        .oneshot(validate_request(json!({"card_number": "4111 1111 1111 1111"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["valid"], true);
    assert_eq!(body["card_type"], "visa");
    assert_eq!(body["card_number"], "4111111111111111");
    assert_eq!(body["bin"], "411111");
    assert_eq!(body["last_four"], "1111");
}

#[tokio::test]
async fn test_validate_bad_checksum_is_ok_response() {
    let response = app()
        .oneshot(validate_request(json!({"card_number": "4111111111111112"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["valid"], false);
    assert_eq!(body["card_type"], "visa");
}

#[tokio::test]
async fn test_validate_empty_card_number() {
    let response = app()
        .oneshot(validate_request(json!({"card_number": ""})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "card number is required");
}

#[tokio::test]
async fn test_validate_too_short() {
    let response = app()
        .oneshot(validate_request(json!({"card_number": "1234"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "card number too short: got 4 digits, minimum is 13"
    );
}

#[tokio::test]
async fn test_validate_no_digits() {
    let response = app()
        .oneshot(validate_request(json!({"card_number": "abcd"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_validate_malformed_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/validate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_request_id_is_set() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert!(response.headers().contains_key(server::REQUEST_ID_HEADER));
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let request = Request::builder()
        .uri("/health")
        .header(server::REQUEST_ID_HEADER, "abc-123")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[server::REQUEST_ID_HEADER],
        "abc-123"
    );
}

#[tokio::test]
async fn test_openapi_document() {
    let request = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["paths"]["/api/v1/validate"]["post"].is_object());
    assert!(body["paths"]["/health"]["get"].is_object());
}

#[tokio::test]
async fn test_unknown_route() {
    let request = Request::builder()
        .uri("/validate")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Metrics
// ============================================================================

#[tokio::test]
async fn test_metrics_disabled_by_default_router() {
    let response = app().oneshot(metrics_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metrics_count_validate_requests() {
    let app = server::router_with_metrics(Validator::offline(), Metrics::new().unwrap());

    let response = app
        .clone()
        .oneshot(validate_request(json!({"card_number": "4111 1111 1111 1111"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(metrics_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));

    let text = body_text(response).await;
    assert!(text.contains("card_validation_requests_total"));
    assert!(text.contains("endpoint=\"/api/v1/validate\""));
    assert!(text.contains("method=\"POST\""));
    assert!(text.contains("status=\"200\""));
    assert!(text.contains("card_validation_duration_seconds_bucket"));
    assert!(!text.contains("4111111111111111"));
}

#[tokio::test]
async fn test_metrics_count_error_responses() {
    let app = server::router_with_metrics(Validator::offline(), Metrics::new().unwrap());

    for body in [json!({"card_number": "1234"}), json!({"card_number": ""})] {
        let response = app.clone().oneshot(validate_request(body)).await.unwrap();
        assert!(response.status().is_client_error());
    }

    let text = body_text(app.oneshot(metrics_request()).await.unwrap()).await;
    assert!(text.contains("card_validation_errors_total{error_type=\"http_error\"} 2"));
    assert!(text.contains("status=\"422\""));
    assert!(text.contains("status=\"400\""));
}

#[tokio::test]
async fn test_metrics_keep_other_routes() {
    let app = server::router_with_metrics(Validator::offline(), Metrics::new().unwrap());
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(server::REQUEST_ID_HEADER));

    let text = body_text(app.oneshot(metrics_request()).await.unwrap()).await;
    assert!(text.contains("endpoint=\"/health\""));
}
