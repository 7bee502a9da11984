//! Integration tests for the response headers added to every route.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::Request;
use novenapp_integration_tests::{get_path, send, unconfigured_app};
use novenapp_web::middleware::REQUEST_ID_HEADER;
use novenapp_web::middleware::security_headers::CONTENT_SECURITY_POLICY_VALUE;

#[tokio::test]
async fn test_pages_carry_security_headers() {
    let response = get_path(unconfigured_app(), "/").await;

    assert_eq!(
        response.header("content-security-policy"),
        Some(CONTENT_SECURITY_POLICY_VALUE)
    );
    assert_eq!(response.header("x-frame-options"), Some("DENY"));
    assert_eq!(response.header("x-content-type-options"), Some("nosniff"));
    assert_eq!(
        response.header("referrer-policy"),
        Some("strict-origin-when-cross-origin")
    );
    assert_eq!(response.header("cache-control"), Some("no-store, max-age=0"));
}

#[tokio::test]
async fn test_api_errors_carry_security_headers() {
    let response = get_path(unconfigured_app(), "/api/novena").await;

    assert_eq!(response.header("x-content-type-options"), Some("nosniff"));
    assert!(response.header("content-security-policy").is_some());
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let response = get_path(unconfigured_app(), "/health").await;
    let id = response.header(REQUEST_ID_HEADER).unwrap();
    assert_eq!(id.len(), 36);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let request = Request::get("/health")
        .header(REQUEST_ID_HEADER, "edge-1234")
        .body(Body::empty())
        .unwrap();
    let response = send(unconfigured_app(), request).await;

    assert_eq!(response.header(REQUEST_ID_HEADER), Some("edge-1234"));
}
