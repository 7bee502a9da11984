//! Integration tests for `POST /api/lead`.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::http::StatusCode;
use novenapp_integration_tests::{
    FakeWebhook, LeadBehavior, TEST_TOKEN, post_json, test_app, unconfigured_app,
};
use novenapp_web::config::WebhookConfig;
use serde_json::json;

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_missing_fields_are_rejected_in_order() {
    let webhook = FakeWebhook::start(LeadBehavior::Accept { duplicated: false }).await;

    let cases = [
        (json!({ "nombre": "Juan", "ciudad": "Cali" }), "Email es requerido"),
        (json!({ "email": "a@b.com", "ciudad": "Cali" }), "Nombre es requerido"),
        (json!({ "email": "a@b.com", "nombre": "Juan" }), "Ciudad es requerida"),
        (json!({ "email": "", "nombre": "", "ciudad": "" }), "Email es requerido"),
    ];

    for (body, message) in cases {
        let response = post_json(test_app(webhook.config()), "/api/lead", &body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response.json(), json!({ "ok": false, "error": message }));
    }

    assert!(webhook.received().is_empty(), "invalid leads must not reach the webhook");
}

#[tokio::test]
async fn test_validation_runs_before_configuration_check() {
    let response = post_json(unconfigured_app(), "/api/lead", &json!({ "nombre": "Juan" })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "Email es requerido");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = unconfigured_app();
    let request = axum::http::Request::post("/api/lead")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = novenapp_integration_tests::send(app, request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["ok"], false);
}

// ============================================================================
// Forwarding
// ============================================================================

#[tokio::test]
async fn test_lead_is_stored() {
    let webhook = FakeWebhook::start(LeadBehavior::Accept { duplicated: false }).await;
    let body = json!({ "email": "a@b.com", "nombre": "Juan Pérez", "ciudad": "Bogotá" });

    let response = post_json(test_app(webhook.config()), "/api/lead", &body).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({ "ok": true, "message": "Lead registrado exitosamente", "duplicated": false })
    );
}

#[tokio::test]
async fn test_payload_is_normalized() {
    let webhook = FakeWebhook::start(LeadBehavior::Accept { duplicated: false }).await;
    let body = json!({
        "email": "  a@b.com ",
        "nombre": " Juan Pérez ",
        "ciudad": "Bogotá ",
        "utm_source": "",
        "acepta_terminos": true
    });

    post_json(test_app(webhook.config()), "/api/lead", &body).await;

    assert_eq!(
        webhook.received(),
        vec![json!({
            "token": TEST_TOKEN,
            "email": "a@b.com",
            "nombre": "Juan Pérez",
            "dedicatoria": "",
            "telefono": "",
            "ciudad": "Bogotá",
            "slug": "",
            "utm_source": "direct"
        })]
    );
}

#[tokio::test]
async fn test_duplicated_lead() {
    let webhook = FakeWebhook::start(LeadBehavior::Accept { duplicated: true }).await;
    let body = json!({
        "email": "a@b.com",
        "nombre": "Familia García",
        "ciudad": "Cali",
        "slug": "familia-garca-173000",
        "utm_source": "whatsapp"
    });

    let response = post_json(test_app(webhook.config()), "/api/lead", &body).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["duplicated"], true);
    let received = webhook.received();
    assert_eq!(received[0]["slug"], "familia-garca-173000");
    assert_eq!(received[0]["utm_source"], "whatsapp");
}

// ============================================================================
// Error Mapping
// ============================================================================

#[tokio::test]
async fn test_unconfigured_webhook() {
    let body = json!({ "email": "a@b.com", "nombre": "Juan", "ciudad": "Cali" });
    let response = post_json(unconfigured_app(), "/api/lead", &body).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json(),
        json!({ "ok": false, "error": "Configuración del servidor incompleta" })
    );
}

#[tokio::test]
async fn test_slow_webhook_times_out() {
    let webhook = FakeWebhook::start(LeadBehavior::Slow(Duration::from_secs(2))).await;
    let config: WebhookConfig = webhook.config().with_timeout(Duration::from_millis(100));
    let body = json!({ "email": "a@b.com", "nombre": "Juan", "ciudad": "Cali" });

    let response = post_json(test_app(config), "/api/lead", &body).await;

    assert_eq!(response.status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(response.json()["error"], "Tiempo de espera agotado");
}

#[tokio::test]
async fn test_non_json_reply_is_reported_with_details() {
    let webhook = FakeWebhook::start(LeadBehavior::Html("<html>Script error</html>")).await;
    let body = json!({ "email": "a@b.com", "nombre": "Juan", "ciudad": "Cali" });

    let response = post_json(test_app(webhook.config()), "/api/lead", &body).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json(),
        json!({
            "ok": false,
            "error": "Respuesta inválida del servidor de Google",
            "details": "<html>Script error</html>"
        })
    );
}

#[tokio::test]
async fn test_upstream_status_is_passed_through() {
    let webhook =
        FakeWebhook::start(LeadBehavior::Fail(StatusCode::SERVICE_UNAVAILABLE, "Cuota excedida"))
            .await;
    let body = json!({ "email": "a@b.com", "nombre": "Juan", "ciudad": "Cali" });

    let response = post_json(test_app(webhook.config()), "/api/lead", &body).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json(), json!({ "ok": false, "error": "Cuota excedida" }));
}

#[tokio::test]
async fn test_upstream_rejection_is_bad_request() {
    let webhook = FakeWebhook::start(LeadBehavior::Reject("Email inválido")).await;
    let body = json!({ "email": "a@b.com", "nombre": "Juan", "ciudad": "Cali" });

    let response = post_json(test_app(webhook.config()), "/api/lead", &body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({ "ok": false, "error": "Email inválido" }));
}

#[tokio::test]
async fn test_accepted_reply_with_odd_field_types_is_success() {
    let webhook = FakeWebhook::start(LeadBehavior::Raw(
        r#"{ "ok": true, "duplicated": "true", "error": 0 }"#,
    ))
    .await;
    let body = json!({ "email": "a@b.com", "nombre": "Juan", "ciudad": "Cali" });

    let response = post_json(test_app(webhook.config()), "/api/lead", &body).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["ok"], true);
    assert_eq!(webhook.received().len(), 1);
}

// ============================================================================
// Rate Limiting
// ============================================================================

#[tokio::test]
async fn test_rate_limited_calls_get_json_envelope() {
    let app = unconfigured_app();
    let body = json!({ "nombre": "Juan" });

    let mut last = None;
    for _ in 0..12 {
        last = Some(post_json(app.clone(), "/api/lead", &body).await);
    }
    let response = last.unwrap();

    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert!(response.header("content-type").unwrap().starts_with("application/json"));
    assert_eq!(
        response.json(),
        json!({ "ok": false, "error": "Demasiadas solicitudes" })
    );
}
