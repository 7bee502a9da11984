//! Integration tests for Novenapp.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p novenapp-integration-tests
//! ```
//!
//! No external services are needed. Each test builds the full router with
//! [`novenapp_web::app`] and drives it with `tower::ServiceExt::oneshot`;
//! the spreadsheet webhook is replaced by a small axum app listening on an
//! ephemeral local port.
//!
//! # Test Categories
//!
//! - `api_lead` - Lead intake validation, forwarding and error mapping
//! - `api_novena` - Novena lookup
//! - `pages` - Server-rendered pages and the personalized viewer
//! - `pwa` - Manifest, service worker and static assets
//! - `security` - Response headers

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::Query,
    http::{HeaderMap, Request, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use novenapp_web::config::{AppConfig, WebhookConfig};
use novenapp_web::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;
use url::Url;

/// Token the fake webhook expects.
pub const TEST_TOKEN: &str = "test-token";

/// Slug the fake webhook knows.
pub const KNOWN_SLUG: &str = "juan-perez-1";

/// Slug the fake webhook answers 404 for.
pub const MISSING_SLUG: &str = "familia-garcia-173000";

/// Slug the fake webhook answers `ok: false` for.
pub const REJECTED_SLUG: &str = "familia-rechazada-1";

// =============================================================================
// Fake Webhook
// =============================================================================

/// How the fake webhook answers lead submissions.
#[derive(Debug, Clone)]
pub enum LeadBehavior {
    /// `{ ok: true, duplicated }`
    Accept { duplicated: bool },
    /// Status 200 with `{ ok: false, error }`
    Reject(&'static str),
    /// The given status with `{ ok: false, error }`
    Fail(StatusCode, &'static str),
    /// Status 200 with a non-JSON body
    Html(&'static str),
    /// Wait before answering
    Slow(Duration),
    /// Status 200 with this exact JSON text
    Raw(&'static str),
}

/// An in-process stand-in for the spreadsheet webhook.
pub struct FakeWebhook {
    /// Endpoint to configure as `GS_WEBHOOK_URL`.
    pub url: Url,
    /// Every lead payload received, in order.
    pub received: Arc<Mutex<Vec<Value>>>,
}

impl FakeWebhook {
    /// Start the fake webhook on an ephemeral port.
    pub async fn start(behavior: LeadBehavior) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let store = Arc::clone(&received);

        let router = Router::new().route(
            "/exec",
            get(lookup).post(move |Json(payload): Json<Value>| {
                let store = Arc::clone(&store);
                let behavior = behavior.clone();
                async move {
                    store.lock().unwrap().push(payload);
                    submit(behavior).await
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            url: Url::parse(&format!("http://{addr}/exec")).unwrap(),
            received,
        }
    }

    /// Webhook configuration pointing at this fake.
    #[must_use]
    pub fn config(&self) -> WebhookConfig {
        WebhookConfig::new(self.url.clone(), TEST_TOKEN)
    }

    /// Lead payloads received so far.
    #[must_use]
    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }
}

async fn submit(behavior: LeadBehavior) -> Response {
    match behavior {
        LeadBehavior::Accept { duplicated } => {
            Json(json!({ "ok": true, "duplicated": duplicated })).into_response()
        }
        LeadBehavior::Reject(error) => Json(json!({ "ok": false, "error": error })).into_response(),
        LeadBehavior::Fail(status, error) => {
            (status, Json(json!({ "ok": false, "error": error }))).into_response()
        }
        LeadBehavior::Html(body) => body.into_response(),
        LeadBehavior::Slow(delay) => {
            tokio::time::sleep(delay).await;
            Json(json!({ "ok": true })).into_response()
        }
        LeadBehavior::Raw(body) => ([(CONTENT_TYPE, "application/json")], body).into_response(),
    }
}

async fn lookup(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("token").map(String::as_str) != Some(TEST_TOKEN) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "ok": false, "error": "Token inválido" })),
        )
            .into_response();
    }

    match params.get("slug").map(String::as_str) {
        Some(KNOWN_SLUG) => Json(json!({
            "ok": true,
            "data": {
                "nombre": "Juan Pérez",
                "dedicatoria": "Para toda la familia",
                "ciudad": "Bogotá"
            }
        }))
        .into_response(),
        Some(REJECTED_SLUG) => {
            Json(json!({ "ok": false, "error": "Hoja no disponible" })).into_response()
        }
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "ok": false, "error": "No encontrada" })),
        )
            .into_response(),
    }
}

/// A webhook URL nothing listens on.
pub async fn unreachable_webhook() -> WebhookConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    WebhookConfig::new(Url::parse(&format!("http://{addr}/exec")).unwrap(), TEST_TOKEN)
}

// =============================================================================
// Application
// =============================================================================

/// Build the full application router from a configuration.
#[must_use]
pub fn app_with(config: AppConfig) -> Router {
    novenapp_web::app(AppState::new(config).unwrap())
}

/// Build the full application router with the given webhook.
#[must_use]
pub fn test_app(webhook: WebhookConfig) -> Router {
    app_with(AppConfig {
        webhook,
        ..AppConfig::default()
    })
}

/// Build the application with no webhook configured.
#[must_use]
pub fn unconfigured_app() -> Router {
    test_app(WebhookConfig::default())
}

/// A collected response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    /// The body parsed as JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    /// The body as UTF-8 text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).unwrap()
    }

    /// A header value as a string.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Send one request through the router.
pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        headers,
        body: bytes,
    }
}

/// `GET` a path.
pub async fn get_path(app: Router, path: &str) -> TestResponse {
    send(app, Request::get(path).body(Body::empty()).unwrap()).await
}

/// `POST` a JSON body.
pub async fn post_json(app: Router, path: &str, body: &Value) -> TestResponse {
    let request = Request::post(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}
