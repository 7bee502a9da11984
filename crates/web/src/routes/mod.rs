//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Landing page with countdown
//! GET  /health                 - Health check
//!
//! # Novena
//! GET  /crear                  - Intake form
//! GET  /gracias                - Thank-you and share screen
//! GET  /novenas/{slug}         - Personalized viewer (?dia=N)
//! GET  /novena/{dia}           - Generic day page (dia-1 .. dia-9)
//! GET  /terminos               - Terms and conditions
//!
//! # PWA
//! GET  /manifest.json          - Web app manifest
//! GET  /sw.js                  - Generated service worker
//!
//! # API (rate limited)
//! POST /api/lead               - Store a lead
//! GET  /api/novena/{slug}      - Look up a novena
//! ```

pub mod api;
pub mod home;
pub mod manifest;
pub mod novenas;
pub mod pages;
pub mod service_worker;

use axum::{Router, routing::get};

use crate::middleware::api_rate_limiter;
use crate::state::AppState;

/// Create the page routes router.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/crear", get(pages::crear))
        .route("/gracias", get(pages::gracias))
        .route("/terminos", get(pages::terminos))
        .route("/novenas/{slug}", get(novenas::show))
        .route("/novena/{dia}", get(novenas::day))
}

/// Create the PWA routes router.
pub fn pwa_routes() -> Router<AppState> {
    Router::new()
        .route("/manifest.json", get(manifest::webmanifest))
        .route("/sw.js", get(service_worker::script))
}

/// Create the API router with its rate limiter.
pub fn limited_api_routes() -> Router<AppState> {
    let api = api::routes();
    match api_rate_limiter() {
        Some(limiter) => api.layer(limiter),
        None => {
            tracing::warn!("Rate limiter configuration rejected, API is not rate limited");
            api
        }
    }
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(page_routes())
        .merge(pwa_routes())
        .nest("/api", limited_api_routes())
}
