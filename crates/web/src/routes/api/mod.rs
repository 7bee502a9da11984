//! JSON API consumed by the site's own pages.
//!
//! ```text
//! POST /api/lead            - Store a lead and its personalization
//! GET  /api/novena/{slug}   - Personalization for a stored novena
//! ```

pub mod lead;
pub mod novena;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/lead", post(lead::submit))
        .route("/novena", get(novena::missing_slug))
        .route("/novena/", get(novena::missing_slug))
        .route("/novena/{slug}", get(novena::show))
}
