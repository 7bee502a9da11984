//! Web app manifest route handler.

use axum::{
    http::header,
    response::{IntoResponse, Response},
};

/// Theme colour shared by the manifest and the `theme-color` meta tag.
pub const THEME_COLOR: &str = "#16a34a";

const BACKGROUND_COLOR: &str = "#fdfbf7";

/// The manifest document.
#[must_use]
pub fn manifest() -> serde_json::Value {
    serde_json::json!({
        "name": "Novenapp - Tu Novena de Navidad Digital",
        "short_name": "Novenapp",
        "description": "Crea y comparte tu propia novena de aguinaldos digital.",
        "lang": "es-CO",
        "start_url": "/",
        "scope": "/",
        "icons": [
            {
                "src": "/static/icons/icon-192.png",
                "sizes": "192x192",
                "type": "image/png",
                "purpose": "any maskable"
            },
            {
                "src": "/static/icons/icon-512.png",
                "sizes": "512x512",
                "type": "image/png",
                "purpose": "any maskable"
            }
        ],
        "theme_color": THEME_COLOR,
        "background_color": BACKGROUND_COLOR,
        "display": "standalone",
        "orientation": "portrait"
    })
}

/// Serve the web app manifest.
pub async fn webmanifest() -> Response {
    (
        [(header::CONTENT_TYPE, "application/manifest+json")],
        manifest().to_string(),
    )
        .into_response()
}
