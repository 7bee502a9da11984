//! Generated service worker script.
//!
//! The script is rendered from the same [`OfflineConfig`] the Rust cache
//! model uses, so cache names, the precache list and host exclusions never
//! drift between the two.

use askama::Template;
use axum::{
    extract::State,
    http::{HeaderName, header},
    response::{IntoResponse, Response},
};
use novenapp_core::offline::OfflineConfig;
use serde::Serialize;

use crate::state::AppState;

/// Service worker template. Lists are embedded as JSON literals.
#[derive(Template)]
#[template(path = "sw.js", escape = "none")]
struct ServiceWorkerTemplate {
    version: String,
    static_cache: String,
    dynamic_cache: String,
    precache: String,
    excluded_hosts: String,
}

/// Render the service worker for a cache configuration.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render(config: &OfflineConfig) -> Result<String, askama::Error> {
    ServiceWorkerTemplate {
        version: config.version.clone(),
        static_cache: json_literal(&config.static_cache_name()),
        dynamic_cache: json_literal(&config.dynamic_cache_name()),
        precache: json_literal(&config.precache),
        excluded_hosts: json_literal(&config.excluded_hosts),
    }
    .render()
}

fn json_literal<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// Serve `/sw.js`.
///
/// `Service-Worker-Allowed: /` lets the worker control the whole origin and
/// `no-cache` makes browsers revalidate it on every registration check.
pub async fn script(State(state): State<AppState>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
            (HeaderName::from_static("service-worker-allowed"), "/"),
        ],
        state.service_worker().to_string(),
    )
        .into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_render_embeds_config() {
        let mut config = OfflineConfig::with_version("v3");
        config.exclude_host("hooks.example.org");

        let script = render(&config).unwrap();

        assert!(script.contains(r#"const STATIC_CACHE = "novenapp-static-v3";"#));
        assert!(script.contains(r#"const DYNAMIC_CACHE = "novenapp-dynamic-v3";"#));
        assert!(script.contains(r#""/static/icons/icon-512.png""#));
        assert!(script.contains(r#"["script.google.com","googleapis.com","hooks.example.org"]"#));
        assert!(script.contains("self.skipWaiting()"));
        assert!(script.contains("self.clients.claim()"));
    }
}
