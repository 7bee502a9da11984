//! Integration tests for the manifest, service worker and static assets.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use novenapp_core::offline::OfflineConfig;
use novenapp_integration_tests::{get_path, unconfigured_app};

#[tokio::test]
async fn test_manifest() {
    let response = get_path(unconfigured_app(), "/manifest.json").await;

    assert_eq!(response.status, StatusCode::OK);
    let manifest = response.json();
    assert_eq!(manifest["short_name"], "Novenapp");
    assert_eq!(manifest["display"], "standalone");
    assert_eq!(manifest["icons"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_service_worker_headers() {
    let response = get_path(unconfigured_app(), "/sw.js").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("service-worker-allowed"), Some("/"));
    assert_eq!(response.header("cache-control"), Some("no-cache"));
    assert!(response.header("content-type").unwrap().starts_with("application/javascript"));
}

#[tokio::test]
async fn test_service_worker_uses_offline_config() {
    let config = OfflineConfig::default();
    let response = get_path(unconfigured_app(), "/sw.js").await;

    assert!(response.text().contains(&config.static_cache_name()));
    assert!(response.text().contains(&config.dynamic_cache_name()));
    for path in &config.precache {
        assert!(response.text().contains(path.as_str()), "{path}");
    }
}

#[tokio::test]
async fn test_precached_icons_are_served() {
    for path in ["/static/icons/icon-192.png", "/static/icons/icon-512.png"] {
        let response = get_path(unconfigured_app(), path).await;
        assert_eq!(response.status, StatusCode::OK, "{path}");
        assert_eq!(response.header("content-type"), Some("image/png"), "{path}");
        assert!(response.body.starts_with(b"\x89PNG\r\n\x1a\n"), "{path}");
    }
}

#[tokio::test]
async fn test_static_assets_are_cacheable() {
    let response = get_path(unconfigured_app(), "/static/css/main.css").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("cache-control"), Some("public, max-age=3600"));
}
