//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::content::{ContentError, ContentStore};
use crate::services::{WebhookClient, WebhookError};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("webhook client: {0}")]
    Webhook(#[from] WebhookError),
    #[error("service worker template: {0}")]
    ServiceWorker(#[from] askama::Error),
    #[error("content: {0}")]
    Content(#[from] ContentError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and gives handlers read-only
/// access to the configuration, the pooled webhook client and the content
/// pages.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    webhook: WebhookClient,
    content: ContentStore,
    service_worker: String,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The service worker script is rendered once here from the offline
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built, a content page
    /// fails to parse, or the service worker fails to render.
    pub fn new(config: AppConfig) -> Result<Self, StateError> {
        let webhook = WebhookClient::new(&config.webhook)?;
        let content = ContentStore::builtin()?;
        let service_worker = crate::routes::service_worker::render(&config.offline.cache)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                webhook,
                content,
                service_worker,
            }),
        })
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the webhook client.
    #[must_use]
    pub fn webhook(&self) -> &WebhookClient {
        &self.inner.webhook
    }

    /// Get a reference to the content store.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// The generated service worker script.
    #[must_use]
    pub fn service_worker(&self) -> &str {
        &self.inner.service_worker
    }
}
