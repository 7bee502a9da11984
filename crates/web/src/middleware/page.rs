//! Per-request page context for the HTML layout.
//!
//! Provides an extractor with everything `base.html` needs besides the page
//! itself: the analytics id, whether the browser should register the service
//! worker, and the UTM event to report for this visit.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use novenapp_core::analytics::AnalyticsEvent;
use serde::Deserialize;

use crate::state::AppState;

/// Campaign parameters accepted on any page.
#[derive(Debug, Default, Deserialize)]
pub struct UtmParams {
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
}

impl UtmParams {
    /// The UTM event for this visit, if a source was given.
    #[must_use]
    pub fn event(&self) -> Option<AnalyticsEvent> {
        let source = self.utm_source.as_deref().filter(|s| !s.is_empty())?;
        Some(AnalyticsEvent::utm(
            source,
            self.utm_medium.as_deref().filter(|s| !s.is_empty()),
            self.utm_campaign.as_deref().filter(|s| !s.is_empty()),
        ))
    }
}

/// Layout data shared by every page.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(page: PageContext) -> impl IntoResponse {
///     CrearTemplate { page }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// GA4 measurement id, when analytics is configured.
    pub ga4_id: Option<String>,
    /// Register `/sw.js` from the browser.
    pub register_worker: bool,
    /// Request path, used for the active nav link.
    pub path: String,
    /// `utm_source` of this visit, forwarded with the lead.
    pub utm_source: Option<String>,
    /// Serialized UTM event to send on load.
    pub utm_event: Option<String>,
}

impl PageContext {
    /// Whether the page is the given path.
    #[must_use]
    pub fn is_current(&self, path: &str) -> bool {
        self.path == path
    }

    /// Tracking payload for links to the terms page.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn terms_event(&self) -> String {
        AnalyticsEvent::terms_viewed().to_json()
    }

    /// Tracking payload sent when the app gets installed.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn install_event(&self) -> String {
        AnalyticsEvent::pwa_installed().to_json()
    }
}

impl FromRequestParts<AppState> for PageContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let config = state.config();
        let utm = Query::<UtmParams>::try_from_uri(&parts.uri)
            .map(|Query(params)| params)
            .unwrap_or_default();

        Ok(Self {
            ga4_id: config.analytics.ga4_measurement_id.clone(),
            register_worker: config.offline.register_worker,
            path: parts.uri.path().to_string(),
            utm_event: utm.event().map(|event| event.to_json()),
            utm_source: utm.utm_source.filter(|s| !s.is_empty()),
        })
    }
}
