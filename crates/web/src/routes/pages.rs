//! Intake, thank-you and content page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use novenapp_core::{
    DEFAULT_UTM_SOURCE,
    analytics::{AnalyticsEvent, ShareMethod},
};
use serde::Deserialize;
use tracing::instrument;

use crate::content::Page;
use crate::filters;
use crate::middleware::PageContext;
use crate::state::AppState;

/// Name shown on the thank-you page when none is given.
pub const DEFAULT_FAMILY_NAME: &str = "tu familia";

/// Maximum dedication length accepted by the form.
pub const DEDICATION_MAX_LEN: usize = 500;

// =============================================================================
// Crear
// =============================================================================

/// Intake form template.
#[derive(Template, WebTemplate)]
#[template(path = "crear.html")]
pub struct CrearTemplate {
    pub page: PageContext,
    /// Forwarded with the lead so the spreadsheet records the campaign.
    pub utm_source: String,
    pub dedication_max_len: usize,
    pub started_event: String,
    /// Failure event; the script replaces the label with the error shown.
    pub failed_event: String,
}

/// Display the intake form.
#[instrument(skip(page))]
pub async fn crear(page: PageContext) -> impl IntoResponse {
    let utm_source = page
        .utm_source
        .clone()
        .unwrap_or_else(|| DEFAULT_UTM_SOURCE.to_string());

    CrearTemplate {
        page,
        utm_source,
        dedication_max_len: DEDICATION_MAX_LEN,
        started_event: AnalyticsEvent::creation_started().to_json(),
        failed_event: AnalyticsEvent::creation_failed("").to_json(),
    }
}

// =============================================================================
// Gracias
// =============================================================================

/// Query string of the thank-you page.
#[derive(Debug, Default, Deserialize)]
pub struct GraciasQuery {
    pub slug: Option<String>,
    pub nombre: Option<String>,
}

/// Thank-you and share template.
#[derive(Template, WebTemplate)]
#[template(path = "gracias.html")]
pub struct GraciasTemplate {
    pub page: PageContext,
    pub name: String,
    pub slug: String,
    pub share_url: String,
    pub whatsapp_url: String,
    pub link_event: String,
    pub whatsapp_event: String,
    pub completed_event: String,
}

/// Text sent along with a shared novena link.
fn share_text(url: &str) -> String {
    format!("¡Únete a nuestra novena de aguinaldos digital! {url}")
}

/// `wa.me` link that opens WhatsApp with the share text.
fn whatsapp_url(share_url: &str) -> String {
    let text: String = url::form_urlencoded::byte_serialize(share_text(share_url).as_bytes()).collect();
    format!("https://wa.me/?text={text}")
}

/// Display the thank-you page.
#[instrument(skip(state, page))]
pub async fn gracias(
    State(state): State<AppState>,
    page: PageContext,
    Query(query): Query<GraciasQuery>,
) -> impl IntoResponse {
    let name = query
        .nombre
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_FAMILY_NAME.to_string());
    let slug = query.slug.unwrap_or_default().trim().to_string();
    let share_url = state.config().share_url(&slug);

    GraciasTemplate {
        page,
        name,
        whatsapp_url: whatsapp_url(&share_url),
        link_event: AnalyticsEvent::shared(&slug, ShareMethod::Link).to_json(),
        whatsapp_event: AnalyticsEvent::shared(&slug, ShareMethod::Whatsapp).to_json(),
        completed_event: AnalyticsEvent::creation_completed(&slug).to_json(),
        share_url,
        slug,
    }
}

// =============================================================================
// Content Pages
// =============================================================================

/// Content page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/content.html")]
pub struct ContentPageTemplate {
    pub page: PageContext,
    pub title: String,
    pub description: String,
    pub updated_label: Option<String>,
    pub content_html: String,
}

/// Serve a content page by slug.
fn serve_content_page(
    state: &AppState,
    page: PageContext,
    slug: &str,
) -> Result<ContentPageTemplate, StatusCode> {
    let content: &Page = state
        .content()
        .get_page(slug)
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(ContentPageTemplate {
        page,
        title: content.meta.title.clone(),
        description: content.meta.description.clone().unwrap_or_default(),
        updated_label: content.meta.updated_label(),
        content_html: content.content_html.clone(),
    })
}

/// Display the Terms and Conditions page.
///
/// # Errors
///
/// Returns 404 if the page doesn't exist.
#[instrument(skip(state, page))]
pub async fn terminos(
    State(state): State<AppState>,
    page: PageContext,
) -> Result<impl IntoResponse, StatusCode> {
    serve_content_page(&state, page, "terminos")
}

// =============================================================================
// Not Found
// =============================================================================

/// Unknown page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub page: PageContext,
}

/// Fallback for unknown paths.
pub async fn not_found(page: PageContext) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NotFoundTemplate { page })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_whatsapp_url_encodes_text() {
        let url = whatsapp_url("https://novenapp.com/novenas/familia-garcia-173000");
        assert!(url.starts_with("https://wa.me/?text="));
        assert!(url.contains("https%3A%2F%2Fnovenapp.com%2Fnovenas%2Ffamilia-garcia-173000"));
        assert!(!url.contains(' '));
    }

    #[test]
    fn test_gracias_template_defaults() {
        let template = GraciasTemplate {
            page: PageContext::default(),
            name: DEFAULT_FAMILY_NAME.to_string(),
            slug: "juan-perez-1".to_string(),
            share_url: "http://localhost:3000/novenas/juan-perez-1".to_string(),
            whatsapp_url: whatsapp_url("http://localhost:3000/novenas/juan-perez-1"),
            link_event: AnalyticsEvent::shared("juan-perez-1", ShareMethod::Link).to_json(),
            whatsapp_event: AnalyticsEvent::shared("juan-perez-1", ShareMethod::Whatsapp)
                .to_json(),
            completed_event: AnalyticsEvent::creation_completed("juan-perez-1").to_json(),
        };
        let html = template.render().unwrap();
        assert!(html.contains("¡Tu novena está lista! 🎄"));
        assert!(html.contains("tu familia"));
        assert!(html.contains("http://localhost:3000/novenas/juan-perez-1"));
    }

    #[test]
    fn test_crear_template_renders_form() {
        let template = CrearTemplate {
            page: PageContext::default(),
            utm_source: DEFAULT_UTM_SOURCE.to_string(),
            dedication_max_len: DEDICATION_MAX_LEN,
            started_event: AnalyticsEvent::creation_started().to_json(),
            failed_event: AnalyticsEvent::creation_failed("").to_json(),
        };
        let html = template.render().unwrap();
        assert!(html.contains("Crea tu novena digital 🎄"));
        assert!(html.contains(r#"maxlength="500""#));
        assert!(html.contains(r#"data-utm-source="direct""#));
    }
}
