//! Analytics event catalog.
//!
//! Events are built on the server and handed to the page as JSON (see the
//! `data-track` attributes in the templates); the browser forwards them to
//! GA4 only when a measurement id is configured.

use serde::Serialize;

/// Channel used to share a novena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareMethod {
    Link,
    Whatsapp,
    Facebook,
    Twitter,
}

impl ShareMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Whatsapp => "whatsapp",
            Self::Facebook => "facebook",
            Self::Twitter => "twitter",
        }
    }
}

/// A single GA4 event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsEvent {
    pub action: &'static str,
    pub category: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
}

impl AnalyticsEvent {
    const fn new(action: &'static str, category: &'static str) -> Self {
        Self {
            action,
            category,
            label: None,
            value: None,
        }
    }

    fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    const fn value(mut self, value: u32) -> Self {
        self.value = Some(value);
        self
    }

    /// Visitor opened the creation form.
    #[must_use]
    pub fn creation_started() -> Self {
        Self::new("iniciar_creacion", "novena").label("formulario_abierto")
    }

    /// Visitor created a novena.
    #[must_use]
    pub fn creation_completed(slug: &str) -> Self {
        Self::new("crear_novena", "conversion").label(slug).value(1)
    }

    /// Creating a novena failed.
    #[must_use]
    pub fn creation_failed(message: &str) -> Self {
        Self::new("error_creacion", "error").label(message)
    }

    /// Visitor shared a novena.
    #[must_use]
    pub fn shared(slug: &str, method: ShareMethod) -> Self {
        Self::new("compartir", "engagement").label(format!("{}_{slug}", method.as_str()))
    }

    /// Visitor downloaded the PDF version.
    #[must_use]
    pub fn pdf_downloaded(slug: &str) -> Self {
        Self::new("descargar_pdf", "engagement").label(slug)
    }

    /// Visitor opened the terms page.
    #[must_use]
    pub fn terms_viewed() -> Self {
        Self::new("ver_terminos", "legal").label("click_terminos")
    }

    /// Visitor opened a personalized novena.
    #[must_use]
    pub fn novena_opened(slug: &str) -> Self {
        Self::new("abrir_novena", "engagement").label(slug)
    }

    /// Visitor viewed a specific day.
    #[must_use]
    pub fn day_viewed(day: u8) -> Self {
        Self::new("ver_dia", "novena")
            .label(format!("dia_{day}"))
            .value(u32::from(day))
    }

    /// The PWA was installed.
    #[must_use]
    pub fn pwa_installed() -> Self {
        Self::new("instalar_pwa", "engagement")
            .label("pwa_instalada")
            .value(1)
    }

    /// Visitor arrived with UTM parameters.
    #[must_use]
    pub fn utm(source: &str, medium: Option<&str>, campaign: Option<&str>) -> Self {
        Self::new("utm_tracking", "marketing").label(format!(
            "source_{source}_medium_{}_campaign_{}",
            medium.unwrap_or("none"),
            campaign.unwrap_or("none")
        ))
    }

    /// Serialized form for embedding in a `data-track` attribute.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
