//! Novena viewer and day page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use novenapp_core::{
    DayNumber, NovenaRecord,
    analytics::{AnalyticsEvent, ShareMethod},
    content::{self, NovenaDay},
    display_name_from_slug,
};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::middleware::PageContext;
use crate::services::{NovenaLookup, WebhookError};
use crate::state::AppState;

// =============================================================================
// Shared Prayers
// =============================================================================

/// Prayers said on every day of the novena.
#[derive(Clone, Copy)]
pub struct Prayers {
    pub every_day: &'static [&'static str],
    pub every_day_note: &'static str,
    pub to_mary: &'static str,
    pub to_joseph: &'static str,
    pub joys_chorus: &'static str,
    pub joys: &'static [&'static str],
    pub to_child_jesus: &'static str,
}

pub const PRAYERS: Prayers = Prayers {
    every_day: content::PRAYER_FOR_EVERY_DAY,
    every_day_note: content::PRAYER_FOR_EVERY_DAY_NOTE,
    to_mary: content::PRAYER_TO_MARY,
    to_joseph: content::PRAYER_TO_JOSEPH,
    joys_chorus: content::JOYS_CHORUS,
    joys: content::JOYS,
    to_child_jesus: content::PRAYER_TO_CHILD_JESUS,
};

const SHARE_TEXT: &str = "¡Únete a nuestra novena de aguinaldos digital del 16 al 24 de diciembre!";

// =============================================================================
// Personalization
// =============================================================================

/// Why the viewer cannot be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerError {
    /// The webhook has no novena for the slug.
    NotFound,
    /// The webhook could not be reached.
    Connection,
}

impl ViewerError {
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Connection => StatusCode::BAD_GATEWAY,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::NotFound => "Novena no encontrada",
            Self::Connection => "Error de conexión",
        }
    }
}

/// Header data of a personalized novena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Personalization {
    pub name: String,
    pub dedication: Option<String>,
    pub city: Option<String>,
}

impl Personalization {
    fn fallback(slug: &str) -> Self {
        Self {
            name: display_name_from_slug(slug),
            dedication: None,
            city: None,
        }
    }

    fn from_record(slug: &str, record: NovenaRecord) -> Self {
        let name = non_blank(record.display_name).unwrap_or_else(|| display_name_from_slug(slug));
        Self {
            name,
            dedication: non_blank(record.dedication),
            city: non_blank(record.city),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Decide what the viewer shows for a lookup result.
///
/// A missing novena or an unreachable webhook blocks the page; any other
/// failure still shows the novena under a name derived from the slug.
///
/// # Errors
///
/// Returns the [`ViewerError`] to render instead of the novena.
pub fn personalize(
    slug: &str,
    lookup: Result<NovenaLookup, WebhookError>,
) -> Result<Personalization, ViewerError> {
    match lookup {
        Ok(NovenaLookup {
            record: Some(record),
            ..
        }) => Ok(Personalization::from_record(slug, record)),
        Ok(NovenaLookup { record: None, .. }) => Ok(Personalization::fallback(slug)),
        Err(WebhookError::Status { status, .. }) if status == StatusCode::NOT_FOUND => {
            Err(ViewerError::NotFound)
        }
        Err(WebhookError::Http(_)) => Err(ViewerError::Connection),
        Err(err) => {
            tracing::warn!(slug, error = %err, "Novena lookup failed, using slug name");
            Ok(Personalization::fallback(slug))
        }
    }
}

// =============================================================================
// Viewer
// =============================================================================

/// Query string of the viewer.
#[derive(Debug, Default, Deserialize)]
pub struct ViewerQuery {
    pub dia: Option<String>,
}

impl ViewerQuery {
    /// Selected day, clamped into 1–9. Anything unreadable is day 1.
    #[must_use]
    pub fn day(&self) -> DayNumber {
        self.dia
            .as_deref()
            .and_then(|d| d.trim().parse::<i64>().ok())
            .map_or(DayNumber::FIRST, DayNumber::clamped)
    }
}

/// A button in the day selector.
pub struct DayTab {
    pub number: u8,
    pub date: u8,
    pub selected: bool,
}

/// Personalized novena template.
#[derive(Template, WebTemplate)]
#[template(path = "novena.html")]
pub struct NovenaTemplate {
    pub page: PageContext,
    pub slug: String,
    pub novena: Personalization,
    pub share_url: String,
    pub share_text: &'static str,
    pub tabs: Vec<DayTab>,
    pub day: NovenaDay,
    pub previous: Option<u8>,
    pub next: Option<u8>,
    pub prayers: Prayers,
    pub full_prayers: bool,
    pub opened_event: String,
    pub day_event: String,
    pub share_event: String,
    pub pdf_event: String,
}

/// Blocking error screen of the viewer.
#[derive(Template, WebTemplate)]
#[template(path = "novena_error.html")]
pub struct NovenaErrorTemplate {
    pub page: PageContext,
    pub title: &'static str,
}

/// Display a personalized novena.
#[instrument(skip(state, page, query))]
pub async fn show(
    State(state): State<AppState>,
    page: PageContext,
    Path(slug): Path<String>,
    Query(query): Query<ViewerQuery>,
) -> Response {
    let lookup = state.webhook().lookup_novena(&slug).await;

    let novena = match personalize(&slug, lookup) {
        Ok(novena) => novena,
        Err(err) => {
            return (
                err.status(),
                NovenaErrorTemplate {
                    page,
                    title: err.title(),
                },
            )
                .into_response();
        }
    };

    let selected = query.day();
    let tabs = DayNumber::all()
        .map(|d| DayTab {
            number: d.get(),
            date: d.december_date(),
            selected: d == selected,
        })
        .collect();

    NovenaTemplate {
        page,
        share_url: state.config().share_url(&slug),
        share_text: SHARE_TEXT,
        tabs,
        day: content::day(selected),
        previous: selected.previous().map(DayNumber::get),
        next: selected.next().map(DayNumber::get),
        prayers: PRAYERS,
        full_prayers: false,
        opened_event: AnalyticsEvent::novena_opened(&slug).to_json(),
        day_event: AnalyticsEvent::day_viewed(selected.get()).to_json(),
        share_event: AnalyticsEvent::shared(&slug, ShareMethod::Link).to_json(),
        pdf_event: AnalyticsEvent::pdf_downloaded(&slug).to_json(),
        novena,
        slug,
    }
    .into_response()
}

// =============================================================================
// Generic Day Page
// =============================================================================

/// Day page template (not personalized).
#[derive(Template, WebTemplate)]
#[template(path = "day.html")]
pub struct DayTemplate {
    pub page: PageContext,
    pub day: NovenaDay,
    pub previous: Option<u8>,
    pub next: Option<u8>,
    pub prayers: Prayers,
    pub full_prayers: bool,
    pub day_event: String,
}

/// Invalid day template.
#[derive(Template, WebTemplate)]
#[template(path = "day_not_found.html")]
pub struct DayNotFoundTemplate {
    pub page: PageContext,
}

/// Display the prayers for one day, e.g. `/novena/dia-3`.
#[instrument(skip(page))]
pub async fn day(page: PageContext, Path(segment): Path<String>) -> Response {
    let Ok(number) = DayNumber::from_path_segment(&segment) else {
        return (StatusCode::NOT_FOUND, DayNotFoundTemplate { page }).into_response();
    };

    DayTemplate {
        page,
        day: content::day(number),
        previous: number.previous().map(DayNumber::get),
        next: number.next().map(DayNumber::get),
        prayers: PRAYERS,
        full_prayers: true,
        day_event: AnalyticsEvent::day_viewed(number.get()).to_json(),
    }
    .into_response()
}
