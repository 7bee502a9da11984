//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use tracing::instrument;

use crate::filters;
use crate::middleware::PageContext;

/// Offset used for the countdown (Bogotá, no daylight saving).
const COUNTDOWN_OFFSET_SECS: i32 = -5 * 3600;

// =============================================================================
// Countdown
// =============================================================================

/// Time left until the next 1 December.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// The 1 December the countdown runs to.
///
/// During December the target is the next year's.
#[must_use]
pub fn countdown_target(now: NaiveDateTime) -> NaiveDateTime {
    let year = if now.month() == 12 {
        now.year() + 1
    } else {
        now.year()
    };
    NaiveDate::from_ymd_opt(year, 12, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or(now)
}

/// Split the time left until [`countdown_target`] into units.
///
/// Every unit is 0 once the target has passed.
#[must_use]
pub fn countdown(now: NaiveDateTime) -> Countdown {
    let remaining = (countdown_target(now) - now).num_seconds();
    if remaining <= 0 {
        return Countdown::default();
    }

    Countdown {
        days: remaining / 86_400,
        hours: remaining / 3600 % 24,
        minutes: remaining / 60 % 60,
        seconds: remaining % 60,
    }
}

fn countdown_offset() -> FixedOffset {
    FixedOffset::east_opt(COUNTDOWN_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// The countdown target as a UNIX timestamp in milliseconds, for the client tick.
fn target_millis(now: DateTime<FixedOffset>) -> i64 {
    countdown_offset()
        .from_local_datetime(&countdown_target(now.naive_local()))
        .single()
        .map_or(0, |target| target.timestamp_millis())
}

// =============================================================================
// Page
// =============================================================================

/// A feature card on the landing page.
pub struct Feature {
    pub icon: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

const FEATURES: &[Feature] = &[
    Feature {
        icon: "✏️",
        title: "Personaliza",
        text: "Agrega el nombre de tu familia y una dedicatoria especial para hacer tu novena única.",
    },
    Feature {
        icon: "📲",
        title: "Comparte",
        text: "Envía el link por WhatsApp, correo o redes sociales para que todos recen juntos.",
    },
    Feature {
        icon: "🎄",
        title: "Celebra",
        text: "Reza cada día del 16 al 24 de diciembre con oraciones, consideraciones y villancicos.",
    },
];

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: PageContext,
    pub countdown: Countdown,
    pub target_millis: i64,
    pub features: &'static [Feature],
}

/// Display the landing page.
#[instrument(skip(page))]
pub async fn home(page: PageContext) -> impl IntoResponse {
    let now = Utc::now().with_timezone(&countdown_offset());

    HomeTemplate {
        page,
        countdown: countdown(now.naive_local()),
        target_millis: target_millis(now),
        features: FEATURES,
    }
}
