//! Novena lookup endpoint.

use axum::{
    Json,
    extract::{Path, State},
};
use reqwest::StatusCode;
use tracing::instrument;

use crate::error::{ApiError, Result};
use crate::services::WebhookError;
use crate::state::AppState;

/// Look up a stored novena.
///
/// GET /api/novena/{slug}
///
/// On success the webhook reply is returned verbatim.
///
/// # Errors
///
/// Returns an [`ApiError`] for an empty slug, missing configuration, an
/// unknown novena or any webhook failure.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>> {
    if slug.is_empty() {
        return Err(ApiError::MissingSlug);
    }

    let lookup = state
        .webhook()
        .lookup_novena(&slug)
        .await
        .map_err(lookup_error)?;

    Ok(Json(lookup.raw))
}

/// `GET /api/novena` without a slug.
///
/// # Errors
///
/// Always returns [`ApiError::MissingSlug`].
pub async fn missing_slug() -> Result<Json<serde_json::Value>> {
    Err(ApiError::MissingSlug)
}

/// Map a webhook failure to the lookup endpoint's response.
pub(crate) fn lookup_error(err: WebhookError) -> ApiError {
    match err {
        WebhookError::NotConfigured => {
            tracing::error!("GS_WEBHOOK_URL or GS_SECRET_TOKEN not configured");
            ApiError::NotConfigured
        }
        WebhookError::Status { status, .. } if status == StatusCode::NOT_FOUND => {
            ApiError::NotFound
        }
        WebhookError::Status { status, .. } => ApiError::Upstream {
            status,
            message: "Error al obtener datos de la novena".to_string(),
        },
        WebhookError::Rejected { message } => {
            tracing::error!(error = ?message, "Webhook answered ok:false");
            ApiError::UpstreamRejected {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: message.unwrap_or_else(|| "Error desconocido".to_string()),
            }
        }
        err => ApiError::Internal(err.to_string()),
    }
}
