//! Lead intake endpoint.
//!
//! Validates the creation form, forwards it to the webhook and turns every
//! outcome into the `{ ok, ... }` envelope.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use novenapp_core::LeadSubmission;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::instrument;

use crate::error::{ApiError, Result, add_breadcrumb};
use crate::services::{LeadReceipt, WebhookError};
use crate::state::AppState;

/// Message returned for a stored lead.
pub const SUCCESS_MESSAGE: &str = "Lead registrado exitosamente";

/// Response for a stored lead.
#[derive(Debug, Serialize)]
pub struct LeadResponse {
    pub ok: bool,
    pub message: &'static str,
    pub duplicated: bool,
}

impl From<LeadReceipt> for LeadResponse {
    fn from(receipt: LeadReceipt) -> Self {
        Self {
            ok: true,
            message: SUCCESS_MESSAGE,
            duplicated: receipt.duplicated,
        }
    }
}

/// Submit a lead.
///
/// POST /api/lead
///
/// Required fields are checked in order (email, nombre, ciudad) before the
/// configuration, so an invalid submission never reaches the webhook.
///
/// # Errors
///
/// Returns an [`ApiError`] for invalid input, missing configuration or any
/// webhook failure.
#[instrument(skip(state, payload))]
pub async fn submit(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LeadSubmission>, JsonRejection>,
) -> Result<Json<LeadResponse>> {
    let Json(lead) = payload?;
    lead.validate()?;

    add_breadcrumb(
        "lead",
        "Lead submitted",
        &[("utm_source", lead.utm_source.as_deref().unwrap_or_default())],
    );

    let receipt = state
        .webhook()
        .submit_lead(&lead)
        .await
        .map_err(lead_error)?;

    tracing::info!(duplicated = receipt.duplicated, "Lead stored");
    Ok(Json(receipt.into()))
}

/// Map a webhook failure to the intake endpoint's response.
fn lead_error(err: WebhookError) -> ApiError {
    match err {
        WebhookError::NotConfigured => {
            tracing::error!("GS_WEBHOOK_URL or GS_SECRET_TOKEN not configured");
            ApiError::NotConfigured
        }
        WebhookError::Timeout(after) => {
            tracing::error!(?after, "Webhook timed out");
            ApiError::Timeout
        }
        WebhookError::InvalidBody { raw } => ApiError::UpstreamFormat { raw },
        WebhookError::Status { status, message } => ApiError::Upstream {
            status,
            message: message.unwrap_or_else(|| "Error al procesar la solicitud".to_string()),
        },
        WebhookError::Rejected { message } => ApiError::UpstreamRejected {
            status: StatusCode::BAD_REQUEST,
            message: message.unwrap_or_else(|| "Error al guardar el lead".to_string()),
        },
        err @ (WebhookError::Http(_) | WebhookError::Parse(_)) => {
            tracing::error!(error = %err, "Lead submission failed");
            ApiError::Internal("Error interno del servidor".to_string())
        }
    }
}
