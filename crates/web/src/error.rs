//! API error envelope with Sentry integration.
//!
//! Every failure of the JSON endpoints is an [`ApiError`]. Its response is
//! always `{ "ok": false, "error": ..., "details"?: ... }` with the status
//! chosen by the variant. Server-side failures are captured to Sentry before
//! responding.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use novenapp_core::LeadValidationError;
use serde::Serialize;
use thiserror::Error;

/// Error returned by the API route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required lead field is missing.
    #[error(transparent)]
    Validation(#[from] LeadValidationError),

    /// The request body could not be read as the expected JSON shape.
    #[error("Solicitud inválida")]
    InvalidRequest(String),

    /// The lookup was called without a slug.
    #[error("Slug es requerido")]
    MissingSlug,

    /// Webhook URL or token is not configured.
    #[error("Configuración del servidor incompleta")]
    NotConfigured,

    /// The webhook answered with a body that is not JSON.
    #[error("Respuesta inválida del servidor de Google")]
    UpstreamFormat { raw: String },

    /// The webhook answered with a non-success status.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    /// The webhook answered `ok: false`.
    #[error("{message}")]
    UpstreamRejected { status: StatusCode, message: String },

    /// The webhook did not answer in time.
    #[error("Tiempo de espera agotado")]
    Timeout,

    /// The requested novena does not exist.
    #[error("Novena no encontrada")]
    NotFound,

    /// The client exceeded the API rate limit.
    #[error("Demasiadas solicitudes")]
    TooManyRequests { wait_time: u64 },

    /// Anything else. The message is sent to the client as-is.
    #[error("{0}")]
    Internal(String),
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidRequest(_) | Self::MissingSlug => {
                StatusCode::BAD_REQUEST
            }
            Self::NotConfigured | Self::UpstreamFormat { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Upstream { status, .. } | Self::UpstreamRejected { status, .. } => *status,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::UpstreamFormat { raw } => Some(raw.clone()),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                status = status.as_u16(),
                sentry_event_id = %event_id,
                "Request error"
            );
        } else if let Self::TooManyRequests { wait_time } = &self {
            tracing::warn!(wait_time, "Rate limit exceeded");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = ErrorBody {
            ok: false,
            error: self.to_string(),
            details: self.details(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Add a breadcrumb for a visitor action.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, &str)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    for (key, value) in data {
        breadcrumb.data.insert(
            (*key).to_string(),
            serde_json::Value::String((*value).to_string()),
        );
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Validation(LeadValidationError::MissingCity);
        assert_eq!(err.to_string(), "Ciudad es requerida");

        let err = ApiError::NotConfigured;
        assert_eq!(err.to_string(), "Configuración del servidor incompleta");
    }

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::Validation(LeadValidationError::MissingEmail).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::MissingSlug.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::NotConfigured.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::Timeout.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::TooManyRequests { wait_time: 2 }.status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ApiError::Upstream {
                status: StatusCode::FORBIDDEN,
                message: "nope".to_string()
            }
            .status(),
            StatusCode::FORBIDDEN
        );
    }

    #[tokio::test]
    async fn test_envelope_shape() {
        let (status, body) = body_json(ApiError::Timeout).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            body,
            serde_json::json!({ "ok": false, "error": "Tiempo de espera agotado" })
        );
    }

    #[tokio::test]
    async fn test_upstream_format_carries_details() {
        let (status, body) = body_json(ApiError::UpstreamFormat {
            raw: "<html>Error</html>".to_string(),
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Respuesta inválida del servidor de Google");
        assert_eq!(body["details"], "<html>Error</html>");
    }
}
