//! Spreadsheet webhook client.
//!
//! The webhook stores leads (POST) and returns stored novenas (GET with
//! `slug` and `token` query parameters). Both calls expect a JSON body with
//! at least an `ok` field.

use std::time::Duration;

use novenapp_core::{LeadSubmission, NovenaLookupReply, NovenaRecord, WebhookLeadReply};
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::config::WebhookConfig;

/// Errors that can occur when talking to the webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// URL or token is missing.
    #[error("webhook URL or token not configured")]
    NotConfigured,

    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The lead submission did not finish within the configured bound.
    #[error("webhook did not answer within {0:?}")]
    Timeout(Duration),

    /// The lead submission reply is not JSON. Carries the raw text.
    #[error("webhook replied with non-JSON body")]
    InvalidBody { raw: String },

    /// The lookup reply could not be decoded.
    #[error("{0}")]
    Parse(String),

    /// Non-success HTTP status.
    #[error("webhook returned status {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    /// The webhook answered `ok: false`.
    #[error("webhook rejected the request")]
    Rejected { message: Option<String> },
}

/// Successful lead submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadReceipt {
    /// The webhook already had a lead for this email.
    pub duplicated: bool,
}

/// Successful novena lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct NovenaLookup {
    /// Reply body exactly as the webhook sent it.
    pub raw: serde_json::Value,
    /// Typed view of `data`, when present.
    pub record: Option<NovenaRecord>,
}

/// Webhook API client.
#[derive(Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    config: WebhookConfig,
}

impl WebhookClient {
    /// Create a new webhook client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &WebhookConfig) -> Result<Self, WebhookError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("novenapp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Whether both URL and token are configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.config.credentials().is_some()
    }

    /// Forward a validated lead to the webhook.
    ///
    /// The submission is normalized here, once, with the shared token. The
    /// whole round trip (request and reply body) is bounded by the configured
    /// timeout; there is no retry.
    ///
    /// # Errors
    ///
    /// - `NotConfigured` before any network call when credentials are missing
    /// - `Timeout` when the bound elapses
    /// - `InvalidBody` when the reply is not JSON, checked before the status
    /// - `Status` for a non-success status, with the upstream `error` if any
    /// - `Rejected` for a success status with `ok: false`
    /// - `Http` for transport failures
    pub async fn submit_lead(&self, lead: &LeadSubmission) -> Result<LeadReceipt, WebhookError> {
        let (url, token) = self
            .config
            .credentials()
            .ok_or(WebhookError::NotConfigured)?;
        let payload = lead.normalize(token);

        let exchange = async {
            let response = self.client.post(url.clone()).json(&payload).send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, text))
        };

        let (status, text) = tokio::time::timeout(self.config.timeout, exchange)
            .await
            .map_err(|_| WebhookError::Timeout(self.config.timeout))??;

        tracing::debug!(status = status.as_u16(), body = %text, "Webhook raw response");

        let value: serde_json::Value = serde_json::from_str(&text)
            .map_err(|_| WebhookError::InvalidBody { raw: text.clone() })?;
        let reply = WebhookLeadReply::from_value(&value);

        if !status.is_success() {
            return Err(WebhookError::Status {
                status,
                message: non_empty(reply.error),
            });
        }

        if !reply.ok {
            return Err(WebhookError::Rejected {
                message: non_empty(reply.error),
            });
        }

        Ok(LeadReceipt {
            duplicated: reply.duplicated,
        })
    }

    /// Fetch the personalization data stored for a slug.
    ///
    /// Only the HTTP client's defaults bound this call.
    ///
    /// # Errors
    ///
    /// - `NotConfigured` before any network call when credentials are missing
    /// - `Status` for a non-success status (the body is not read)
    /// - `Parse` when the reply cannot be decoded
    /// - `Rejected` for `ok: false`
    /// - `Http` for transport failures
    pub async fn lookup_novena(&self, slug: &str) -> Result<NovenaLookup, WebhookError> {
        let (url, token) = self
            .config
            .credentials()
            .ok_or(WebhookError::NotConfigured)?;
        let url = lookup_url(url, slug, token);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(redact_url)?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(slug, status = status.as_u16(), "Webhook lookup failed");
            return Err(WebhookError::Status {
                status,
                message: None,
            });
        }

        let text = response.text().await.map_err(redact_url)?;
        let raw: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| WebhookError::Parse(e.to_string()))?;

        let reply = NovenaLookupReply::from_value(&raw);
        if !reply.ok {
            return Err(WebhookError::Rejected {
                message: non_empty(reply.error),
            });
        }

        let record = reply.data;
        if let Some(record) = &record {
            tracing::info!(slug, nombre = %record.display_name, "Novena found");
        }

        Ok(NovenaLookup { raw, record })
    }
}

/// Append `slug` and `token` to the webhook URL, keeping its existing query.
fn lookup_url(base: &Url, slug: &str, token: &str) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("slug", slug)
        .append_pair("token", token);
    url
}

// The lookup URL carries the token in its query string.
fn redact_url(err: reqwest::Error) -> WebhookError {
    WebhookError::Http(err.without_url())
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.is_empty())
}
