//! Test lead submission.
//!
//! # Usage
//!
//! ```bash
//! novenapp lead send -e a@b.com -n "Juan Pérez" -c Bogotá
//! novenapp lead send -e a@b.com -n "Juan Pérez" -c Bogotá --server https://novenapp.com
//! ```

use novenapp_core::{LeadSubmission, slug_for};
use url::Url;

use super::{CliError, json_body, print_json};

/// Build the submission the creation form would send.
///
/// A slug is generated from the name when none is given.
#[must_use]
pub fn build_submission(
    email: String,
    full_name: String,
    city: String,
    dedication: Option<String>,
    phone: Option<String>,
    slug: Option<String>,
    utm_source: Option<String>,
) -> LeadSubmission {
    let slug =
        slug.unwrap_or_else(|| slug_for(&full_name, chrono::Utc::now().timestamp_millis()));

    LeadSubmission {
        email: Some(email),
        full_name: Some(full_name),
        dedication,
        phone,
        city: Some(city),
        slug: Some(slug),
        utm_source,
    }
}

/// Post a lead to `POST /api/lead` and print the response.
///
/// # Errors
///
/// Returns an error if the request fails or the server rejects the lead.
pub async fn send(server: &Url, lead: &LeadSubmission) -> Result<(), CliError> {
    let endpoint = server
        .join("/api/lead")
        .map_err(|e| CliError::InvalidServer(server.to_string(), e))?;

    tracing::info!(
        slug = lead.slug.as_deref().unwrap_or_default(),
        "Sending lead to {endpoint}"
    );

    let response = reqwest::Client::new()
        .post(endpoint)
        .json(lead)
        .send()
        .await?;
    let body = json_body(response).await?;

    print_json(&body)
}
