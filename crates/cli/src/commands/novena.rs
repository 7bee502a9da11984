//! Novena lookup.
//!
//! # Usage
//!
//! ```bash
//! novenapp novena get familia-garcia-173000
//! ```

use url::Url;

use super::{CliError, json_body, print_json};

/// Lookup URL for a slug, with the slug percent-encoded as one path segment.
///
/// # Errors
///
/// Returns [`CliError::InvalidServer`] if the server URL cannot be a base.
pub fn lookup_url(server: &Url, slug: &str) -> Result<Url, CliError> {
    let mut url = server.clone();
    url.path_segments_mut()
        .map_err(|()| {
            CliError::InvalidServer(server.to_string(), url::ParseError::RelativeUrlWithCannotBeABaseBase)
        })?
        .clear()
        .extend(["api", "novena", slug]);
    Ok(url)
}

/// Fetch `GET /api/novena/{slug}` and print the response.
///
/// # Errors
///
/// Returns an error if the request fails or the novena is not found.
pub async fn get(server: &Url, slug: &str) -> Result<(), CliError> {
    let url = lookup_url(server, slug)?;
    tracing::info!("Looking up {url}");

    let response = reqwest::get(url).await?;
    let body = json_body(response).await?;

    print_json(&body)
}
