//! Command implementations.

pub mod content;
pub mod lead;
pub mod novena;
pub mod worker;

use thiserror::Error;
use url::Url;

/// Server used when neither `--server` nor `NOVENAPP_BASE_URL` is given.
pub const DEFAULT_SERVER: &str = "http://localhost:3000";

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The server URL could not be parsed.
    #[error("Invalid server URL {0}: {1}")]
    InvalidServer(String, url::ParseError),

    /// The request to the server failed.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error envelope.
    #[error("Server answered {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Site configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] novenapp_web::config::ConfigError),

    /// The service worker template failed to render.
    #[error("Service worker render failed: {0}")]
    Render(String),

    /// Output could not be serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Resolve the server base URL.
///
/// # Errors
///
/// Returns [`CliError::InvalidServer`] if the URL does not parse.
pub fn server_url(explicit: Option<&str>) -> Result<Url, CliError> {
    dotenvy::dotenv().ok();

    let raw = explicit.map_or_else(
        || std::env::var("NOVENAPP_BASE_URL").unwrap_or_else(|_| DEFAULT_SERVER.to_owned()),
        ToOwned::to_owned,
    );
    Url::parse(&raw).map_err(|e| CliError::InvalidServer(raw, e))
}

/// Read a JSON body, turning non-success statuses into [`CliError::Rejected`].
async fn json_body(response: reqwest::Response) -> Result<serde_json::Value, CliError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(CliError::Rejected {
            status: status.as_u16(),
            body: text,
        });
    }

    Ok(serde_json::from_str(&text)?)
}

/// Pretty-print a JSON value to stdout.
#[allow(clippy::print_stdout)]
fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_server_wins() {
        let url = server_url(Some("https://novenapp.com")).unwrap();
        assert_eq!(url.as_str(), "https://novenapp.com/");
    }

    #[test]
    fn test_invalid_server() {
        let err = server_url(Some("not a url")).unwrap_err();
        assert!(matches!(err, CliError::InvalidServer(..)));
    }
}
