//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Webhook
//! - `GS_WEBHOOK_URL` - Spreadsheet webhook endpoint (reads and writes)
//! - `GS_SECRET_TOKEN` - Shared secret sent with every webhook call
//! - `GS_TIMEOUT_SECS` - Lead submission timeout (default: 10)
//!
//! Both webhook variables are optional at startup. When either is missing the
//! API endpoints answer with a configuration error instead.
//!
//! ## Optional
//! - `NOVENAPP_HOST` - Bind address (default: 127.0.0.1)
//! - `NOVENAPP_PORT` - Listen port (default: 3000)
//! - `NOVENAPP_BASE_URL` - Public URL used in share links (default: `http://localhost:3000`)
//! - `NOVENAPP_STATIC_DIR` - Directory served under `/static` (default: this crate's `static/`)
//! - `NOVENAPP_CACHE_VERSION` - Service worker cache version (default: v1)
//! - `NOVENAPP_SW_EXCLUDED_HOSTS` - Comma-separated hosts the worker never caches
//! - `NOVENAPP_ENABLE_SW` - Register the service worker in pages (default: true)
//! - `GA4_MEASUREMENT_ID` - Google Analytics 4 measurement ID
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use novenapp_core::offline::{DEFAULT_EXCLUDED_HOSTS, OfflineConfig};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Site configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of the site
    pub base_url: String,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Spreadsheet webhook
    pub webhook: WebhookConfig,
    /// Analytics tracking configuration
    pub analytics: AnalyticsConfig,
    /// Service worker settings
    pub offline: OfflineSettings,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Spreadsheet webhook configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct WebhookConfig {
    /// Webhook endpoint
    pub url: Option<Url>,
    /// Shared secret sent as `token`
    pub token: Option<SecretString>,
    /// Upper bound for a lead submission round trip
    pub timeout: Duration,
}

impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("url", &self.url.as_ref().map(Url::as_str))
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Analytics configuration.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsConfig {
    /// Google Analytics 4 measurement ID
    pub ga4_measurement_id: Option<String>,
}

/// Service worker configuration.
#[derive(Debug, Clone)]
pub struct OfflineSettings {
    /// Cache names, precache list and excluded hosts
    pub cache: OfflineConfig,
    /// Whether pages register `/sw.js`
    pub register_worker: bool,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl WebhookConfig {
    /// Configured webhook with the given endpoint and token.
    #[must_use]
    pub fn new(url: Url, token: impl Into<String>) -> Self {
        Self {
            url: Some(url),
            token: Some(SecretString::from(token.into())),
            ..Self::default()
        }
    }

    /// Set the lead submission timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Endpoint and token, only when both are configured.
    #[must_use]
    pub fn credentials(&self) -> Option<(&Url, &str)> {
        let url = self.url.as_ref()?;
        let token = self.token.as_ref()?.expose_secret();
        if token.is_empty() {
            return None;
        }
        Some((url, token))
    }

    fn from_env() -> Result<Self, ConfigError> {
        let url = get_optional_env("GS_WEBHOOK_URL")
            .map(|raw| {
                Url::parse(&raw).map_err(|e| {
                    ConfigError::InvalidEnvVar("GS_WEBHOOK_URL".to_string(), e.to_string())
                })
            })
            .transpose()?;
        let token = get_optional_env("GS_SECRET_TOKEN").map(SecretString::from);
        let timeout_secs = get_env_or_default("GS_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("GS_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            url,
            token,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Default for OfflineSettings {
    fn default() -> Self {
        Self {
            cache: OfflineConfig::default(),
            register_worker: true,
        }
    }
}

impl OfflineSettings {
    fn from_env(webhook: &WebhookConfig) -> Result<Self, ConfigError> {
        let version = get_env_or_default("NOVENAPP_CACHE_VERSION", "v1");
        let mut cache = OfflineConfig::with_version(version);
        if let Some(hosts) = get_optional_env("NOVENAPP_SW_EXCLUDED_HOSTS") {
            cache.excluded_hosts = parse_host_list(&hosts);
        }
        // The webhook host is always excluded, whatever the list says.
        if let Some(host) = webhook.url.as_ref().and_then(Url::host_str) {
            cache.exclude_host(host);
        }

        let register_worker = parse_bool(
            "NOVENAPP_ENABLE_SW",
            &get_env_or_default("NOVENAPP_ENABLE_SW", "true"),
        )?;

        Ok(Self {
            cache,
            register_worker,
        })
    }
}

impl AnalyticsConfig {
    fn from_env() -> Self {
        Self {
            ga4_measurement_id: get_optional_env("GA4_MEASUREMENT_ID"),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            webhook: WebhookConfig::default(),
            analytics: AnalyticsConfig::default(),
            offline: OfflineSettings::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("NOVENAPP_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("NOVENAPP_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("NOVENAPP_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("NOVENAPP_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("NOVENAPP_BASE_URL", "http://localhost:3000")
            .trim_end_matches('/')
            .to_string();
        let static_dir = PathBuf::from(get_env_or_default("NOVENAPP_STATIC_DIR", DEFAULT_STATIC_DIR));

        let webhook = WebhookConfig::from_env()?;
        let offline = OfflineSettings::from_env(&webhook)?;
        let analytics = AnalyticsConfig::from_env();

        Ok(Self {
            host,
            port,
            base_url,
            static_dir,
            webhook,
            analytics,
            offline,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Public share URL for a personalized novena.
    #[must_use]
    pub fn share_url(&self, slug: &str) -> String {
        format!("{}/novenas/{slug}", self.base_url)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Split a comma-separated host list, dropping blanks.
fn parse_host_list(raw: &str) -> Vec<String> {
    let hosts: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|host| !host.is_empty())
        .map(str::to_lowercase)
        .collect();

    if hosts.is_empty() {
        DEFAULT_EXCLUDED_HOSTS
            .iter()
            .map(ToString::to_string)
            .collect()
    } else {
        hosts
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = AppConfig::default();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_share_url() {
        let config = AppConfig {
            base_url: "https://novenapp.co".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(
            config.share_url("familia-perez-1733"),
            "https://novenapp.co/novenas/familia-perez-1733"
        );
    }

    #[test]
    fn test_webhook_credentials_require_both() {
        let url = Url::parse("https://script.google.com/macros/s/abc/exec").unwrap();

        assert!(WebhookConfig::default().credentials().is_none());

        let only_url = WebhookConfig {
            url: Some(url.clone()),
            ..WebhookConfig::default()
        };
        assert!(only_url.credentials().is_none());

        let empty_token = WebhookConfig::new(url.clone(), "");
        assert!(empty_token.credentials().is_none());

        let full = WebhookConfig::new(url, "s3cr3t");
        let (endpoint, token) = full.credentials().unwrap();
        assert_eq!(endpoint.host_str(), Some("script.google.com"));
        assert_eq!(token, "s3cr3t");
    }

    #[test]
    fn test_webhook_config_debug_redacts_token() {
        let config = WebhookConfig::new(
            Url::parse("https://script.google.com/macros/s/abc/exec").unwrap(),
            "super_secret_token_value",
        );

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("script.google.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token_value"));
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(WebhookConfig::default().timeout, Duration::from_secs(10));
        let short = WebhookConfig::default().with_timeout(Duration::from_millis(50));
        assert_eq!(short.timeout, Duration::from_millis(50));
    }

    #[test]
    fn test_parse_host_list() {
        assert_eq!(
            parse_host_list(" Script.Google.com, ,hooks.example.org "),
            vec!["script.google.com", "hooks.example.org"]
        );
        assert_eq!(parse_host_list(" , "), DEFAULT_EXCLUDED_HOSTS.to_vec());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "TRUE").unwrap());
        assert!(parse_bool("X", "1").unwrap());
        assert!(!parse_bool("X", "off").unwrap());
        assert!(matches!(
            parse_bool("X", "maybe"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }
}
