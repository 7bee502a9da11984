//! Offline cache configuration.

/// Prefix shared by every cache partition this app owns.
pub const CACHE_PREFIX: &str = "novenapp";

/// Routes and assets stored at install time.
pub const DEFAULT_PRECACHE: &[&str] = &[
    "/",
    "/crear",
    "/manifest.json",
    "/static/icons/icon-192.png",
    "/static/icons/icon-512.png",
];

/// Hosts whose responses are never intercepted or cached.
pub const DEFAULT_EXCLUDED_HOSTS: &[&str] = &["script.google.com", "googleapis.com"];

/// Cache partition names, precache list and host exclusions.
///
/// Loaded once at startup and shared by the Rust policy model and the
/// generated service worker script, so both always agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfflineConfig {
    /// Version tag embedded in partition names, e.g. `v1`.
    pub version: String,
    /// Paths fetched into the static partition on install.
    pub precache: Vec<String>,
    /// Host substrings excluded from interception.
    pub excluded_hosts: Vec<String>,
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self {
            version: "v1".to_string(),
            precache: DEFAULT_PRECACHE.iter().map(ToString::to_string).collect(),
            excluded_hosts: DEFAULT_EXCLUDED_HOSTS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl OfflineConfig {
    /// Create a config for a given version with the default lists.
    #[must_use]
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }

    /// Add a host to the exclusion list if it is not already covered.
    pub fn exclude_host(&mut self, host: &str) {
        if host.is_empty() || self.is_excluded_host(host) {
            return;
        }
        self.excluded_hosts.push(host.to_string());
    }

    /// Name of the static partition, e.g. `novenapp-static-v1`.
    #[must_use]
    pub fn static_cache_name(&self) -> String {
        format!("{CACHE_PREFIX}-static-{}", self.version)
    }

    /// Name of the dynamic partition, e.g. `novenapp-dynamic-v1`.
    #[must_use]
    pub fn dynamic_cache_name(&self) -> String {
        format!("{CACHE_PREFIX}-dynamic-{}", self.version)
    }

    /// Whether a hostname matches one of the excluded hosts.
    ///
    /// Matching is by substring so `script.googleusercontent.com`-style
    /// redirects under an excluded domain are also covered.
    #[must_use]
    pub fn is_excluded_host(&self, host: &str) -> bool {
        self.excluded_hosts
            .iter()
            .any(|excluded| !excluded.is_empty() && host.contains(excluded.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_names() {
        let config = OfflineConfig::with_version("v7");
        assert_eq!(config.static_cache_name(), "novenapp-static-v7");
        assert_eq!(config.dynamic_cache_name(), "novenapp-dynamic-v7");
    }

    #[test]
    fn test_default_precache() {
        let config = OfflineConfig::default();
        assert_eq!(config.precache.first().map(String::as_str), Some("/"));
        assert!(config.precache.contains(&"/crear".to_string()));
        assert!(config.precache.contains(&"/manifest.json".to_string()));
    }

    #[test]
    fn test_excluded_host_substring() {
        let config = OfflineConfig::default();
        assert!(config.is_excluded_host("script.google.com"));
        assert!(config.is_excluded_host("sheets.googleapis.com"));
        assert!(!config.is_excluded_host("novenapp.co"));
    }

    #[test]
    fn test_exclude_host_dedupes() {
        let mut config = OfflineConfig::default();
        let before = config.excluded_hosts.len();
        config.exclude_host("script.google.com");
        config.exclude_host("");
        assert_eq!(config.excluded_hosts.len(), before);

        config.exclude_host("hooks.example.org");
        assert!(config.is_excluded_host("hooks.example.org"));
    }
}
