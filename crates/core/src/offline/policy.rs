//! Network-first fetch policy.
//!
//! Every decision here is a pure function of the request, the network
//! outcome and a read-only cache snapshot. Cache writes come back as a
//! [`CacheWriteIntent`] for the caller to apply, so the response never waits
//! on the write.

use url::Url;

use super::config::OfflineConfig;
use super::storage::{CacheKey, CacheSnapshot, StoredResponse};

/// How the page issued the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestMode {
    /// Top-level navigation (typing a URL, following a link).
    Navigate,
    /// Sub-resource: script, stylesheet, image, `fetch()`.
    #[default]
    Subresource,
}

/// An intercepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub method: String,
    pub url: Url,
    pub mode: RequestMode,
}

impl FetchRequest {
    #[must_use]
    pub fn new(method: impl Into<String>, url: Url, mode: RequestMode) -> Self {
        Self {
            method: method.into(),
            url,
            mode,
        }
    }

    /// A sub-resource GET.
    #[must_use]
    pub fn get(url: Url) -> Self {
        Self::new("GET", url, RequestMode::Subresource)
    }

    /// A navigation GET.
    #[must_use]
    pub fn navigate(url: Url) -> Self {
        Self::new("GET", url, RequestMode::Navigate)
    }

    #[must_use]
    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
    }

    #[must_use]
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::for_url(&self.url)
    }

    /// Key of the root page on the same origin, used as the navigation shell.
    #[must_use]
    pub fn root_key(&self) -> CacheKey {
        let mut root = self.url.clone();
        root.set_path("/");
        root.set_query(None);
        CacheKey::for_url(&root)
    }
}

/// Whether the worker handles a request at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interception {
    /// The browser handles the request as if no worker were installed.
    PassThrough,
    /// The worker answers using the network-first strategy.
    NetworkFirst,
}

/// Result of the network attempt for an intercepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkOutcome {
    /// The network produced a response (any status).
    Response(StoredResponse),
    /// The request failed before a response arrived.
    Failed,
}

/// Where the response handed back to the page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Network,
    Cache,
    /// Cached root page served in place of an uncached navigation.
    Shell,
    /// Synthetic 503 response.
    Offline,
}

/// Store a response in a partition after it has been returned to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheWriteIntent {
    pub cache_name: String,
    pub key: CacheKey,
    pub response: StoredResponse,
}

/// Outcome of an intercepted fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchDecision {
    pub source: ResponseSource,
    pub response: StoredResponse,
    pub write: Option<CacheWriteIntent>,
}

/// Decide whether a request is intercepted.
///
/// Non-GET requests and requests to excluded hosts pass through untouched,
/// so lead submissions and lookups always reach the webhook live.
#[must_use]
pub fn intercept(config: &OfflineConfig, request: &FetchRequest) -> Interception {
    if !request.is_get() {
        return Interception::PassThrough;
    }

    let excluded = request
        .url
        .host_str()
        .is_some_and(|host| config.is_excluded_host(host));
    if excluded {
        return Interception::PassThrough;
    }

    Interception::NetworkFirst
}

/// Resolve an intercepted request given the network outcome.
///
/// A 200 network response is returned as-is together with a write intent
/// into the dynamic partition. Any other network response is returned
/// without caching. On network failure the snapshot is consulted, then the
/// root page for navigations, then the synthetic offline response.
#[must_use]
pub fn resolve(
    config: &OfflineConfig,
    request: &FetchRequest,
    outcome: NetworkOutcome,
    snapshot: &impl CacheSnapshot,
) -> FetchDecision {
    match outcome {
        NetworkOutcome::Response(response) => {
            let write = response.is_ok().then(|| CacheWriteIntent {
                cache_name: config.dynamic_cache_name(),
                key: request.cache_key(),
                response: response.clone(),
            });
            FetchDecision {
                source: ResponseSource::Network,
                response,
                write,
            }
        }
        NetworkOutcome::Failed => fallback(request, snapshot),
    }
}

fn fallback(request: &FetchRequest, snapshot: &impl CacheSnapshot) -> FetchDecision {
    if let Some(cached) = snapshot.lookup(&request.cache_key()) {
        return FetchDecision {
            source: ResponseSource::Cache,
            response: cached.clone(),
            write: None,
        };
    }

    if request.mode == RequestMode::Navigate {
        if let Some(shell) = snapshot.lookup(&request.root_key()) {
            return FetchDecision {
                source: ResponseSource::Shell,
                response: shell.clone(),
                write: None,
            };
        }
    }

    FetchDecision {
        source: ResponseSource::Offline,
        response: StoredResponse::offline(),
        write: None,
    }
}
