//! Offline cache policy.
//!
//! The browser service worker is generated from the same [`OfflineConfig`]
//! and follows the rules modelled here:
//!
//! 1. Non-GET requests pass through.
//! 2. Requests to excluded hosts (the webhook) pass through.
//! 3. Other GETs go to the network first; 200 responses are copied into the
//!    dynamic partition.
//! 4. On network failure a cached entry is served if one exists.
//! 5. Otherwise navigations get the cached root page.
//! 6. Otherwise a synthetic `503 Offline` response.
//!
//! Partitions are never trimmed individually; bumping the version makes the
//! next activation delete every old partition.

pub mod config;
pub mod lifecycle;
pub mod policy;
pub mod storage;

pub use config::{CACHE_PREFIX, DEFAULT_EXCLUDED_HOSTS, DEFAULT_PRECACHE, OfflineConfig};
pub use lifecycle::{
    ActivationPlan, FetchResult, InstallPlan, LifecycleError, ServiceWorker, WorkerState,
};
pub use policy::{
    CacheWriteIntent, FetchDecision, FetchRequest, Interception, NetworkOutcome, RequestMode,
    ResponseSource, intercept, resolve,
};
pub use storage::{CacheKey, CacheSnapshot, CacheStorage, StoredResponse};
