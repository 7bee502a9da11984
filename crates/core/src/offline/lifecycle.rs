//! Service worker lifecycle as an explicit state machine.
//!
//! ```text
//! Installing --finish_install--> Activating --activate--> Active
//! ```
//!
//! The worker skips the waiting phase, so a successful install moves
//! straight to `Activating`. Fetches are only handled once `Active`.

use core::fmt;

use super::config::OfflineConfig;
use super::policy::{
    FetchDecision, FetchRequest, Interception, NetworkOutcome, intercept, resolve,
};
use super::storage::{CacheKey, CacheStorage};

/// Lifecycle state of the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Installing,
    Activating,
    Active,
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Installing => "installing",
            Self::Activating => "activating",
            Self::Active => "active",
        };
        f.write_str(name)
    }
}

/// Errors raised by lifecycle transitions.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// The requested step is not valid in the current state.
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        state: WorkerState,
        action: &'static str,
    },
    /// A precached asset could not be fetched. The whole install fails.
    #[error("precache failed for {url}")]
    PrecacheFailed { url: String },
}

/// What the install step needs to fetch and where to store it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    pub cache_name: String,
    pub urls: Vec<String>,
    pub skip_waiting: bool,
}

/// Caches to drop when the new worker activates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationPlan {
    pub delete: Vec<String>,
    pub claim_clients: bool,
}

/// Result of handling one fetch event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    PassThrough,
    Responded(FetchDecision),
}

/// A service worker instance for one cache version.
#[derive(Debug, Clone)]
pub struct ServiceWorker {
    config: OfflineConfig,
    state: WorkerState,
}

impl ServiceWorker {
    #[must_use]
    pub const fn new(config: OfflineConfig) -> Self {
        Self {
            config,
            state: WorkerState::Installing,
        }
    }

    #[must_use]
    pub const fn state(&self) -> WorkerState {
        self.state
    }

    #[must_use]
    pub const fn config(&self) -> &OfflineConfig {
        &self.config
    }

    fn require(&self, expected: WorkerState, action: &'static str) -> Result<(), LifecycleError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(LifecycleError::InvalidTransition {
                state: self.state,
                action,
            })
        }
    }

    /// The assets to precache.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidTransition`] unless installing.
    pub fn install_plan(&self) -> Result<InstallPlan, LifecycleError> {
        self.require(WorkerState::Installing, "plan install")?;
        Ok(InstallPlan {
            cache_name: self.config.static_cache_name(),
            urls: self.config.precache.clone(),
            skip_waiting: true,
        })
    }

    /// Store the fetched precache assets and move to `Activating`.
    ///
    /// `fetched` pairs each resolved precache URL with its network outcome.
    /// Like `Cache.addAll`, the step is all-or-nothing: if any asset failed or
    /// returned a non-200 status nothing is stored and the state is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidTransition`] unless installing, or
    /// [`LifecycleError::PrecacheFailed`] naming the first failed asset.
    pub fn finish_install(
        &mut self,
        storage: &mut CacheStorage,
        fetched: Vec<(url::Url, NetworkOutcome)>,
    ) -> Result<(), LifecycleError> {
        self.require(WorkerState::Installing, "finish install")?;

        let mut responses = Vec::with_capacity(fetched.len());
        for (url, outcome) in fetched {
            match outcome {
                NetworkOutcome::Response(response) if response.is_ok() => {
                    responses.push((CacheKey::for_url(&url), response));
                }
                _ => {
                    return Err(LifecycleError::PrecacheFailed {
                        url: url.to_string(),
                    });
                }
            }
        }

        let cache_name = self.config.static_cache_name();
        storage.open(&cache_name);
        for (key, response) in responses {
            storage.put(&cache_name, key, response);
        }

        self.state = WorkerState::Activating;
        Ok(())
    }

    /// Compute stale caches and move to `Active`.
    ///
    /// Every cache not named by the current static or dynamic partition is
    /// scheduled for deletion.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidTransition`] unless activating.
    pub fn activate(&mut self, existing: &[String]) -> Result<ActivationPlan, LifecycleError> {
        self.require(WorkerState::Activating, "activate")?;

        let keep = [
            self.config.static_cache_name(),
            self.config.dynamic_cache_name(),
        ];
        let delete = existing
            .iter()
            .filter(|name| !keep.contains(*name))
            .cloned()
            .collect();

        self.state = WorkerState::Active;
        Ok(ActivationPlan {
            delete,
            claim_clients: true,
        })
    }

    /// Handle a fetch event end to end.
    ///
    /// `network` is only called for intercepted requests. The write intent,
    /// if any, is applied to `storage` after the decision is made.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidTransition`] unless active.
    pub fn fetch(
        &self,
        request: &FetchRequest,
        storage: &mut CacheStorage,
        network: impl FnOnce(&FetchRequest) -> NetworkOutcome,
    ) -> Result<FetchResult, LifecycleError> {
        self.require(WorkerState::Active, "handle fetch")?;

        if intercept(&self.config, request) == Interception::PassThrough {
            return Ok(FetchResult::PassThrough);
        }

        let outcome = network(request);
        let mut decision = resolve(&self.config, request, outcome, &*storage);
        if let Some(write) = decision.write.take() {
            storage.apply(write.clone());
            decision.write = Some(write);
        }
        Ok(FetchResult::Responded(decision))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;

    use super::*;
    use crate::offline::storage::{CacheSnapshot, StoredResponse};

    const ORIGIN: &str = "https://novenapp.co";

    fn url(path: &str) -> Url {
        Url::parse(ORIGIN).unwrap().join(path).unwrap()
    }

    fn precache_all(worker: &ServiceWorker) -> Vec<(Url, NetworkOutcome)> {
        worker
            .install_plan()
            .unwrap()
            .urls
            .iter()
            .map(|path| {
                (
                    url(path),
                    NetworkOutcome::Response(StoredResponse::ok("text/html", path.as_str())),
                )
            })
            .collect()
    }

    fn active_worker(storage: &mut CacheStorage) -> ServiceWorker {
        let mut worker = ServiceWorker::new(OfflineConfig::default());
        let fetched = precache_all(&worker);
        worker.finish_install(storage, fetched).unwrap();
        worker.activate(&storage.keys()).unwrap();
        worker
    }

    #[test]
    fn test_install_plan() {
        let worker = ServiceWorker::new(OfflineConfig::default());
        let plan = worker.install_plan().unwrap();
        assert_eq!(plan.cache_name, "novenapp-static-v1");
        assert!(plan.skip_waiting);
        assert_eq!(plan.urls, OfflineConfig::default().precache);
    }

    #[test]
    fn test_install_stores_precache_and_skips_waiting() {
        let mut storage = CacheStorage::new();
        let mut worker = ServiceWorker::new(OfflineConfig::default());
        let fetched = precache_all(&worker);
        worker.finish_install(&mut storage, fetched).unwrap();

        assert_eq!(worker.state(), WorkerState::Activating);
        assert_eq!(storage.len("novenapp-static-v1"), 5);
        assert!(storage.lookup(&CacheKey::for_url(&url("/crear"))).is_some());
    }

    #[test]
    fn test_install_is_all_or_nothing() {
        let mut storage = CacheStorage::new();
        let mut worker = ServiceWorker::new(OfflineConfig::default());
        let mut fetched = precache_all(&worker);
        fetched.push((url("/static/icons/missing.png"), NetworkOutcome::Failed));

        let err = worker.finish_install(&mut storage, fetched).unwrap_err();
        assert!(matches!(err, LifecycleError::PrecacheFailed { .. }));
        assert_eq!(worker.state(), WorkerState::Installing);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_activate_deletes_stale_caches() {
        let mut storage = CacheStorage::new();
        storage.put(
            "novenapp-static-v0",
            CacheKey::for_url(&url("/")),
            StoredResponse::ok("text/html", "old"),
        );
        storage.put(
            "novenapp-v1",
            CacheKey::for_url(&url("/")),
            StoredResponse::ok("text/html", "legacy"),
        );

        let mut worker = ServiceWorker::new(OfflineConfig::default());
        let fetched = precache_all(&worker);
        worker.finish_install(&mut storage, fetched).unwrap();
        storage.open("novenapp-dynamic-v1");

        let plan = worker.activate(&storage.keys()).unwrap();
        assert!(plan.claim_clients);
        assert_eq!(plan.delete, vec!["novenapp-static-v0", "novenapp-v1"]);

        assert_eq!(storage.apply_activation(&plan), 2);
        assert_eq!(
            storage.keys(),
            vec!["novenapp-static-v1", "novenapp-dynamic-v1"]
        );
        assert_eq!(worker.state(), WorkerState::Active);
    }

    #[test]
    fn test_out_of_order_transitions() {
        let mut storage = CacheStorage::new();
        let mut worker = ServiceWorker::new(OfflineConfig::default());

        assert!(matches!(
            worker.activate(&[]),
            Err(LifecycleError::InvalidTransition { .. })
        ));
        let request = FetchRequest::get(url("/"));
        assert!(
            worker
                .fetch(&request, &mut storage, |_| NetworkOutcome::Failed)
                .is_err()
        );

        let fetched = precache_all(&worker);
        worker.finish_install(&mut storage, fetched).unwrap();
        assert!(worker.install_plan().is_err());
        assert!(worker.finish_install(&mut storage, Vec::new()).is_err());
    }

    #[test]
    fn test_offline_repeat_returns_same_body() {
        let mut storage = CacheStorage::new();
        let worker = active_worker(&mut storage);
        let request = FetchRequest::get(url("/novena/dia-3"));

        let online = worker
            .fetch(&request, &mut storage, |_| {
                NetworkOutcome::Response(StoredResponse::ok("text/html", "dia 3"))
            })
            .unwrap();
        assert!(matches!(online, FetchResult::Responded(_)));

        let first = worker
            .fetch(&request, &mut storage, |_| NetworkOutcome::Failed)
            .unwrap();
        let second = worker
            .fetch(&request, &mut storage, |_| NetworkOutcome::Failed)
            .unwrap();

        let (FetchResult::Responded(first), FetchResult::Responded(second)) = (first, second)
        else {
            panic!("expected cached responses");
        };
        assert_eq!(first.response.body, b"dia 3");
        assert_eq!(first.response, second.response);
    }

    #[test]
    fn test_excluded_host_never_cached() {
        let mut storage = CacheStorage::new();
        let worker = active_worker(&mut storage);
        let request = FetchRequest::get(
            Url::parse("https://script.google.com/macros/s/abc/exec?slug=a-1&token=t").unwrap(),
        );

        let mut network_called = false;
        let result = worker
            .fetch(&request, &mut storage, |_| {
                network_called = true;
                NetworkOutcome::Response(StoredResponse::ok("application/json", "{}"))
            })
            .unwrap();

        assert_eq!(result, FetchResult::PassThrough);
        assert!(!network_called);
        assert!(storage.lookup(&request.cache_key()).is_none());
        assert_eq!(storage.len("novenapp-dynamic-v1"), 0);
    }
}
