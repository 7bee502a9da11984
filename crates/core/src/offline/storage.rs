//! In-memory cache storage.
//!
//! Mirrors the browser's `CacheStorage`: named partitions searched in
//! creation order, atomic per-key put and get. Decisions are made elsewhere
//! ([`super::policy`]); this type only applies them.

use std::collections::HashMap;

use url::Url;

use super::lifecycle::ActivationPlan;
use super::policy::CacheWriteIntent;

/// Content type of the synthetic offline response.
pub const OFFLINE_CONTENT_TYPE: &str = "text/plain";

/// Body of the synthetic offline response.
pub const OFFLINE_BODY: &str = "Offline";

/// Key of a cached entry. Only GET requests are ever stored, so the URL
/// (without fragment) identifies the entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a URL; the fragment is ignored.
    #[must_use]
    pub fn for_url(url: &Url) -> Self {
        let mut url = url.clone();
        url.set_fragment(None);
        Self(url.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Snapshot of a response as stored in a cache partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl StoredResponse {
    /// A 200 response.
    #[must_use]
    pub fn ok(content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self::with_status(200, content_type, body)
    }

    #[must_use]
    pub fn with_status(status: u16, content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: Some(content_type.to_string()),
            body: body.into(),
        }
    }

    /// The synthetic `503 Offline` response served when nothing is cached.
    #[must_use]
    pub fn offline() -> Self {
        Self::with_status(503, OFFLINE_CONTENT_TYPE, OFFLINE_BODY)
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Read access to cached entries across every partition.
pub trait CacheSnapshot {
    /// Find an entry in any partition, searching in creation order.
    fn lookup(&self, key: &CacheKey) -> Option<&StoredResponse>;
}

#[derive(Debug, Default)]
struct Partition {
    name: String,
    entries: HashMap<CacheKey, StoredResponse>,
}

/// Named cache partitions.
#[derive(Debug, Default)]
pub struct CacheStorage {
    partitions: Vec<Partition>,
}

impl CacheStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a partition if it does not exist yet.
    pub fn open(&mut self, name: &str) {
        if !self.has(name) {
            self.partitions.push(Partition {
                name: name.to_string(),
                entries: HashMap::new(),
            });
        }
    }

    /// Names of all partitions, in creation order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.partitions.iter().map(|p| p.name.clone()).collect()
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.partitions.iter().any(|p| p.name == name)
    }

    /// Delete a partition. Returns whether it existed.
    pub fn delete(&mut self, name: &str) -> bool {
        let before = self.partitions.len();
        self.partitions.retain(|p| p.name != name);
        self.partitions.len() != before
    }

    /// Store a response, overwriting any previous entry for the key.
    pub fn put(&mut self, name: &str, key: CacheKey, response: StoredResponse) {
        if let Some(partition) = self.partitions.iter_mut().find(|p| p.name == name) {
            partition.entries.insert(key, response);
            return;
        }
        self.partitions.push(Partition {
            name: name.to_string(),
            entries: HashMap::from([(key, response)]),
        });
    }

    /// Look up an entry in one partition.
    #[must_use]
    pub fn get(&self, name: &str, key: &CacheKey) -> Option<&StoredResponse> {
        self.partitions
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.entries.get(key))
    }

    /// Number of entries in a partition (0 if it does not exist).
    #[must_use]
    pub fn len(&self, name: &str) -> usize {
        self.partitions
            .iter()
            .find(|p| p.name == name)
            .map_or(0, |p| p.entries.len())
    }

    /// Whether no partition holds any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.partitions.iter().all(|p| p.entries.is_empty())
    }

    /// Apply a write intent produced by the fetch policy.
    pub fn apply(&mut self, intent: CacheWriteIntent) {
        self.put(&intent.cache_name, intent.key, intent.response);
    }

    /// Delete every partition named in an activation plan.
    ///
    /// Returns how many partitions were removed.
    pub fn apply_activation(&mut self, plan: &ActivationPlan) -> usize {
        plan.delete.iter().filter(|name| self.delete(name)).count()
    }
}

impl CacheSnapshot for CacheStorage {
    fn lookup(&self, key: &CacheKey) -> Option<&StoredResponse> {
        self.partitions.iter().find_map(|p| p.entries.get(key))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn key(path: &str) -> CacheKey {
        CacheKey::for_url(&Url::parse("https://novenapp.co").unwrap().join(path).unwrap())
    }

    #[test]
    fn test_key_ignores_fragment() {
        assert_eq!(key("/crear#form"), key("/crear"));
        assert_ne!(key("/crear?a=1"), key("/crear"));
    }

    #[test]
    fn test_put_overwrites() {
        let mut storage = CacheStorage::new();
        storage.put("a", key("/"), StoredResponse::ok("text/html", "one"));
        storage.put("a", key("/"), StoredResponse::ok("text/html", "two"));
        assert_eq!(storage.len("a"), 1);
        assert_eq!(storage.get("a", &key("/")).unwrap().body, b"two");
    }

    #[test]
    fn test_lookup_searches_in_creation_order() {
        let mut storage = CacheStorage::new();
        storage.put("first", key("/"), StoredResponse::ok("text/html", "first"));
        storage.put("second", key("/"), StoredResponse::ok("text/html", "second"));
        assert_eq!(storage.lookup(&key("/")).unwrap().body, b"first");
        assert_eq!(storage.keys(), vec!["first", "second"]);
    }

    #[test]
    fn test_delete() {
        let mut storage = CacheStorage::new();
        storage.put("a", key("/"), StoredResponse::ok("text/html", "x"));
        assert!(storage.delete("a"));
        assert!(!storage.delete("a"));
        assert!(storage.lookup(&key("/")).is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_offline_response() {
        let response = StoredResponse::offline();
        assert_eq!(response.status, 503);
        assert_eq!(response.body, b"Offline");
        assert_eq!(response.content_type.as_deref(), Some("text/plain"));
    }
}
