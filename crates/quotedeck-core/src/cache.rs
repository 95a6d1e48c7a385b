//! Read-through request cache with a fixed freshness window.
//!
//! The cache is an explicit object handed to every component that needs it;
//! there is no process-global state. Entries live in memory only and expire
//! lazily: an expired entry is removed on the next lookup for its key, no
//! background sweeper runs.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::debug;

use crate::SourceError;

/// Default freshness window applied when no per-entry override is given.
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Value,
    expires_at: Instant,
}

#[derive(Debug)]
struct CacheInner {
    map: HashMap<String, CacheEntry>,
    freshness: Duration,
}

impl CacheInner {
    fn new(freshness: Duration) -> Self {
        Self {
            map: HashMap::new(),
            freshness,
        }
    }

    fn live(&self, key: &str) -> Option<Value> {
        self.map.get(key).and_then(|entry| {
            if Instant::now() < entry.expires_at {
                Some(entry.payload.clone())
            } else {
                None
            }
        })
    }

    fn is_expired(&self, key: &str) -> bool {
        self.map
            .get(key)
            .is_some_and(|entry| Instant::now() >= entry.expires_at)
    }

    fn put(&mut self, key: String, payload: Value, ttl_override: Option<Duration>) {
        let ttl = ttl_override.unwrap_or(self.freshness);
        let expires_at = Instant::now() + ttl;
        self.map.insert(key, CacheEntry { payload, expires_at });
    }

    fn clear_expired(&mut self) {
        let now = Instant::now();
        self.map.retain(|_, entry| entry.expires_at > now);
    }
}

type ProducerResult = Result<Value, SourceError>;

/// Shared read-through cache for upstream API payloads.
///
/// Clones share the same store. Concurrent misses for the same key are
/// deduplicated: the first caller runs the producer, every other caller
/// waits on the same in-flight result.
#[derive(Debug, Clone)]
pub struct RequestCache {
    inner: Arc<RwLock<CacheInner>>,
    in_flight: Arc<Mutex<HashMap<String, broadcast::Sender<ProducerResult>>>>,
    namespace: Option<Arc<str>>,
}

impl RequestCache {
    /// Create a cache with an injected freshness window.
    pub fn new(freshness: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CacheInner::new(freshness))),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            namespace: None,
        }
    }

    /// Create a cache with the 5-minute default window.
    pub fn with_default_freshness() -> Self {
        Self::new(DEFAULT_FRESHNESS)
    }

    /// Prefix every key with a namespace, isolating this handle's entries
    /// from other namespaces sharing the same store.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(Arc::from(namespace.into().as_str()));
        self
    }

    fn full_key(&self, key: &str) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}:{key}"),
            None => key.to_owned(),
        }
    }

    /// Get the live payload for a key.
    ///
    /// An entry past its freshness window is removed by this lookup and
    /// reported as absent.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let full_key = self.full_key(key);

        {
            let store = self.inner.read().await;
            if let Some(payload) = store.live(&full_key) {
                return Some(payload);
            }
            if !store.is_expired(&full_key) {
                return None;
            }
        }

        // Lazy removal; re-check under the write lock since the entry may
        // have been refreshed since the read.
        let mut store = self.inner.write().await;
        if store.is_expired(&full_key) {
            store.map.remove(&full_key);
            debug!(key, "cache entry expired");
        }
        store.live(&full_key)
    }

    /// Store a payload; `ttl_override` replaces the default window for this
    /// entry only (widgets use their configured refresh interval here).
    pub async fn put(&self, key: &str, payload: Value, ttl_override: Option<Duration>) {
        let full_key = self.full_key(key);
        let mut store = self.inner.write().await;
        store.put(full_key, payload, ttl_override);
    }

    /// Read-through fetch with the cache's default freshness window.
    pub async fn fetch_through<F, Fut>(&self, key: &str, producer: F) -> ProducerResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ProducerResult>,
    {
        self.fetch_through_with_ttl(key, None, producer).await
    }

    /// Read-through fetch with a per-entry TTL override.
    ///
    /// Hit: returns the cached payload without running the producer.
    /// Miss/expired: runs the producer exactly once across all concurrent
    /// callers of this key; a successful payload is stored, an error is
    /// propagated to every waiter and nothing is written.
    pub async fn fetch_through_with_ttl<F, Fut>(
        &self,
        key: &str,
        ttl_override: Option<Duration>,
        producer: F,
    ) -> ProducerResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ProducerResult>,
    {
        if let Some(payload) = self.get(key).await {
            debug!(key, "cache hit");
            return Ok(payload);
        }

        let full_key = self.full_key(key);

        // Join an in-flight request for this key, or register as its leader.
        let waiter = {
            let mut in_flight = self.in_flight.lock().await;

            // The previous leader may have completed between our miss and
            // taking this lock.
            if let Some(payload) = self.get(key).await {
                debug!(key, "cache hit");
                return Ok(payload);
            }

            match in_flight.get(&full_key) {
                Some(sender) => Some(sender.subscribe()),
                None => {
                    let (sender, _) = broadcast::channel(1);
                    in_flight.insert(full_key.clone(), sender);
                    None
                }
            }
        };

        if let Some(mut receiver) = waiter {
            debug!(key, "joining in-flight request");
            return match receiver.recv().await {
                Ok(result) => result,
                Err(_) => Err(SourceError::internal(
                    "in-flight request finished without publishing a result",
                )),
            };
        }

        debug!(key, "cache miss");
        let result = producer().await;

        if let Ok(payload) = &result {
            self.put(key, payload.clone(), ttl_override).await;
        }

        let sender = self.in_flight.lock().await.remove(&full_key);
        if let Some(sender) = sender {
            // No receivers is fine; nobody joined this request.
            let _ = sender.send(result.clone());
        }

        result
    }

    /// Remove expired entries eagerly.
    pub async fn clear_expired(&self) {
        let mut store = self.inner.write().await;
        store.clear_expired();
    }

    /// Clear all entries.
    pub async fn clear(&self) {
        let mut store = self.inner.write().await;
        store.map.clear();
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        let store = self.inner.read().await;
        store.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
