//! Read-Through Module
//!
//! Wraps asynchronous fetches so that a fresh cached value is returned
//! without calling the backend, and a miss fetches, stores and returns.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::CacheStore;
use crate::config::Config;

// == Query Cache ==
/// Read-through handle over a shared [`CacheStore`].
///
/// Cloning is cheap; all clones share the same store.
///
/// Concurrent misses on the same key are not coalesced: each caller runs its
/// own producer and the last write wins.
#[derive(Debug)]
pub struct QueryCache<V> {
    store: Arc<CacheStore<V>>,
}

impl<V> Clone for QueryCache<V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<V> QueryCache<V>
where
    V: Clone + Send + 'static,
{
    // == Constructor ==
    /// Wraps an existing shared store.
    pub fn new(store: Arc<CacheStore<V>>) -> Self {
        Self { store }
    }

    /// Creates a handle over a fresh store built from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(CacheStore::from_config(config)))
    }

    /// Returns the underlying shared store, e.g. to attach a sweeper.
    pub fn store(&self) -> &Arc<CacheStore<V>> {
        &self.store
    }

    // == Get Cached Data ==
    /// Returns the cached value for `key`, or runs `producer` and caches its
    /// result for `ttl` (the store default when `None`).
    ///
    /// An `Err` from the producer is returned unchanged and nothing is
    /// stored, so the next call for the same key fetches again.
    ///
    /// The producer's future is driven on its own task: if the caller stops
    /// polling the returned future, the fetch still completes and its result
    /// is still written to the store.
    ///
    /// # Panics
    /// Resumes the producer's panic on the caller. Panics if the producer
    /// task is cancelled, which only happens when the runtime shuts down
    /// while the fetch is in flight.
    pub async fn get_cached_data<F, Fut, E>(
        &self,
        key: &str,
        producer: F,
        ttl: Option<Duration>,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
        E: Send + 'static,
    {
        if let Some(value) = self.store.get(key) {
            debug!(key = %key, "cache hit");
            return Ok(value);
        }

        debug!(key = %key, "cache miss, invoking producer");

        let fetch = producer();
        let store = Arc::clone(&self.store);
        let owned_key = key.to_string();

        let handle = tokio::spawn(async move {
            let result = fetch.await;
            match &result {
                Ok(value) => store.set(owned_key, value.clone(), ttl),
                Err(_) => debug!(key = %owned_key, "producer failed, nothing cached"),
            }
            result
        });

        match handle.await {
            Ok(result) => result,
            Err(err) => match err.try_into_panic() {
                Ok(payload) => std::panic::resume_unwind(payload),
                Err(err) => panic!(
                    "producer task for key {key} was cancelled before resolving, \
                     most likely because the tokio runtime is shutting down: {err}"
                ),
            },
        }
    }

    // == Invalidate Cache ==
    /// Removes every entry whose key contains `pattern`, or every entry when
    /// `pattern` is `None`.
    ///
    /// Matching is plain substring containment. Returns the number of
    /// entries removed.
    pub fn invalidate_cache(&self, pattern: Option<&str>) -> usize {
        let removed = match pattern {
            Some(pattern) => self.store.invalidate_matching(pattern),
            None => self.store.clear(),
        };

        debug!(pattern = ?pattern, removed, "cache invalidated");
        removed
    }
}
