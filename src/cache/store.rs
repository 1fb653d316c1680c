//! Cache Store Module
//!
//! Keyed TTL storage. Every operation, including `get` (which removes expired
//! entries it finds), runs under a single internal mutex, so a store can be
//! shared across tasks and threads behind an `Arc` without external locking.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats};
use crate::config::Config;

#[derive(Debug)]
struct Inner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    stats: CacheStats,
}

impl<V> Inner<V> {
    fn sync_len(&mut self) {
        self.stats.set_total_entries(self.entries.len());
    }
}

// == Cache Store ==
/// Process-wide cache table mapping keys to values with an expiry deadline.
#[derive(Debug)]
pub struct CacheStore<V> {
    inner: Mutex<Inner<V>>,
    /// TTL used when a caller does not supply one
    default_ttl: Duration,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store with the given default TTL.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                stats: CacheStats::new(),
            }),
            default_ttl,
        }
    }

    /// Creates an empty store using the configured default TTL.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.default_ttl())
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // The table is never left half-updated, so a panic in another holder
    // does not invalidate it.
    fn lock(&self) -> MutexGuard<'_, Inner<V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// The entry expires `ttl` from now, or after the default TTL when `ttl`
    /// is `None`. A zero TTL stores an entry that is already expired.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let key = key.into();
        let ttl = ttl.unwrap_or(self.default_ttl);
        let entry = CacheEntry::new(value, ttl);

        let mut inner = self.lock();
        let replaced = inner.entries.insert(key.clone(), entry).is_some();
        inner.sync_len();

        debug!(key = %key, ttl_ms = ttl.as_millis() as u64, replaced, "cache set");
    }

    // == Get ==
    /// Returns a copy of the live value stored under `key`.
    ///
    /// An expired entry is removed as a side effect and reported as absent.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let mut guard = self.lock();
        let inner = &mut *guard;

        match inner.entries.get(key) {
            None => {
                inner.stats.record_miss();
                return None;
            }
            Some(entry) if !entry.is_expired_at(now) => {
                inner.stats.record_hit();
                return Some(entry.value.clone());
            }
            Some(_) => {}
        }

        inner.entries.remove(key);
        inner.stats.record_expirations(1);
        inner.stats.record_miss();
        inner.sync_len();
        debug!(key = %key, "cache entry expired on read");
        None
    }

    // == Delete ==
    /// Removes the entry for `key`. Returns whether an entry was present.
    pub fn delete(&self, key: &str) -> bool {
        let mut inner = self.lock();
        let removed = inner.entries.remove(key).is_some();
        inner.sync_len();
        removed
    }

    // == Clear ==
    /// Removes every entry. Returns the number of entries removed.
    pub fn clear(&self) -> usize {
        let mut inner = self.lock();
        let removed = inner.entries.len();
        inner.entries.clear();
        inner.sync_len();
        removed
    }

    // == Cleanup Expired ==
    /// Removes all entries that have expired as of now.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup(&self) -> usize {
        let now = Instant::now();
        let mut inner = self.lock();

        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - inner.entries.len();

        inner.stats.record_expirations(removed);
        inner.sync_len();
        removed
    }

    // == Invalidate Matching ==
    /// Removes every entry whose key contains `pattern` as a substring.
    ///
    /// Returns the number of entries removed. An empty pattern matches
    /// every key.
    pub fn invalidate_matching(&self, pattern: &str) -> usize {
        let mut inner = self.lock();

        let before = inner.entries.len();
        inner.entries.retain(|key, _| !key.contains(pattern));
        let removed = before - inner.entries.len();

        inner.sync_len();
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the store counters.
    pub fn stats(&self) -> CacheStats {
        let mut inner = self.lock();
        inner.sync_len();
        inner.stats.clone()
    }

    // == Length ==
    /// Returns the number of entries held, including expired entries nobody
    /// has observed yet.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Returns whether the table holds an entry for `key`, live or not.
    ///
    /// Unlike [`get`](Self::get) this does not remove expired entries.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().entries.contains_key(key)
    }
}

impl<V: Clone> Default for CacheStore<V> {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
