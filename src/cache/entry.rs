//! Cache Entry Module
//!
//! Defines a single stored value together with its expiry deadline.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A value held by the store, tagged with the instant it stops being fresh.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant after which the value must not be returned
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry that expires `ttl` from now.
    pub fn new(value: V, ttl: Duration) -> Self {
        let now = Instant::now();
        // A TTL too large to represent never expires in practice.
        let expires_at = now.checked_add(ttl).unwrap_or_else(|| far_future(now));

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Boundary condition: the entry is expired once `now` reaches
    /// `expires_at`, so a zero TTL is expired immediately.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Checks if the entry has expired as of the current instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

fn far_future(now: Instant) -> Instant {
    // Roughly thirty years; Instant has no MAX constant.
    now + Duration::from_secs(60 * 60 * 24 * 365 * 30)
}
