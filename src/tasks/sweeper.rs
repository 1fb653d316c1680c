//! Expired Entry Sweeper
//!
//! Background task that periodically removes expired entries from a store,
//! bounding memory held by entries nobody reads again.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{CacheError, Result};

/// Lifecycle of a [`Sweeper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweeperState {
    /// Timer armed, sweeping on every tick
    Running,
    /// Task aborted or finished
    Stopped,
}

/// Handle to a running sweep task.
///
/// Dropping the handle does not stop the task; call [`Sweeper::stop`] on
/// shutdown.
#[derive(Debug)]
pub struct Sweeper {
    handle: JoinHandle<()>,
    interval: Duration,
    stopped: bool,
}

impl Sweeper {
    /// Spawns a task that calls [`CacheStore::cleanup`] every `interval`.
    ///
    /// The first sweep happens one full interval after spawning. Ticks are
    /// unconditional: there is no backoff and no pause.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Example
    /// ```ignore
    /// let store = Arc::new(CacheStore::<String>::new(Duration::from_secs(300)));
    /// let mut sweeper = Sweeper::spawn(store.clone(), Duration::from_secs(600))?;
    /// // Later, during shutdown:
    /// sweeper.stop();
    /// ```
    pub fn spawn<V>(store: Arc<CacheStore<V>>, interval: Duration) -> Result<Self>
    where
        V: Clone + Send + 'static,
    {
        if interval.is_zero() {
            return Err(CacheError::InvalidConfig(
                "sweep interval must be greater than zero".to_string(),
            ));
        }

        let handle = tokio::spawn(async move {
            info!(
                "Starting cache sweeper with interval of {} ms",
                interval.as_millis()
            );

            loop {
                tokio::time::sleep(interval).await;

                let removed = store.cleanup();

                if removed > 0 {
                    info!("Cache sweep: removed {} expired entries", removed);
                } else {
                    debug!("Cache sweep: no expired entries found");
                }
            }
        });

        Ok(Self {
            handle,
            interval,
            stopped: false,
        })
    }

    /// Spawns a sweeper using the configured cleanup interval.
    pub fn from_config<V>(store: Arc<CacheStore<V>>, config: &Config) -> Result<Self>
    where
        V: Clone + Send + 'static,
    {
        config.validate()?;
        Self::spawn(store, config.cleanup_interval())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> SweeperState {
        if self.stopped || self.handle.is_finished() {
            SweeperState::Stopped
        } else {
            SweeperState::Running
        }
    }

    /// Aborts the sweep task. Calling it again has no effect.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.handle.abort();
        self.stopped = true;
        info!("Cache sweeper stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> Arc<CacheStore<String>> {
        Arc::new(CacheStore::new(Duration::from_secs(300)))
    }

    #[tokio::test]
    async fn test_sweeper_removes_expired_entries() {
        let store = test_store();

        store.set("expire_soon", "value".to_string(), Some(Duration::from_millis(10)));

        let mut sweeper = Sweeper::spawn(store.clone(), Duration::from_millis(50)).unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;

        // Checked without `get`, so only the sweeper could have removed it.
        assert!(
            !store.contains_key("expire_soon"),
            "Expired entry should have been swept"
        );
        assert_eq!(store.stats().expirations, 1);

        sweeper.stop();
    }

    #[tokio::test]
    async fn test_sweeper_preserves_valid_entries() {
        let store = test_store();

        store.set("long_lived", "value".to_string(), Some(Duration::from_secs(3600)));

        let mut sweeper = Sweeper::spawn(store.clone(), Duration::from_millis(20)).unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(store.get("long_lived").as_deref(), Some("value"));

        sweeper.stop();
    }

    #[tokio::test]
    async fn test_sweeper_state_transitions() {
        let mut sweeper = Sweeper::spawn(test_store(), Duration::from_secs(600)).unwrap();
        assert_eq!(sweeper.state(), SweeperState::Running);
        assert_eq!(sweeper.interval(), Duration::from_secs(600));

        sweeper.stop();
        assert_eq!(sweeper.state(), SweeperState::Stopped);

        sweeper.stop();
        assert_eq!(sweeper.state(), SweeperState::Stopped);
    }

    #[tokio::test]
    async fn test_stopped_sweeper_no_longer_sweeps() {
        let store = test_store();
        let mut sweeper = Sweeper::spawn(store.clone(), Duration::from_millis(20)).unwrap();
        sweeper.stop();

        store.set("stale", "value".to_string(), Some(Duration::from_millis(1)));
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(store.contains_key("stale"));
    }

    #[tokio::test]
    async fn test_zero_interval_is_rejected() {
        let result = Sweeper::spawn(test_store(), Duration::ZERO);
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_from_config_uses_cleanup_interval() {
        let mut sweeper = Sweeper::from_config(test_store(), &Config::default()).unwrap();
        assert_eq!(sweeper.interval(), Duration::from_secs(600));
        sweeper.stop();
    }
}
