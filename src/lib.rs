//! Query Cache - An in-process read-through cache for remote queries
//!
//! Provides a TTL keyed store with order-independent key derivation, lazy and
//! periodic expiration, substring invalidation and a read-through wrapper for
//! asynchronous fetches.
//!
//! The store is meant to be created once by the host and shared through an
//! `Arc`; nothing in this crate holds global state.
//!
//! ```ignore
//! let config = Config::from_env();
//! let cache: QueryCache<serde_json::Value> = QueryCache::from_config(&config);
//! let mut sweeper = Sweeper::from_config(cache.store().clone(), &config)?;
//!
//! let key = generate_key("transactions", [("account", "checking")]);
//! let txs = cache.get_cached_data(&key, || api.transactions("checking"), None).await?;
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{generate_key, CacheStore, ParamValue, QueryCache};
pub use config::Config;
pub use error::CacheError;
pub use tasks::{Sweeper, SweeperState};
